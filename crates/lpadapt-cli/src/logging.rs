//! Structured logging setup for the command line.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxError = Box<dyn std::error::Error>;
type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Event format shared by the stderr and file outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = BoxError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(format!(
                "Invalid LPADAPT_LOG_FORMAT '{value}' (expected 'json' or 'pretty')"
            )
            .into())
        }
    }
}

impl LogFormat {
    fn layer<W>(self, writer: W, ansi: bool) -> BoxedLayer
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi);
        match self {
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Json => layer.json().boxed(),
        }
    }
}

/// Where and how the CLI logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    /// Read `LPADAPT_TRACE`, `LPADAPT_LOG_FORMAT` and `LPADAPT_LOG_FILE`.
    /// An explicit `level` wins over `LPADAPT_TRACE`.
    pub fn from_env(level: Option<&str>) -> Result<Self, BoxError> {
        Self::resolve(
            level,
            env::var("LPADAPT_TRACE").ok(),
            env::var("LPADAPT_LOG_FORMAT").ok(),
            env::var_os("LPADAPT_LOG_FILE").map(PathBuf::from),
        )
    }

    fn resolve(
        level: Option<&str>,
        trace: Option<String>,
        format: Option<String>,
        file: Option<PathBuf>,
    ) -> Result<Self, BoxError> {
        let filter = level
            .map(str::to_string)
            .or(trace)
            .unwrap_or_else(|| "off".to_string());
        let format = format
            .as_deref()
            .map(LogFormat::from_str)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            filter,
            format,
            file,
        })
    }

    /// Logging is off when the filter is `off`.
    pub fn env_filter(&self) -> Result<EnvFilter, BoxError> {
        if self.filter.eq_ignore_ascii_case("off") {
            Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
        } else {
            EnvFilter::try_new(&self.filter)
                .map_err(|err| format!("Invalid log filter: {err}").into())
        }
    }
}

fn open_log_file(path: &Path) -> Result<File, BoxError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| format!("Failed to open log file {}: {err}", path.display()).into())
}

/// Install the global subscriber, writing to stderr and, when configured, to
/// the log file. Returns `false` if a subscriber is already set.
pub fn init(level: Option<&str>) -> Result<bool, BoxError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let settings = LogSettings::from_env(level)?;
    let filter = settings.env_filter()?;
    let mut layers = vec![settings.format.layer(io::stderr, true)];
    if let Some(path) = &settings.file {
        let file = Mutex::new(open_log_file(path)?);
        layers.push(settings.format.layer(file, false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|err| format!("Failed to initialize logging: {err}"))?;
    Ok(true)
}
