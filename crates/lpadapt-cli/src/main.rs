mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use lpadapt::{BackendKind, Config, LinearProgram, Solution, SolverConfig};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const EXIT_SOLUTION: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NO_SOLUTION: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Solve JSON linear programs with interchangeable backends"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a linear program document
    Solve(SolveArgs),
    /// List the backends compiled into this build
    Backends,
}

#[derive(Parser, Debug)]
struct SolveArgs {
    /// Linear program document (JSON)
    file: PathBuf,

    /// Backend to solve with
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Time limit in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Relative MIP gap
    #[arg(long)]
    mip_gap: Option<f64>,

    /// Number of solver threads
    #[arg(long)]
    threads: Option<u32>,

    /// Enable or disable presolve
    #[arg(long, value_enum)]
    presolve: Option<Toggle>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Log filter, e.g. `debug` or `lpadapt_solver=trace` (defaults to LPADAPT_TRACE)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum BackendArg {
    Highs,
    Microlp,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Highs => BackendKind::Highs,
            BackendArg::Microlp => BackendKind::Microlp,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct SolveReport {
    backend: String,
    status: String,
    objective_value: Option<f64>,
    solve_time_seconds: f64,
    variables: Vec<VariableRow>,
}

#[derive(Debug, Clone, Serialize)]
struct VariableRow {
    index: usize,
    name: Option<String>,
    value: f64,
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Solve(args) => solve_command(args),
        Command::Backends => {
            backends_command();
            Ok(EXIT_SOLUTION)
        }
    }
}

fn backends_command() {
    for kind in BackendKind::ALL {
        let marker = if kind.is_available() {
            "available"
        } else {
            "not compiled in"
        };
        let default = if kind == BackendKind::default() {
            " (default)"
        } else {
            ""
        };
        println!("{:<10} {}{}", kind.as_str(), marker, default);
    }
}

fn solve_command(args: SolveArgs) -> Result<i32, Box<dyn std::error::Error>> {
    logging::init(args.log_level.as_deref())?;

    let program = load_program(&args.file)?;
    let config = build_config(&args);
    tracing::debug!(
        component = "cli",
        operation = "solve",
        status = "success",
        file = %args.file.display(),
        backend = config.backend.as_str(),
        num_variables = program.num_variables(),
        num_constraints = program.num_constraints(),
        "Loaded program"
    );

    let solution = lpadapt::solve(&program, &config)?;
    let report = build_report(&program, &solution);
    match args.format {
        OutputFormat::Table => print_report_table(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if solution.has_solution() {
        EXIT_SOLUTION
    } else {
        EXIT_NO_SOLUTION
    })
}

fn load_program(path: &Path) -> Result<LinearProgram, Box<dyn std::error::Error>> {
    let file = File::open(path)
        .map_err(|err| format!("Failed to open {}: {err}", path.display()))?;
    let program: LinearProgram = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Invalid program document {}: {err}", path.display()))?;
    Ok(program)
}

fn build_config(args: &SolveArgs) -> Config {
    let mut solver = SolverConfig::new();
    if let Some(limit) = args.time_limit {
        solver = solver.with_time_limit(limit);
    }
    if let Some(gap) = args.mip_gap {
        solver = solver.with_mip_gap(gap);
    }
    if let Some(threads) = args.threads {
        solver = solver.with_threads(threads);
    }
    if let Some(presolve) = args.presolve {
        solver = solver.with_presolve(presolve == Toggle::On);
    }
    let backend = args.backend.map(BackendKind::from).unwrap_or_default();
    Config::new()
        .with_backend(backend)
        .with_solver_config(solver)
}

fn build_report(program: &LinearProgram, solution: &Solution) -> SolveReport {
    let variables = solution
        .values()
        .iter()
        .zip(program.variables())
        .enumerate()
        .map(|(index, (&value, variable))| VariableRow {
            index,
            name: variable.name().map(str::to_string),
            value,
        })
        .collect();
    SolveReport {
        backend: solution.backend().to_string(),
        status: solution.status().as_str().to_string(),
        objective_value: solution.objective_value(),
        solve_time_seconds: solution.solve_time_seconds(),
        variables,
    }
}

fn print_report_table(report: &SolveReport) {
    println!("backend:   {}", report.backend);
    println!("status:    {}", report.status);
    println!(
        "objective: {}",
        report
            .objective_value
            .map_or_else(|| "-".to_string(), |value| format!("{value:.6}"))
    );
    println!("time_s:    {:.3}", report.solve_time_seconds);
    if report.variables.is_empty() {
        return;
    }
    println!();
    println!("{:>6} {:<20} {:>16}", "index", "name", "value");
    for row in &report.variables {
        println!(
            "{:>6} {:<20} {:>16.6}",
            row.index,
            row.name.as_deref().unwrap_or("-"),
            row.value
        );
    }
}
