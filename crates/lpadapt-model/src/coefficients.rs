//! Sparse variable-index to coefficient rows.

use crate::error::ModelError;
use crate::ids::VariableId;
use std::collections::BTreeMap;

/// Sparse row of coefficients keyed by variable.
///
/// Absent entries are implicit zeros. Entries are kept in ascending variable
/// order so that rows handed to a backend are built deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BTreeMap<VariableId, f64>"))]
#[cfg_attr(feature = "serde", serde(into = "BTreeMap<VariableId, f64>"))]
pub struct CoefficientMap {
    entries: BTreeMap<VariableId, f64>,
}

impl CoefficientMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(variable, coefficient)` pairs.
    ///
    /// Later pairs overwrite earlier pairs for the same variable.
    pub fn from_terms(
        terms: impl IntoIterator<Item = (VariableId, f64)>,
    ) -> Result<Self, ModelError> {
        let mut map = Self::new();
        for (var_id, coeff) in terms {
            map.set(var_id, coeff)?;
        }
        Ok(map)
    }

    /// Set the coefficient for `var_id`, replacing any previous value.
    ///
    /// A zero coefficient removes the entry.
    pub fn set(&mut self, var_id: VariableId, coefficient: f64) -> Result<(), ModelError> {
        if !coefficient.is_finite() {
            return Err(ModelError::InvalidCoefficient { coefficient });
        }
        if coefficient == 0.0 {
            self.entries.remove(&var_id);
        } else {
            self.entries.insert(var_id, coefficient);
        }
        Ok(())
    }

    /// Add `coefficient` to the current value for `var_id`.
    pub fn add(&mut self, var_id: VariableId, coefficient: f64) -> Result<(), ModelError> {
        let current = self.get(var_id);
        self.set(var_id, current + coefficient)
    }

    /// Coefficient for `var_id`, 0.0 when absent.
    pub fn get(&self, var_id: VariableId) -> f64 {
        self.entries.get(&var_id).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, var_id: VariableId) -> bool {
        self.entries.contains_key(&var_id)
    }

    /// Number of nonzero entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate nonzero entries in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, f64)> + '_ {
        self.entries.iter().map(|(var_id, coeff)| (*var_id, *coeff))
    }

    /// First entry whose index is not below `num_variables`.
    pub fn first_out_of_range(&self, num_variables: usize) -> Option<VariableId> {
        self.entries
            .range(VariableId::from_index(num_variables)..)
            .next()
            .map(|(var_id, _)| *var_id)
            .filter(|var_id| var_id.index() >= num_variables)
    }

    /// Evaluate the row at a dense assignment. Missing values count as zero.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.iter()
            .map(|(var_id, coeff)| coeff * values.get(var_id.index()).copied().unwrap_or(0.0))
            .sum()
    }
}

impl TryFrom<BTreeMap<VariableId, f64>> for CoefficientMap {
    type Error = ModelError;

    fn try_from(entries: BTreeMap<VariableId, f64>) -> Result<Self, Self::Error> {
        Self::from_terms(entries)
    }
}

impl From<CoefficientMap> for BTreeMap<VariableId, f64> {
    fn from(map: CoefficientMap) -> Self {
        map.entries
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn var(index: u32) -> VariableId {
        VariableId::new(index)
    }

    #[test]
    fn test_set_overwrites_existing_entry() {
        let mut map = CoefficientMap::new();
        map.set(var(0), 2.0).unwrap();
        map.set(var(0), 5.0).unwrap();
        assert_eq!(map.get(var(0)), 5.0);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_absent_entry_is_zero() {
        let map = CoefficientMap::new();
        assert_eq!(map.get(var(3)), 0.0);
        assert!(!map.contains(var(3)));
    }

    #[test]
    fn test_zero_coefficient_removes_entry() {
        let mut map = CoefficientMap::from_terms([(var(1), 3.0)]).unwrap();
        map.set(var(1), 0.0).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_add_accumulates_and_cancels() {
        let mut map = CoefficientMap::new();
        map.add(var(2), 1.5).unwrap();
        map.add(var(2), 1.5).unwrap();
        assert_eq!(map.get(var(2)), 3.0);
        map.add(var(2), -3.0).unwrap();
        assert!(!map.contains(var(2)));
    }

    #[test]
    fn test_rejects_non_finite_coefficients() {
        let mut map = CoefficientMap::new();
        assert!(matches!(
            map.set(var(0), f64::NAN),
            Err(ModelError::InvalidCoefficient { .. })
        ));
        assert!(map.set(var(0), f64::INFINITY).is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn test_iteration_is_ascending() {
        let map = CoefficientMap::from_terms([(var(4), 1.0), (var(0), 2.0), (var(2), 3.0)])
            .unwrap();
        let order: Vec<u32> = map.iter().map(|(id, _)| id.inner()).collect();
        assert_eq!(order, vec![0, 2, 4]);
    }

    #[test]
    fn test_first_out_of_range() {
        let map = CoefficientMap::from_terms([(var(0), 1.0), (var(3), 1.0), (var(5), 1.0)])
            .unwrap();
        assert_eq!(map.first_out_of_range(6), None);
        assert_eq!(map.first_out_of_range(4), Some(var(5)));
        assert_eq!(map.first_out_of_range(2), Some(var(3)));
        assert_eq!(CoefficientMap::new().first_out_of_range(0), None);
    }

    #[test]
    fn test_evaluate() {
        let map = CoefficientMap::from_terms([(var(0), 2.0), (var(1), -1.0)]).unwrap();
        assert_eq!(map.evaluate(&[3.0, 4.0]), 2.0);
    }
}
