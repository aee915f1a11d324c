//! Inverse-frequency class weights computed from the train split.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use super::stratified::ClassCode;

/// Dense table of class weights indexed by class code.
///
/// Weights of the classes present in train sum to 1; codes below the largest
/// train code that never appear in train have weight 0. Serializes as a flat
/// `{"0": w0, "1": w1, ...}` object.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassWeights {
    weights: Vec<f64>,
}

impl ClassWeights {
    /// Compute weights from the codes of the train records.
    ///
    /// The table covers `0..=largest train code`. Returns `None` when
    /// `train_codes` is empty.
    pub fn from_train_codes(train_codes: &[ClassCode]) -> Option<Self> {
        let mut counts: BTreeMap<ClassCode, usize> = BTreeMap::new();
        for &code in train_codes {
            *counts.entry(code).or_insert(0) += 1;
        }
        let (&largest, _) = counts.last_key_value()?;

        let inverse_total: f64 = counts.values().map(|&n| 1.0 / n as f64).sum();
        let mut weights = vec![0.0; largest + 1];
        for (&code, &n) in &counts {
            weights[code] = (1.0 / n as f64) / inverse_total;
        }

        Some(Self { weights })
    }

    /// Weight of a class code, `None` beyond the table.
    pub fn get(&self, code: ClassCode) -> Option<f64> {
        self.weights.get(code).copied()
    }

    /// Weights in code order.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Number of codes covered.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Serialize for ClassWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.weights
                .iter()
                .enumerate()
                .map(|(code, weight)| (code.to_string(), weight)),
        )
    }
}
