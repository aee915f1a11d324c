//! Dense integer encoding of categorical labels.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::stratified::ClassCode;

/// Bijection from raw label to dense class code.
///
/// Codes are assigned in first-seen order, so the mapping is stable for a
/// fixed input ordering. Serializes as a flat `{"label": code}` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMapping {
    codes: IndexMap<String, ClassCode>,
}

impl LabelMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping and encode every label in one pass.
    pub fn fit_transform<'a, I>(labels: I) -> (Self, Vec<ClassCode>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut mapping = Self::new();
        let encoded = labels.into_iter().map(|l| mapping.encode(l)).collect();
        (mapping, encoded)
    }

    /// Code for a label, assigning the next free code if it is new.
    pub fn encode(&mut self, label: &str) -> ClassCode {
        if let Some(&code) = self.codes.get(label) {
            return code;
        }
        let code = self.codes.len();
        self.codes.insert(label.to_string(), code);
        code
    }

    /// Code for a known label.
    pub fn code(&self, label: &str) -> Option<ClassCode> {
        self.codes.get(label).copied()
    }

    /// Label for a known code.
    pub fn label(&self, code: ClassCode) -> Option<&str> {
        self.codes.get_index(code).map(|(label, _)| label.as_str())
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Labels and codes in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ClassCode)> {
        self.codes.iter().map(|(label, &code)| (label.as_str(), code))
    }
}
