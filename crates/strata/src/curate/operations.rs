//! Curation steps and the report describing what a run changed.

use serde::{Deserialize, Serialize};

/// One change applied by the curation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CurationStep {
    /// Missing numeric values replaced by the column median.
    Impute {
        column: String,
        fill_value: f64,
        filled: usize,
    },

    /// An entirely empty column removed.
    DropColumn { column: String },

    /// Per-row ratio of two columns, zero where the denominator is zero.
    DeriveRatio {
        column: String,
        numerator: String,
        denominator: String,
        zero_denominators: usize,
    },

    /// Column replaced by its standard score.
    Standardize { column: String, mean: f64, std: f64 },

    /// Column with at most one distinct value replaced by zeros.
    Zero { column: String },

    /// Weighted composite of normalized columns.
    Composite {
        column: String,
        components: Vec<(String, f64)>,
        weight_total: f64,
    },
}

impl CurationStep {
    /// Column written or removed by the step.
    pub fn column(&self) -> &str {
        match self {
            CurationStep::Impute { column, .. }
            | CurationStep::DropColumn { column }
            | CurationStep::DeriveRatio { column, .. }
            | CurationStep::Standardize { column, .. }
            | CurationStep::Zero { column }
            | CurationStep::Composite { column, .. } => column,
        }
    }

    /// Get a human-readable description of the step.
    pub fn description(&self) -> String {
        match self {
            CurationStep::Impute {
                column,
                fill_value,
                filled,
            } => format!("Imputed {} value(s) in '{}' with {}", filled, column, fill_value),
            CurationStep::DropColumn { column } => format!("Dropped empty column '{}'", column),
            CurationStep::DeriveRatio {
                column,
                numerator,
                denominator,
                zero_denominators,
            } => format!(
                "Derived '{}' = '{}' / '{}' ({} zero denominator(s))",
                column, numerator, denominator, zero_denominators
            ),
            CurationStep::Standardize { column, mean, std } => {
                format!("Standardized '{}' (mean {:.4}, std {:.4})", column, mean, std)
            }
            CurationStep::Zero { column } => {
                format!("Zeroed '{}' (fewer than two distinct values)", column)
            }
            CurationStep::Composite {
                column,
                components,
                weight_total,
            } => {
                if components.is_empty() {
                    format!("Set '{}' to 0 (no components present)", column)
                } else {
                    let parts: Vec<String> = components
                        .iter()
                        .map(|(c, w)| format!("{}×'{}'", w, c))
                        .collect();
                    format!("Derived '{}' = ({}) / {}", column, parts.join(" + "), weight_total)
                }
            }
        }
    }
}

/// Result of a curation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurationReport {
    /// Number of records processed.
    pub rows: usize,

    /// Total missing values filled by imputation.
    pub values_imputed: usize,

    /// Columns appended to the table.
    pub columns_added: Vec<String>,

    /// Columns removed from the table.
    pub columns_removed: Vec<String>,

    /// Steps in the order they ran.
    pub steps: Vec<CurationStep>,
}

impl CurationReport {
    /// Create an empty report.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Record a step.
    pub fn add_step(&mut self, step: CurationStep) {
        match &step {
            CurationStep::Impute { filled, .. } => self.values_imputed += filled,
            CurationStep::DropColumn { column } => self.columns_removed.push(column.clone()),
            _ => {}
        }
        self.steps.push(step);
    }

    /// Record that a column was appended.
    pub fn add_column(&mut self, column: &str) {
        self.columns_added.push(column.to_string());
    }

    /// Steps touching a column.
    pub fn steps_for<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CurationStep> {
        self.steps.iter().filter(move |s| s.column() == column)
    }
}
