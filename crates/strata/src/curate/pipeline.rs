//! Staging → curated feature pipeline.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::input::{format_number, DataTable};
use crate::storage::TableStore;

use super::operations::{CurationReport, CurationStep};
use super::stats::{distinct_count, median, RunningStats};

/// A column contributing to the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskComponent {
    pub column: String,
    pub weight: f64,
}

impl RiskComponent {
    pub fn new(column: impl Into<String>, weight: f64) -> Self {
        Self {
            column: column.into(),
            weight,
        }
    }
}

/// Configuration for the curation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    /// Ratio numerator; must be present.
    pub cost_column: String,
    /// Ratio denominator; must be present.
    pub premium_column: String,
    /// Name of the derived ratio column.
    pub ratio_column: String,
    /// Column dropped when entirely empty. No other column is pruned.
    pub prune_column: String,
    /// Columns standardized when present.
    pub normalize_columns: Vec<String>,
    /// Name of the composite score column.
    pub risk_column: String,
    /// Weighted inputs of the composite score.
    pub risk_components: Vec<RiskComponent>,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            cost_column: "cout_tot".to_string(),
            premium_column: "prime".to_string(),
            ratio_column: "cost_ratio".to_string(),
            prune_column: "Tarification".to_string(),
            normalize_columns: [
                "cout_tot",
                "prime",
                "N_Inondation",
                "WDI_GDP_per_capita",
                "WDI_Inflation_rate",
                "cost_ratio",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            risk_column: "risk_score".to_string(),
            risk_components: vec![
                RiskComponent::new("cost_ratio", 0.5),
                RiskComponent::new("WDI_Inflation_rate", 0.3),
                RiskComponent::new("N_Inondation", 0.2),
            ],
        }
    }
}

impl CurationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the composite score inputs.
    pub fn with_risk_components(mut self, components: Vec<RiskComponent>) -> Self {
        self.risk_components = components;
        self
    }

    /// Replace the set of columns to standardize.
    pub fn with_normalize_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.normalize_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Output of a curation run.
#[derive(Debug, Clone)]
pub struct CuratedTable {
    pub table: DataTable,
    pub report: CurationReport,
}

/// Runs imputation → pruning → ratio → normalization → composite score.
pub struct Curator {
    config: CurationConfig,
}

impl Curator {
    /// Create a curator with default configuration.
    pub fn new() -> Self {
        Self::with_config(CurationConfig::default())
    }

    /// Create a curator with custom configuration.
    pub fn with_config(config: CurationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CurationConfig {
        &self.config
    }

    /// Transform a table in memory.
    ///
    /// Fails if the ratio columns are absent or hold non-numeric values, or if a
    /// present normalization column is non-numeric. Absent optional columns are
    /// skipped.
    pub fn curate(&self, mut table: DataTable) -> Result<CuratedTable> {
        table.require_column(&self.config.cost_column)?;
        table.require_column(&self.config.premium_column)?;

        let mut report = CurationReport::new(table.row_count());

        self.impute(&mut table, &mut report)?;
        self.prune(&mut table, &mut report);
        self.derive_ratio(&mut table, &mut report)?;
        self.normalize(&mut table, &mut report)?;
        self.score(&mut table, &mut report)?;

        info!(
            rows = report.rows,
            imputed = report.values_imputed,
            steps = report.steps.len(),
            "Curated table"
        );
        Ok(CuratedTable { table, report })
    }

    /// Read a staging table, curate it, and write the result to the curated bucket.
    pub fn run(
        &self,
        tables: &TableStore<'_>,
        bucket_staging: &str,
        bucket_curated: &str,
        input_file: &str,
        output_file: &str,
    ) -> Result<CurationReport> {
        let (table, _source) = tables.read_table(bucket_staging, input_file)?;
        let curated = self.curate(table)?;
        tables.write_table(bucket_curated, output_file, &curated.table)?;
        Ok(curated.report)
    }

    /// Fill missing cells of numeric columns with the column median.
    fn impute(&self, table: &mut DataTable, report: &mut CurationReport) -> Result<()> {
        for idx in 0..table.column_count() {
            if !table.is_numeric_column(idx) {
                continue;
            }
            let values = table.numeric_column(idx)?;
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            // Columns with no values at all are left as they are
            if present.is_empty() || present.len() == values.len() {
                continue;
            }

            let fill_value = median(&present).filter(|m| !m.is_nan()).unwrap_or(0.0);
            let fill = format_number(Some(fill_value));
            let mut filled = 0;
            for (row, value) in values.iter().enumerate() {
                if value.is_none() {
                    table.set(row, idx, fill.clone());
                    filled += 1;
                }
            }

            debug!(column = %table.headers[idx], filled, fill_value, "Imputed column");
            report.add_step(CurationStep::Impute {
                column: table.headers[idx].clone(),
                fill_value,
                filled,
            });
        }
        Ok(())
    }

    /// Drop the prune column if every cell is missing.
    fn prune(&self, table: &mut DataTable, report: &mut CurationReport) {
        let column = &self.config.prune_column;
        let Some(idx) = table.column_index(column) else {
            return;
        };
        if table.is_column_empty(idx) && table.drop_column(column) {
            debug!(column = %column, "Dropped empty column");
            report.add_step(CurationStep::DropColumn {
                column: column.clone(),
            });
        }
    }

    /// `ratio = cost / premium`, or 0 where the premium is exactly zero.
    fn derive_ratio(&self, table: &mut DataTable, report: &mut CurationReport) -> Result<()> {
        let cost = table.numeric_column(table.require_column(&self.config.cost_column)?)?;
        let premium = table.numeric_column(table.require_column(&self.config.premium_column)?)?;

        let mut zero_denominators = 0;
        let ratio: Vec<String> = cost
            .iter()
            .zip(&premium)
            .map(|(&c, &p)| {
                let value = match (c, p) {
                    (_, Some(p)) if p == 0.0 => {
                        zero_denominators += 1;
                        Some(0.0)
                    }
                    (Some(c), Some(p)) => Some(c / p),
                    _ => None,
                };
                format_number(value)
            })
            .collect();

        let column = &self.config.ratio_column;
        if !table.has_column(column) {
            report.add_column(column);
        }
        table.put_column(column, ratio);
        report.add_step(CurationStep::DeriveRatio {
            column: column.clone(),
            numerator: self.config.cost_column.clone(),
            denominator: self.config.premium_column.clone(),
            zero_denominators,
        });
        Ok(())
    }

    /// Standardize each present candidate, or zero it when it has fewer than two distinct values.
    fn normalize(&self, table: &mut DataTable, report: &mut CurationReport) -> Result<()> {
        for column in &self.config.normalize_columns {
            let Some(idx) = table.column_index(column) else {
                continue;
            };
            let values = table.numeric_column(idx)?;
            let present: Vec<f64> = values.iter().flatten().copied().collect();

            if distinct_count(&present) > 1 {
                let stats = RunningStats::from_values(&present);
                let scaled = values
                    .iter()
                    .map(|v| format_number(v.map(|x| stats.z_score(x))))
                    .collect();
                table.put_column(column, scaled);
                report.add_step(CurationStep::Standardize {
                    column: column.clone(),
                    mean: stats.mean(),
                    std: stats.std(),
                });
            } else {
                table.put_column(column, vec![format_number(Some(0.0)); values.len()]);
                report.add_step(CurationStep::Zero {
                    column: column.clone(),
                });
            }
        }
        Ok(())
    }

    /// Weighted mean of the present score components, 0 when none are present.
    fn score(&self, table: &mut DataTable, report: &mut CurationReport) -> Result<()> {
        let mut components = Vec::new();
        for component in &self.config.risk_components {
            if let Some(idx) = table.column_index(&component.column) {
                components.push((component, table.numeric_column(idx)?));
            }
        }
        let weight_total: f64 = components.iter().map(|(c, _)| c.weight).sum();

        let scores: Vec<String> = (0..table.row_count())
            .map(|row| {
                if components.is_empty() || weight_total == 0.0 {
                    return format_number(Some(0.0));
                }
                let sum = components
                    .iter()
                    .try_fold(0.0, |acc, (c, values)| values[row].map(|v| acc + c.weight * v));
                format_number(sum.map(|s| s / weight_total))
            })
            .collect();

        let column = &self.config.risk_column;
        if !table.has_column(column) {
            report.add_column(column);
        }
        table.put_column(column, scores);
        report.add_step(CurationStep::Composite {
            column: column.clone(),
            components: components
                .iter()
                .map(|(c, _)| (c.column.clone(), c.weight))
                .collect(),
            weight_total,
        });
        Ok(())
    }
}

impl Default for Curator {
    fn default() -> Self {
        Self::new()
    }
}
