//! Integration tests for the staging → curated job.

use std::sync::Arc;

use strata::curate::{CurationStep, RiskComponent};
use strata::{
    Buckets, CurationConfig, DataTable, LocalStore, ObjectStore, Strata, StrataConfig,
    StrataError, TableCodec,
};
use tempfile::TempDir;

fn local_store(dir: &TempDir) -> Arc<LocalStore> {
    let store = LocalStore::new(dir.path());
    for bucket in ["raw", "staging", "curated"] {
        store.create_bucket(bucket).unwrap();
    }
    Arc::new(store)
}

fn read_curated(store: &dyn ObjectStore, key: &str) -> DataTable {
    let body = store.get("curated", key).expect("curated output missing");
    TableCodec::new().decode(&body).expect("curated output is not CSV")
}

fn numbers(table: &DataTable, column: &str) -> Vec<Option<f64>> {
    let idx = table.column_index(column).expect("column missing");
    table.numeric_column(idx).unwrap()
}

fn assert_close(actual: &[Option<f64>], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{:?}", actual);
    for (a, e) in actual.iter().zip(expected) {
        let a = a.expect("unexpected missing value");
        assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
    }
}

// =============================================================================
// End-to-end curation
// =============================================================================

#[test]
fn test_zero_premium_example() {
    let dir = TempDir::new().unwrap();
    let store = local_store(&dir);
    store
        .put("staging", "train.csv", b"cout_tot,prime\n50,0\n50,100\n")
        .unwrap();

    let report = Strata::new(store.clone())
        .curate("staging", "curated", "train.csv", "curated_train.csv")
        .unwrap();
    assert_eq!(report.rows, 2);
    assert_eq!(report.columns_added, vec!["cost_ratio", "risk_score"]);

    let table = read_curated(store.as_ref(), "curated_train.csv");
    assert_eq!(
        table.headers,
        vec!["cout_tot", "prime", "cost_ratio", "risk_score"]
    );
    // Constant cost column collapses to zero.
    assert_close(&numbers(&table, "cout_tot"), &[0.0, 0.0]);
    assert_close(&numbers(&table, "prime"), &[-1.0, 1.0]);
    // Raw ratios 0 and 0.5 standardize to -1 and 1.
    assert_close(&numbers(&table, "cost_ratio"), &[-1.0, 1.0]);
    // Only cost_ratio is present, so the score equals it.
    assert_close(&numbers(&table, "risk_score"), &[-1.0, 1.0]);
}

#[test]
fn test_full_feature_set() {
    let dir = TempDir::new().unwrap();
    let store = local_store(&dir);
    let content = "cod_hex,cout_tot,prime,N_Inondation,WDI_GDP_per_capita,WDI_Inflation_rate,Tarification\n\
                   AA,100,200,1,1000,2,\n\
                   BB,,100,3,1000,4,\n\
                   AA,300,,5,1000,6,\n";
    store.put("staging", "train.csv", content.as_bytes()).unwrap();

    let report = Strata::new(store.clone())
        .curate("staging", "curated", "train.csv", "out.csv")
        .unwrap();

    let table = read_curated(store.as_ref(), "out.csv");
    assert!(!table.has_column("Tarification"));
    assert_eq!(report.columns_removed, vec!["Tarification"]);
    assert_eq!(report.values_imputed, 2);
    assert_eq!(table.column_by_name("cod_hex").unwrap(), vec!["AA", "BB", "AA"]);

    // GDP is constant after imputation.
    assert_close(&numbers(&table, "WDI_GDP_per_capita"), &[0.0, 0.0, 0.0]);

    // Every score is finite and the mean of a weighted sum of z-scores is zero.
    let scores = numbers(&table, "risk_score");
    let sum: f64 = scores.iter().map(|s| s.unwrap()).sum();
    assert!(sum.abs() < 1e-9);

    let standardized: Vec<&str> = report
        .steps
        .iter()
        .filter_map(|s| match s {
            CurationStep::Standardize { column, .. } => Some(column.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        standardized,
        vec!["cout_tot", "prime", "N_Inondation", "WDI_Inflation_rate", "cost_ratio"]
    );
}

#[test]
fn test_populated_tarification_is_kept() {
    let dir = TempDir::new().unwrap();
    let store = local_store(&dir);
    store
        .put("staging", "train.csv", b"cout_tot,prime,Tarification\n1,2,x\n3,4,\n")
        .unwrap();

    let report = Strata::new(store.clone())
        .curate("staging", "curated", "train.csv", "out.csv")
        .unwrap();

    let table = read_curated(store.as_ref(), "out.csv");
    assert_eq!(table.column_by_name("Tarification").unwrap(), vec!["x", ""]);
    assert!(report.columns_removed.is_empty());
}

#[test]
fn test_custom_risk_weights() {
    let dir = TempDir::new().unwrap();
    let store = local_store(&dir);
    store
        .put("staging", "train.csv", b"cout_tot,prime,N_Inondation\n1,1,0\n3,1,2\n")
        .unwrap();

    let mut config = StrataConfig::default();
    config.curation = CurationConfig::new()
        .with_normalize_columns(["N_Inondation"])
        .with_risk_components(vec![RiskComponent::new("N_Inondation", 2.0)]);

    Strata::with_config(store.clone(), config)
        .curate("staging", "curated", "train.csv", "out.csv")
        .unwrap();

    let table = read_curated(store.as_ref(), "out.csv");
    // Unnormalized ratio stays raw; the score is the normalized flood count.
    assert_close(&numbers(&table, "cost_ratio"), &[1.0, 3.0]);
    assert_close(&numbers(&table, "risk_score"), &[-1.0, 1.0]);
}

#[test]
fn test_output_overwrites_previous_run() {
    let dir = TempDir::new().unwrap();
    let store = local_store(&dir);
    store.put("curated", "out.csv", b"stale\n").unwrap();
    store
        .put("staging", "train.csv", b"cout_tot,prime\n1,1\n2,1\n")
        .unwrap();

    Strata::new(store.clone())
        .curate("staging", "curated", "train.csv", "out.csv")
        .unwrap();
    let table = read_curated(store.as_ref(), "out.csv");
    assert!(table.has_column("risk_score"));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_missing_premium_column() {
    let dir = TempDir::new().unwrap();
    let store = local_store(&dir);
    store
        .put("staging", "train.csv", b"cout_tot\n1\n")
        .unwrap();

    let err = Strata::new(store.clone())
        .curate("staging", "curated", "train.csv", "out.csv")
        .unwrap_err();
    assert!(matches!(err, StrataError::MissingColumn(ref c) if c == "prime"));
    assert!(store.get("curated", "out.csv").unwrap_err().is_not_found());
}

#[test]
fn test_non_numeric_cost() {
    let dir = TempDir::new().unwrap();
    let store = local_store(&dir);
    store
        .put("staging", "train.csv", b"cout_tot,prime\nabc,1\n2,1\n")
        .unwrap();

    let err = Strata::new(store)
        .curate("staging", "curated", "train.csv", "out.csv")
        .unwrap_err();
    assert!(matches!(err, StrataError::NonNumeric { .. }));
}

#[test]
fn test_missing_staging_file() {
    let dir = TempDir::new().unwrap();
    let store = local_store(&dir);
    let err = Strata::new(store)
        .curate("staging", "curated", "train.csv", "out.csv")
        .unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn test_run_pipeline_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = local_store(&dir);
    let raw = "cod_hex,cout_tot,prime\n\
               A,10,100\nA,20,100\nA,30,200\nA,40,0\n\
               B,5,50\nB,7,70\nC,9,\nD,,10\n";
    store.put("raw", "dataset.csv", raw.as_bytes()).unwrap();

    let report = Strata::new(store.clone())
        .run_pipeline(&Buckets::default(), "dataset.csv", "curated_train.csv")
        .unwrap();

    assert_eq!(report.split.rows_dropped, 1);
    assert_eq!(report.curation.rows, report.split.train_rows);
    assert!(dir.path().join("staging").join("class_weights.txt").exists());
    assert!(dir.path().join("curated").join("curated_train.csv").exists());

    let table = read_curated(store.as_ref(), "curated_train.csv");
    assert!(table.has_column("class_encoded"));
    assert!(table.has_column("risk_score"));
}
