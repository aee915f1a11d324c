//! Fuzz target for dataset preparation.
//!
//! Arbitrary labels and targets must split into disjoint partitions that
//! cover every kept record.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use strata::{DataTable, DatasetPreparer, SplitConfig};

#[derive(Debug, Arbitrary)]
struct Input {
    seed: u64,
    records: Vec<(u8, Option<u16>)>,
}

fuzz_target!(|input: Input| {
    if input.records.len() > 10_000 {
        return;
    }

    let rows: Vec<Vec<String>> = input
        .records
        .iter()
        .map(|(label, cost)| {
            vec![
                format!("{:02x}", label % 32),
                cost.map(|c| c.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    let table = DataTable::new(vec!["cod_hex".into(), "cout_tot".into()], rows);

    let preparer = DatasetPreparer::with_config(SplitConfig::new().with_seed(input.seed));
    let prepared = preparer.prepare(table).expect("valid table must prepare");

    let kept = input.records.len() - prepared.rows_dropped;
    assert_eq!(prepared.indices.len(), kept);
    let mut seen = vec![false; kept];
    for idx in [&prepared.indices.train, &prepared.indices.dev, &prepared.indices.test]
        .into_iter()
        .flatten()
    {
        assert!(!seen[*idx], "record assigned twice");
        seen[*idx] = true;
    }
});
