//! Class-aware train/dev/test index splitting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Dense integer code of a label class.
pub type ClassCode = usize;

/// Seed used to shuffle classes with more than three members.
///
/// Changing it changes which records land in which split, so results are
/// only reproducible against the same seed.
pub const DEFAULT_SEED: u64 = 42;

/// One of the three output subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Train,
    Dev,
    Test,
}

impl Partition {
    /// All partitions in output order.
    pub const ALL: [Partition; 3] = [Partition::Train, Partition::Dev, Partition::Test];

    /// Lowercase name.
    pub fn label(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Dev => "dev",
            Partition::Test => "test",
        }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Assignment strategy for a class, chosen by its record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassSize {
    /// One record: goes wherever the round-robin rotation points.
    Single,
    /// Two records: first to train, second to test.
    Pair,
    /// Three records: one to each partition.
    Triple,
    /// More than three: seeded shuffle, then thirds.
    Many(usize),
}

impl ClassSize {
    /// Classify a record count. Zero has no strategy.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(ClassSize::Single),
            2 => Some(ClassSize::Pair),
            3 => Some(ClassSize::Triple),
            n => Some(ClassSize::Many(n)),
        }
    }
}

/// Record positions per partition.
///
/// Within each partition, positions are grouped by ascending class code; this
/// ordering is part of the output contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub dev: Vec<usize>,
    pub test: Vec<usize>,
}

impl SplitIndices {
    /// Positions assigned to a partition.
    pub fn get(&self, partition: Partition) -> &[usize] {
        match partition {
            Partition::Train => &self.train,
            Partition::Dev => &self.dev,
            Partition::Test => &self.test,
        }
    }

    /// Total number of assigned positions.
    pub fn len(&self) -> usize {
        self.train.len() + self.dev.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Partition of every position in `0..record_count`, `None` if unassigned.
    pub fn assignments(&self, record_count: usize) -> Vec<Option<Partition>> {
        let mut out = vec![None; record_count];
        for partition in Partition::ALL {
            for &idx in self.get(partition) {
                if let Some(slot) = out.get_mut(idx) {
                    *slot = Some(partition);
                }
            }
        }
        out
    }

    fn push(&mut self, partition: Partition, idx: usize) {
        match partition {
            Partition::Train => self.train.push(idx),
            Partition::Dev => self.dev.push(idx),
            Partition::Test => self.test.push(idx),
        }
    }
}

/// Rotation shared by all single-record classes of one split.
#[derive(Debug, Default)]
struct RoundRobin {
    counter: usize,
}

impl RoundRobin {
    fn next(&mut self) -> Partition {
        let partition = Partition::ALL[self.counter % 3];
        self.counter += 1;
        partition
    }
}

/// Deterministic stratified splitter.
#[derive(Debug, Clone)]
pub struct StratifiedSplitter {
    seed: u64,
}

impl StratifiedSplitter {
    /// Create a splitter with [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create a splitter with an explicit shuffle seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split record positions by class code, deriving the class set from `codes`.
    pub fn split(&self, codes: &[ClassCode]) -> SplitIndices {
        let mut classes = codes.to_vec();
        classes.sort_unstable();
        classes.dedup();
        self.split_classes(codes, &classes)
    }

    /// Split record positions for the given classes.
    ///
    /// `classes` should be exactly the distinct values of `codes`; they are
    /// processed in ascending order regardless of the order given. Records whose
    /// code is not listed are left unassigned.
    pub fn split_classes(&self, codes: &[ClassCode], classes: &[ClassCode]) -> SplitIndices {
        let mut members: BTreeMap<ClassCode, Vec<usize>> = BTreeMap::new();
        for &class in classes {
            members.entry(class).or_default();
        }
        for (idx, code) in codes.iter().enumerate() {
            if let Some(list) = members.get_mut(code) {
                list.push(idx);
            }
        }

        let mut out = SplitIndices::default();
        let mut rotation = RoundRobin::default();

        for (class, mut indices) in members {
            let Some(size) = ClassSize::from_count(indices.len()) else {
                continue;
            };
            trace!(class, ?size, "Assigning class");

            match size {
                ClassSize::Single => out.push(rotation.next(), indices[0]),
                ClassSize::Pair => {
                    out.push(Partition::Train, indices[0]);
                    out.push(Partition::Test, indices[1]);
                }
                ClassSize::Triple => {
                    out.push(Partition::Train, indices[0]);
                    out.push(Partition::Dev, indices[1]);
                    out.push(Partition::Test, indices[2]);
                }
                ClassSize::Many(count) => {
                    let mut rng = fastrand::Rng::with_seed(self.seed);
                    rng.shuffle(&mut indices);
                    let third = count / 3;
                    out.train.extend_from_slice(&indices[..third]);
                    out.dev.extend_from_slice(&indices[third..2 * third]);
                    out.test.extend_from_slice(&indices[2 * third..]);
                }
            }
        }

        out
    }
}

impl Default for StratifiedSplitter {
    fn default() -> Self {
        Self::new()
    }
}
