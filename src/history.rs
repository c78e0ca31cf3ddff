use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of trailing records kept in the recent view unless configured otherwise.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// One benchmark run's results. The contents are never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkRecord(serde_json::Value);

impl BenchmarkRecord {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for BenchmarkRecord {
    fn from(that: serde_json::Value) -> Self {
        Self(that)
    }
}

impl fmt::Display for BenchmarkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every recorded benchmark run, oldest first. Only grows.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<BenchmarkRecord>);

impl History {
    pub fn new(records: Vec<BenchmarkRecord>) -> Self {
        Self(records)
    }

    pub fn append(&mut self, record: BenchmarkRecord) {
        self.0.push(record);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        self.0.as_slice()
    }

    pub fn last(&self) -> Option<&BenchmarkRecord> {
        self.0.last()
    }

    /// The trailing `limit` records, or all of them when the history is shorter.
    pub fn recent(&self, limit: usize) -> RecentView<'_> {
        let start = self.0.len().saturating_sub(limit);
        RecentView(&self.0[start..])
    }
}

impl From<Vec<BenchmarkRecord>> for History {
    fn from(that: Vec<BenchmarkRecord>) -> Self {
        Self(that)
    }
}

impl FromIterator<BenchmarkRecord> for History {
    fn from_iter<I: IntoIterator<Item = BenchmarkRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for History {
    type Item = BenchmarkRecord;
    type IntoIter = std::vec::IntoIter<BenchmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Borrowed tail of a [`History`]; serializes as a JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecentView<'h>(&'h [BenchmarkRecord]);

impl<'h> RecentView<'h> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &'h [BenchmarkRecord] {
        self.0
    }
}
