pub mod aggregator;
pub mod error;
pub mod history;
pub mod settings;
pub mod store;
pub mod tracing;

pub use aggregator::{AggregateOutcome, Aggregator, DataPaths};
pub use history::{BenchmarkRecord, History, RecentView};

pub type BenchHistoryResult<T> = Result<T, error::BenchHistoryError>;
