pub mod aggregator;
pub mod cleaner;
pub mod pipeline;

pub use aggregator::Aggregator;
pub use cleaner::{CleaningReport, FenceTable, RecordCleaner};
pub use pipeline::{AqiPipeline, PipelineReport};
