//! AI 洞察展示辅助

pub mod summary;

pub use summary::{normalize_summary, normalize_value, StructuredSummary, SummarySection};
