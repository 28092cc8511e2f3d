pub mod export;
pub mod matching;
pub mod normalization;
pub mod types;

pub use export::{ExportError, ExportFilter, to_csv};
pub use matching::{Comparator, compare};
pub use types::{ComparisonResult, NormalizedTrack, PlaylistSnapshot, PlaylistSummary, Provider};
