//! stride-log - step and training log formatter
//!
//! Parses comma-delimited activity records and turns them into short reports
//! through a deterministic pipeline: record parsing → metric derivation →
//! report rendering.
//!
//! ## Record shapes
//!
//! - **Day steps**: `<steps>,<duration>`, e.g. `678,0h50m`
//! - **Training**: `<steps>,<label>,<duration>`, e.g. `3456,Ходьба,3h00m`

pub mod config;
pub mod duration;
pub mod error;
pub mod metrics;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod types;

#[cfg(feature = "cli")]
pub mod logging;

pub use config::{MetricsConfig, UserProfile};
pub use error::{ConfigError, ConversionError, RecordError};
pub use metrics::{MetricsCalculator, StandardCalculator};
pub use pipeline::{day_action_info, training_info, TrackerProcessor};
pub use types::ActivityKind;

/// Crate version
pub const TRACKER_VERSION: &str = env!("CARGO_PKG_VERSION");
