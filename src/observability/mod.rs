//! File-based tracing.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → FileSpanExporter → RotatingSink
//! ```
//!
//! Spans land in `~/.local/share/zellij/machine-tracker/machine-tracker-otlp.json`,
//! one JSON object per line. The file rotates past 5 MB and keeps three old
//! copies.

mod export;
mod init;
mod sink;

pub use init::init_tracing;
pub use sink::{RotatingSink, RotationPolicy};
