//! bar-numbers: value labels for bar charts.
//!
//! A host charting engine lays out bars; this crate reads that geometry and
//! draws each bar's numeric value as text, inside the bar or outside it when
//! the bar is too short, through a small plugin interface.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{BarSeries, PluginHost};
pub use error::{ChartError, ChartResult};
pub use extensions::{BarNumbersOptions, BarNumbersPlugin, ChartPlugin};
