//! Host-facing surface: the series model plugins receive and the registry
//! that dispatches plugin hooks.

mod plugin_host;
mod series;

pub use plugin_host::PluginHost;
pub use series::{BarOptions, BarSeries, DEFAULT_BAR_WIDTH, StackMode};
