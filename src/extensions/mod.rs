//! Plugins hosted by the chart engine.
//!
//! Plugins see finalized series and a drawing surface; they never reach into
//! host layout or rendering state.

pub mod bar_numbers;
pub mod plugins;

pub use bar_numbers::{
    AlignSpec, BarNumbersOptions, BarNumbersOverrides, BarNumbersPlugin, LabelBehavior,
    PlacedLabel, ResolvedAlign, ResolvedAlignment, Threshold, place_series_labels,
};
pub use plugins::{ChartPlugin, PluginInfo};
