//! Value labels for bar series.
//!
//! For every bar of a labelled series the plugin computes a value and a
//! position from the host's bar geometry and draws the value as text:
//! centered inside the bar by default, moved outside when a threshold marks
//! the bar as too short, and re-centered on the series' own segment when the
//! series is stacked.

mod align;
mod options;
mod placement;

pub use align::{
    LabelBehavior, OUTSIDE_LABEL_PADDING_PX, OffsetUnits, ResolvedAlign, ResolvedAlignment,
    ThresholdStyle,
};
pub use options::{
    AlignSpec, AlignTransformFn, BarNumbersOptions, BarNumbersOverrides, DEFAULT_LABEL_FONT,
    LabelFormatterFn, Threshold, number_text,
};
pub use placement::{PlacedLabel, place_series_labels};

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::api::BarSeries;
use crate::core::BarOrientation;
use crate::error::ChartResult;
use crate::extensions::{ChartPlugin, PluginInfo};
use crate::render::DrawingSurface;

pub const PLUGIN_NAME: &str = "barnumbers-enhanced";
pub const PLUGIN_VERSION: &str = "1.0";

/// Draws each bar's value on, above, or beside the bar.
#[derive(Debug)]
pub struct BarNumbersPlugin {
    id: String,
    behavior: LabelBehavior,
    alignments: Vec<FinalizedAlignment>,
}

/// Alignment resolved at finalization, kept with the settings it came from.
#[derive(Debug, Clone)]
struct FinalizedAlignment {
    orientation: BarOrientation,
    bar_width: f64,
    x_align: AlignSpec,
    y_align: AlignSpec,
    resolved: ResolvedAlignment,
}

impl FinalizedAlignment {
    fn new(series: &BarSeries) -> Self {
        let numbers = &series.bars.numbers;
        Self {
            orientation: series.orientation(),
            bar_width: series.bars.bar_width,
            x_align: numbers.x_align.clone(),
            y_align: numbers.y_align.clone(),
            resolved: resolve_for(series),
        }
    }

    fn matches(&self, series: &BarSeries) -> bool {
        let numbers = &series.bars.numbers;
        self.orientation == series.orientation()
            && self.bar_width.to_bits() == series.bars.bar_width.to_bits()
            && self.x_align.same_as(&numbers.x_align)
            && self.y_align.same_as(&numbers.y_align)
    }
}

fn resolve_for(series: &BarSeries) -> ResolvedAlignment {
    ResolvedAlignment::resolve(
        &series.bars.numbers,
        series.orientation(),
        series.bars.bar_width,
    )
}

impl Default for BarNumbersPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl BarNumbersPlugin {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: PLUGIN_NAME.to_owned(),
            behavior: LabelBehavior::default(),
            alignments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: LabelBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    #[must_use]
    pub fn behavior(&self) -> LabelBehavior {
        self.behavior
    }

    /// Alignment stored by the last `on_options_finalized` for the series at
    /// `index`, or a fresh one when that series has changed since.
    fn alignment_for(&self, index: usize, series: &BarSeries) -> ResolvedAlignment {
        let finalized = self.alignments.get(index);
        if let Some(finalized) = finalized.filter(|finalized| finalized.matches(series)) {
            return finalized.resolved.clone();
        }

        if finalized.is_some() {
            warn!(
                series = index,
                "series changed since options were finalized; resolving alignment now"
            );
        } else {
            warn!(
                series = index,
                "bar numbers drawn before options were finalized; resolving alignment now"
            );
        }
        resolve_for(series)
    }
}

impl ChartPlugin for BarNumbersPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME,
            version: PLUGIN_VERSION,
        }
    }

    fn default_options(&self) -> Value {
        json!({
            "bars": {
                "numbers": {
                    "show": false,
                    "threshold": false,
                    "yOffset": 0
                }
            }
        })
    }

    fn on_options_finalized(&mut self, series: &mut [BarSeries]) -> ChartResult<()> {
        let mut alignments = Vec::with_capacity(series.len());
        for entry in series.iter() {
            entry.bars.validate()?;
            alignments.push(FinalizedAlignment::new(entry));
        }
        debug!(series = alignments.len(), "resolved bar number alignment");
        self.alignments = alignments;
        Ok(())
    }

    fn on_draw(
        &mut self,
        series: &[BarSeries],
        surface: &mut dyn DrawingSurface,
    ) -> ChartResult<()> {
        for (index, entry) in series.iter().enumerate() {
            let numbers = &entry.bars.numbers;
            if !numbers.show {
                continue;
            }

            let alignment = self.alignment_for(index, entry);
            let offset = surface.plot_offset();
            let labels = place_series_labels(entry, &alignment, self.behavior, &*surface, offset)?;

            surface.set_font(&numbers.font);
            surface.set_fill_color(numbers.font_color);
            for label in &labels {
                surface.set_text_align(label.align);
                surface.set_text_baseline(label.baseline);
                surface.fill_text(&label.text, label.x, label.y)?;
            }
            debug!(series = index, labels = labels.len(), "drew bar numbers");
        }
        Ok(())
    }
}
