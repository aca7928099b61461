use crate::core::{CoordinateMapper, PlotOffset};
use crate::error::ChartResult;
use crate::render::{Color, TextAlign, TextBaseline};

/// Canvas default font.
pub const DEFAULT_FONT: &str = "10px sans-serif";

/// Immediate-mode text target handed to plugins during the draw phase.
///
/// State setters behave like a 2D canvas context: they stick until changed
/// and apply to every later `fill_text`.
pub trait DrawingSurface: CoordinateMapper {
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn set_font(&mut self, font: &str);
    fn set_fill_color(&mut self, color: Color);

    /// Draws `text` anchored at surface pixel `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()>;

    /// Offset of the plot area inside the surface.
    fn plot_offset(&self) -> PlotOffset;
}

/// Current text state of a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub font: String,
    pub color: Color,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            font: DEFAULT_FONT.to_owned(),
            color: Color::BLACK,
        }
    }
}
