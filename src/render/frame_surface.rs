use tracing::trace;

use crate::core::{CoordinateMapper, DataPoint, PixelPoint, PlotAxes, PlotOffset, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawingSurface, LabelFrame, TextAlign, TextBaseline, TextPrimitive, TextState,
};

/// Headless surface that records each draw into a [`LabelFrame`].
///
/// Used by tests and by hosts that rasterize labels themselves.
#[derive(Debug, Clone)]
pub struct FrameSurface<M = PlotAxes> {
    mapper: M,
    offset: PlotOffset,
    state: TextState,
    frame: LabelFrame,
}

impl<M: CoordinateMapper> FrameSurface<M> {
    /// `viewport` is the whole surface; `offset` places the plot area in it.
    #[must_use]
    pub fn new(mapper: M, viewport: Viewport, offset: PlotOffset) -> Self {
        Self {
            mapper,
            offset,
            state: TextState::default(),
            frame: LabelFrame::new(viewport),
        }
    }

    #[must_use]
    pub fn frame(&self) -> &LabelFrame {
        &self.frame
    }

    #[must_use]
    pub fn into_frame(self) -> LabelFrame {
        self.frame
    }

    #[must_use]
    pub fn text_state(&self) -> &TextState {
        &self.state
    }

    /// Drops recorded draws, keeping text state, for the next redraw.
    pub fn clear(&mut self) {
        self.frame.texts.clear();
    }
}

impl<M: CoordinateMapper> CoordinateMapper for FrameSurface<M> {
    fn data_to_pixel(&self, point: DataPoint) -> ChartResult<PixelPoint> {
        self.mapper.data_to_pixel(point)
    }
}

impl<M: CoordinateMapper> DrawingSurface for FrameSurface<M> {
    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn set_font(&mut self, font: &str) {
        font.clone_into(&mut self.state.font);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.color = color;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "cannot draw `{text}` at non-finite position ({x}, {y})"
            )));
        }
        trace!(text, x, y, "record label");
        self.frame.texts.push(TextPrimitive {
            text: text.to_owned(),
            x,
            y,
            font: self.state.font.clone(),
            color: self.state.color,
            align: self.state.align,
            baseline: self.state.baseline,
        });
        Ok(())
    }

    fn plot_offset(&self) -> PlotOffset {
        self.offset
    }
}
