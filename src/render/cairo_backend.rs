use cairo::Context;
use pango::FontDescription;

use crate::core::{CoordinateMapper, DataPoint, PixelPoint, PlotOffset};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, TextAlign, TextBaseline, TextState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoSurfaceStats {
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo drawing surface.
///
/// Borrows an external Cairo context (for example from a GTK `DrawingArea`
/// callback or an `ImageSurface`) for the duration of one draw pass.
pub struct CairoSurface<'a, M> {
    context: &'a Context,
    mapper: M,
    offset: PlotOffset,
    state: TextState,
    stats: CairoSurfaceStats,
}

impl<'a, M: CoordinateMapper> CairoSurface<'a, M> {
    #[must_use]
    pub fn new(context: &'a Context, mapper: M, offset: PlotOffset) -> Self {
        Self {
            context,
            mapper,
            offset,
            state: TextState::default(),
            stats: CairoSurfaceStats::default(),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn stats(&self) -> CairoSurfaceStats {
        self.stats
    }
}

impl<M: CoordinateMapper> CoordinateMapper for CairoSurface<'_, M> {
    fn data_to_pixel(&self, point: DataPoint) -> ChartResult<PixelPoint> {
        self.mapper.data_to_pixel(point)
    }
}

impl<M: CoordinateMapper> DrawingSurface for CairoSurface<'_, M> {
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
        self.state.color.validate()?;

        let layout = pangocairo::functions::create_layout(self.context);
        let font_description = FontDescription::from_string(&pango_font_string(&self.state.font));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);

        let (width, height) = layout.pixel_size();
        let (width, height) = (f64::from(width), f64::from(height));
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

        let left = match self.state.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let top = match self.state.baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - height / 2.0,
            TextBaseline::Alphabetic => y - baseline,
            TextBaseline::Bottom => y - height,
        };

        let color = self.state.color;
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
        self.context.move_to(left, top);
        pangocairo::functions::show_layout(self.context, &layout);
        self.context
            .status()
            .map_err(|err| ChartError::Backend(format!("failed to draw `{text}`: {err}")))?;

        self.stats.texts_drawn += 1;
        Ok(())
    }

    fn plot_offset(&self) -> PlotOffset {
        self.offset
    }
}

/// Rewrites a CSS shorthand such as `bold 12px Arial` into Pango's
/// `Arial bold 12px` order. Strings without a pixel size pass through.
fn pango_font_string(css: &str) -> String {
    let tokens: Vec<&str> = css.split_whitespace().collect();
    let Some(size_index) = tokens.iter().position(|token| token.ends_with("px")) else {
        return css.to_owned();
    };

    let family = tokens[size_index + 1..].join(" ").replace(['"', '\''], "");
    let mut parts = Vec::with_capacity(tokens.len());
    if !family.is_empty() {
        parts.push(family);
    }
    parts.extend(tokens[..size_index].iter().map(|token| (*token).to_owned()));
    parts.push(tokens[size_index].to_owned());
    parts.join(" ")
}
