use crate::core::{DataPoint, LinearScale, PixelPoint, Viewport};
use crate::error::ChartResult;

/// Converts data-space points to plot-area pixels.
///
/// This is the host's `p2c` contract: the result is relative to the plot
/// area, so callers still add the surface's plot offset.
pub trait CoordinateMapper {
    fn data_to_pixel(&self, point: DataPoint) -> ChartResult<PixelPoint>;
}

/// Cartesian x/y axes over a plot area. Pixel y grows downward, so the y
/// domain is inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotAxes {
    x: LinearScale,
    y: LinearScale,
    plot_area: Viewport,
}

impl PlotAxes {
    pub fn new(x: LinearScale, y: LinearScale, plot_area: Viewport) -> ChartResult<Self> {
        Ok(Self {
            x,
            y,
            plot_area: plot_area.validate()?,
        })
    }

    /// Builds axes from raw `(min, max)` domains.
    pub fn from_domains(
        x_domain: (f64, f64),
        y_domain: (f64, f64),
        plot_area: Viewport,
    ) -> ChartResult<Self> {
        Self::new(
            LinearScale::new(x_domain.0, x_domain.1)?,
            LinearScale::new(y_domain.0, y_domain.1)?,
            plot_area,
        )
    }

    #[must_use]
    pub fn plot_area(&self) -> Viewport {
        self.plot_area
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y
    }

    pub fn pixel_to_data(&self, pixel: PixelPoint) -> ChartResult<DataPoint> {
        let x = self.x.pixel_to_domain(pixel.left, self.plot_area.width)?;
        let height = f64::from(self.plot_area.height);
        let y = self
            .y
            .pixel_to_domain(height - pixel.top, self.plot_area.height)?;
        Ok(DataPoint::new(x, y))
    }
}

impl CoordinateMapper for PlotAxes {
    fn data_to_pixel(&self, point: DataPoint) -> ChartResult<PixelPoint> {
        let left = self.x.domain_to_pixel(point.x, self.plot_area.width)?;
        let from_bottom = self.y.domain_to_pixel(point.y, self.plot_area.height)?;
        Ok(PixelPoint::new(
            left,
            f64::from(self.plot_area.height) - from_bottom,
        ))
    }
}
