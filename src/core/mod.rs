pub mod axes;
pub mod points;
pub mod scale;
pub mod types;

pub use axes::{CoordinateMapper, PlotAxes};
pub use points::{BarRecord, PLAIN_BAR_STRIDE, PointSequence, STACKED_BAR_STRIDE};
pub use scale::LinearScale;
pub use types::{BarOrientation, DataPoint, PixelPoint, PlotOffset, Viewport};
