mod frame;
mod frame_surface;
mod primitives;
mod surface;

pub use frame::LabelFrame;
pub use frame_surface::FrameSurface;
pub use primitives::{Color, TextAlign, TextBaseline, TextPrimitive};
pub use surface::{DEFAULT_FONT, DrawingSurface, TextState};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoSurface, CairoSurfaceStats};
