use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::BarOrientation;

use super::options::{AlignSpec, AlignTransformFn, BarNumbersOptions};

/// Pixel correction applied when a label is pushed outside its bar, to
/// compensate for the padding text surfaces add below a `Bottom` baseline.
pub const OUTSIDE_LABEL_PADDING_PX: f64 = 3.0;

/// Which of the two label behaviours the plugin runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelBehavior {
    /// Numeric aligns are data-unit shifts; the threshold flips the baseline
    /// whatever the orientation.
    #[default]
    Classic,
    /// Numeric aligns are pixel nudges; horizontal bars at or above the
    /// threshold move their label outward instead of flipping it.
    OrientationAware,
}

impl LabelBehavior {
    #[must_use]
    pub fn offset_units(self) -> OffsetUnits {
        match self {
            Self::Classic => OffsetUnits::Data,
            Self::OrientationAware => OffsetUnits::Pixels,
        }
    }

    #[must_use]
    pub fn threshold_style(self, orientation: BarOrientation) -> ThresholdStyle {
        match (self, orientation) {
            (Self::OrientationAware, BarOrientation::Horizontal) => ThresholdStyle::OutwardShift,
            _ => ThresholdStyle::BaselineFlip,
        }
    }
}

/// Units of a fixed align offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnits {
    Data,
    Pixels,
}

/// What the threshold does to a bar's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdStyle {
    /// Below the cut-off the label sits past the bar end, baseline `Bottom`.
    BaselineFlip,
    /// At or above the cut-off the label moves to the bar's outer end.
    OutwardShift,
}

/// An align setting with the orientation default filled in.
#[derive(Clone)]
pub enum ResolvedAlign {
    FixedOffset(f64),
    Transform(AlignTransformFn),
}

impl fmt::Debug for ResolvedAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedOffset(value) => f.debug_tuple("FixedOffset").field(value).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

impl ResolvedAlign {
    /// Shifts a raw data coordinate before pixel conversion.
    #[must_use]
    pub fn shift_data(&self, value: f64, units: OffsetUnits) -> f64 {
        match (self, units) {
            (Self::Transform(f), _) => f(value),
            (Self::FixedOffset(offset), OffsetUnits::Data) => value + offset,
            (Self::FixedOffset(_), OffsetUnits::Pixels) => value,
        }
    }

    /// Extra pixels added after conversion.
    #[must_use]
    pub fn pixel_nudge(&self, units: OffsetUnits) -> f64 {
        match (self, units) {
            (Self::FixedOffset(offset), OffsetUnits::Pixels) => *offset,
            _ => 0.0,
        }
    }
}

/// Resolved x/y alignment for one series.
#[derive(Debug, Clone)]
pub struct ResolvedAlignment {
    pub x: ResolvedAlign,
    pub y: ResolvedAlign,
}

impl ResolvedAlignment {
    /// Resolves both aligns of `options`. `Auto` takes the default that puts
    /// the label mid-way along the bar and centered across it.
    #[must_use]
    pub fn resolve(
        options: &BarNumbersOptions,
        orientation: BarOrientation,
        bar_width: f64,
    ) -> Self {
        let half_width = bar_width / 2.0;
        let (default_x, default_y) = match orientation {
            BarOrientation::Horizontal => (halve(), shift_by(half_width)),
            BarOrientation::Vertical => (shift_by(half_width), halve()),
        };

        Self {
            x: resolve_one(&options.x_align, default_x),
            y: resolve_one(&options.y_align, default_y),
        }
    }
}

fn halve() -> AlignTransformFn {
    Arc::new(|value: f64| value / 2.0)
}

fn shift_by(delta: f64) -> AlignTransformFn {
    Arc::new(move |value: f64| value + delta)
}

fn resolve_one(spec: &AlignSpec, default: AlignTransformFn) -> ResolvedAlign {
    match spec {
        AlignSpec::Auto => ResolvedAlign::Transform(default),
        AlignSpec::Offset(offset) => ResolvedAlign::FixedOffset(*offset),
        AlignSpec::Transform(f) => ResolvedAlign::Transform(Arc::clone(f)),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn vertical_defaults_center_across_and_halve_length() {
        let resolved =
            ResolvedAlignment::resolve(&BarNumbersOptions::shown(), BarOrientation::Vertical, 0.8);
        assert_relative_eq!(resolved.x.shift_data(2.0, OffsetUnits::Data), 2.4);
        assert_eq!(resolved.y.shift_data(10.0, OffsetUnits::Data), 5.0);
    }

    #[test]
    fn horizontal_defaults_swap_axes() {
        let resolved = ResolvedAlignment::resolve(
            &BarNumbersOptions::shown(),
            BarOrientation::Horizontal,
            0.5,
        );
        assert_eq!(resolved.x.shift_data(10.0, OffsetUnits::Data), 5.0);
        assert_eq!(resolved.y.shift_data(3.0, OffsetUnits::Data), 3.25);
    }

    #[test]
    fn fixed_offset_units_depend_on_behavior() {
        let align = ResolvedAlign::FixedOffset(4.0);
        assert_eq!(align.shift_data(1.0, OffsetUnits::Data), 5.0);
        assert_eq!(align.pixel_nudge(OffsetUnits::Data), 0.0);
        assert_eq!(align.shift_data(1.0, OffsetUnits::Pixels), 1.0);
        assert_eq!(align.pixel_nudge(OffsetUnits::Pixels), 4.0);
    }

    #[test]
    fn explicit_transform_wins_over_default() {
        let options = BarNumbersOptions::shown().with_y_align(AlignSpec::transform(|y| y - 1.0));
        let resolved = ResolvedAlignment::resolve(&options, BarOrientation::Vertical, 0.8);
        assert_eq!(resolved.y.shift_data(10.0, OffsetUnits::Pixels), 9.0);
    }
}
