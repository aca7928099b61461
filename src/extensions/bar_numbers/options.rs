use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DEFAULT_FONT};

pub type LabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;
pub type AlignTransformFn = Arc<dyn Fn(f64) -> f64 + Send + Sync + 'static>;

/// Font used when a series does not name one.
pub const DEFAULT_LABEL_FONT: &str = DEFAULT_FONT;

/// Base-10 text of `value` as web chart hosts print numbers.
///
/// Shortest round-trip digits, in exponent form (`1e+21`, `1.5e-7`) when the
/// magnitude is at least `1e21` or below `1e-6`.
#[must_use]
pub fn number_text(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let magnitude = value.abs();
    if value.is_nan() || (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// How a label coordinate is shifted before it is drawn.
///
/// JSON carries only the numeric form; transforms are attached in code.
#[derive(Clone, Default)]
pub enum AlignSpec {
    /// Use the orientation-dependent default.
    #[default]
    Auto,
    Offset(f64),
    Transform(AlignTransformFn),
}

impl AlignSpec {
    #[must_use]
    pub fn transform(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Transform(Arc::new(f))
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Whether both specs resolve alike; transforms compare by identity.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Auto, Self::Auto) => true,
            (Self::Offset(a), Self::Offset(b)) => a.to_bits() == b.to_bits(),
            (Self::Transform(a), Self::Transform(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for AlignSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Offset(value) => f.debug_tuple("Offset").field(value).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

impl Serialize for AlignSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Offset(value) => serializer.serialize_f64(*value),
            Self::Auto | Self::Transform(_) => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for AlignSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.map_or(Self::Auto, Self::Offset))
    }
}

/// Fraction of the series maximum below which labels move outside the bar.
///
/// JSON: `false`/`null` disables, a number sets the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Threshold {
    #[default]
    Disabled,
    Fraction(f64),
}

impl Threshold {
    /// Cut-off value for a series whose largest length is `series_max`.
    ///
    /// Only a positive fraction enables the threshold.
    #[must_use]
    pub fn min_show(self, series_max: f64) -> Option<f64> {
        match self {
            Self::Fraction(fraction) if fraction > 0.0 => Some(series_max * fraction),
            _ => None,
        }
    }

    fn validate(self) -> ChartResult<()> {
        if let Self::Fraction(fraction) = self {
            if !fraction.is_finite() || fraction < 0.0 {
                return Err(ChartError::InvalidData(
                    "threshold must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThresholdRepr {
    Flag(bool),
    Fraction(f64),
}

impl Serialize for Threshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Fraction(fraction) => serializer.serialize_f64(*fraction),
        }
    }
}

impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<ThresholdRepr>::deserialize(deserializer)? {
            None | Some(ThresholdRepr::Flag(false)) => Ok(Self::Disabled),
            Some(ThresholdRepr::Flag(true)) => Err(serde::de::Error::custom(
                "threshold must be `false` or a fraction",
            )),
            Some(ThresholdRepr::Fraction(fraction)) => Ok(Self::Fraction(fraction)),
        }
    }
}

/// Per-series value-label options, the `bars.numbers` block of host options.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarNumbersOptions {
    pub show: bool,
    #[serde(skip)]
    pub formatter: Option<LabelFormatterFn>,
    #[serde(skip_serializing_if = "AlignSpec::is_auto")]
    pub x_align: AlignSpec,
    #[serde(skip_serializing_if = "AlignSpec::is_auto")]
    pub y_align: AlignSpec,
    pub x_offset: f64,
    pub y_offset: f64,
    pub font: String,
    pub font_color: Color,
    pub threshold: Threshold,
}

impl Default for BarNumbersOptions {
    fn default() -> Self {
        Self {
            show: false,
            formatter: None,
            x_align: AlignSpec::Auto,
            y_align: AlignSpec::Auto,
            x_offset: 0.0,
            y_offset: 0.0,
            font: DEFAULT_LABEL_FONT.to_owned(),
            font_color: Color::BLACK,
            threshold: Threshold::Disabled,
        }
    }
}

impl fmt::Debug for BarNumbersOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarNumbersOptions")
            .field("show", &self.show)
            .field("formatter", &self.formatter.as_ref().map(|_| ".."))
            .field("x_align", &self.x_align)
            .field("y_align", &self.y_align)
            .field("x_offset", &self.x_offset)
            .field("y_offset", &self.y_offset)
            .field("font", &self.font)
            .field("font_color", &self.font_color)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl BarNumbersOptions {
    /// Options with labels switched on and everything else defaulted.
    #[must_use]
    pub fn shown() -> Self {
        Self {
            show: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn with_x_align(mut self, align: AlignSpec) -> Self {
        self.x_align = align;
        self
    }

    #[must_use]
    pub fn with_y_align(mut self, align: AlignSpec) -> Self {
        self.y_align = align;
        self
    }

    #[must_use]
    pub fn with_offsets(mut self, x_offset: f64, y_offset: f64) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    #[must_use]
    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, fraction: f64) -> Self {
        self.threshold = Threshold::Fraction(fraction);
        self
    }

    /// Label text for `value`: the formatter's output, or [`number_text`].
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        match &self.formatter {
            Some(formatter) => formatter(value),
            None => number_text(value),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (value, name) in [(self.x_offset, "xOffset"), (self.y_offset, "yOffset")] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "label option `{name}` must be finite"
                )));
            }
        }
        for (align, name) in [(&self.x_align, "xAlign"), (&self.y_align, "yAlign")] {
            if let AlignSpec::Offset(value) = align {
                if !value.is_finite() {
                    return Err(ChartError::InvalidData(format!(
                        "label option `{name}` must be finite"
                    )));
                }
            }
        }
        if self.font.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "label font must not be empty".to_owned(),
            ));
        }
        self.font_color.validate()?;
        self.threshold.validate()
    }

    /// Serializes options to pretty JSON. Formatters and transforms are omitted.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize options: {e}")))
    }

    /// Deserializes options from JSON; absent fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let options: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse options: {e}")))?;
        options.validate()?;
        Ok(options)
    }
}

/// Field-by-field overrides a single series applies on top of chart-wide
/// label options.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarNumbersOverrides {
    pub show: Option<bool>,
    #[serde(skip)]
    pub formatter: Option<LabelFormatterFn>,
    pub x_align: Option<AlignSpec>,
    pub y_align: Option<AlignSpec>,
    pub x_offset: Option<f64>,
    pub y_offset: Option<f64>,
    pub font: Option<String>,
    pub font_color: Option<Color>,
    pub threshold: Option<Threshold>,
}

impl fmt::Debug for BarNumbersOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarNumbersOverrides")
            .field("show", &self.show)
            .field("formatter", &self.formatter.as_ref().map(|_| ".."))
            .field("x_align", &self.x_align)
            .field("y_align", &self.y_align)
            .field("x_offset", &self.x_offset)
            .field("y_offset", &self.y_offset)
            .field("font", &self.font)
            .field("font_color", &self.font_color)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl BarNumbersOverrides {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse overrides: {e}")))
    }

    /// Returns `base` with every set field replaced.
    #[must_use]
    pub fn apply_to(&self, base: &BarNumbersOptions) -> BarNumbersOptions {
        let mut merged = base.clone();
        if let Some(show) = self.show {
            merged.show = show;
        }
        if let Some(formatter) = &self.formatter {
            merged.formatter = Some(Arc::clone(formatter));
        }
        if let Some(align) = &self.x_align {
            merged.x_align = align.clone();
        }
        if let Some(align) = &self.y_align {
            merged.y_align = align.clone();
        }
        if let Some(offset) = self.x_offset {
            merged.x_offset = offset;
        }
        if let Some(offset) = self.y_offset {
            merged.y_offset = offset;
        }
        if let Some(font) = &self.font {
            merged.font.clone_from(font);
        }
        if let Some(color) = self.font_color {
            merged.font_color = color;
        }
        if let Some(threshold) = self.threshold {
            merged.threshold = threshold;
        }
        merged
    }
}
