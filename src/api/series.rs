use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{BarOrientation, DataPoint, PointSequence};
use crate::error::{ChartError, ChartResult};
use crate::extensions::bar_numbers::BarNumbersOptions;

/// Bar width the host uses when a series does not set one, in data units.
pub const DEFAULT_BAR_WIDTH: f64 = 0.8;

/// Host stacking state for one series.
///
/// JSON accepts `null`/`false` (off), `true` (one shared stack) or a string or
/// number key naming the stack group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StackMode {
    #[default]
    Off,
    Group(String),
}

impl StackMode {
    #[must_use]
    pub fn group(key: impl Into<String>) -> Self {
        Self::Group(key.into())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StackRepr {
    Flag(bool),
    Number(f64),
    Key(String),
}

impl Serialize for StackMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Off => serializer.serialize_bool(false),
            Self::Group(key) => serializer.serialize_str(key),
        }
    }
}

impl<'de> Deserialize<'de> for StackMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<StackRepr>::deserialize(deserializer)? {
            None | Some(StackRepr::Flag(false)) => Self::Off,
            Some(StackRepr::Flag(true)) => Self::Group("true".to_owned()),
            Some(StackRepr::Number(key)) => Self::Group(key.to_string()),
            Some(StackRepr::Key(key)) => Self::Group(key),
        })
    }
}

/// The host's `bars` option block for one series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarOptions {
    pub bar_width: f64,
    pub horizontal: bool,
    pub numbers: BarNumbersOptions,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            horizontal: false,
            numbers: BarNumbersOptions::default(),
        }
    }
}

impl BarOptions {
    #[must_use]
    pub fn orientation(&self) -> BarOrientation {
        BarOrientation::from_horizontal(self.horizontal)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.bar_width.is_finite() || self.bar_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "bar width must be finite and > 0".to_owned(),
            ));
        }
        self.numbers.validate()
    }
}

/// One bar series as the host hands it to plugins: its own data, the
/// geometry the host's bar layout produced from it, and its options.
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub data: Vec<DataPoint>,
    pub points: PointSequence,
    pub bars: BarOptions,
    pub stack: StackMode,
}

impl BarSeries {
    /// Creates an unstacked series whose geometry is its own data.
    #[must_use]
    pub fn new(data: Vec<DataPoint>) -> Self {
        let points = PointSequence::from_points(&data);
        Self {
            data,
            points,
            bars: BarOptions::default(),
            stack: StackMode::Off,
        }
    }

    /// Creates a series from its own data and host-computed geometry.
    #[must_use]
    pub fn with_geometry(data: Vec<DataPoint>, points: PointSequence) -> Self {
        Self {
            data,
            points,
            bars: BarOptions::default(),
            stack: StackMode::Off,
        }
    }

    #[must_use]
    pub fn with_bars(mut self, bars: BarOptions) -> Self {
        self.bars = bars;
        self
    }

    #[must_use]
    pub fn with_numbers(mut self, numbers: BarNumbersOptions) -> Self {
        self.bars.numbers = numbers;
        self
    }

    #[must_use]
    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.bars.horizontal = horizontal;
        self
    }

    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bars.bar_width = bar_width;
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: StackMode) -> Self {
        self.stack = stack;
        self
    }

    #[must_use]
    pub fn orientation(&self) -> BarOrientation {
        self.bars.orientation()
    }

    /// The series' own unstacked datum for bar record `index`.
    pub fn own_datum(&self, index: usize) -> ChartResult<DataPoint> {
        self.data
            .get(index)
            .copied()
            .ok_or(ChartError::MissingSeriesDatum { index })
    }
}
