use serde::{Deserialize, Serialize};

use crate::core::{BarOrientation, DataPoint};
use crate::error::{ChartError, ChartResult};

/// Record stride the host uses for plain bars: `(x, y)`.
pub const PLAIN_BAR_STRIDE: usize = 2;
/// Record stride the host uses for bars with a bottom: `(x, y, bottom)`.
pub const STACKED_BAR_STRIDE: usize = 3;

/// Flat bar geometry as laid out by the host: `stride` values per bar, the
/// first two being the bar's x and y.
///
/// Deserialization goes through [`PointSequence::new`], so a document with a
/// bad stride is rejected instead of producing a sequence that cannot be walked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PointSequenceRepr")]
pub struct PointSequence {
    values: Vec<f64>,
    stride: usize,
}

#[derive(Deserialize)]
struct PointSequenceRepr {
    values: Vec<f64>,
    stride: usize,
}

impl TryFrom<PointSequenceRepr> for PointSequence {
    type Error = ChartError;

    fn try_from(repr: PointSequenceRepr) -> Result<Self, Self::Error> {
        Self::new(repr.values, repr.stride)
    }
}

impl PointSequence {
    pub fn new(values: Vec<f64>, stride: usize) -> ChartResult<Self> {
        if stride < PLAIN_BAR_STRIDE || values.len() % stride != 0 {
            return Err(ChartError::InvalidStride {
                len: values.len(),
                stride,
            });
        }
        Ok(Self { values, stride })
    }

    /// Builds a plain `(x, y)` sequence.
    pub fn from_points(points: &[DataPoint]) -> Self {
        let mut values = Vec::with_capacity(points.len() * PLAIN_BAR_STRIDE);
        for point in points {
            values.push(point.x);
            values.push(point.y);
        }
        Self {
            values,
            stride: PLAIN_BAR_STRIDE,
        }
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of bar records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() / self.stride
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates bar records in host order.
    pub fn records(&self) -> impl Iterator<Item = BarRecord<'_>> + '_ {
        self.values
            .chunks_exact(self.stride)
            .enumerate()
            .map(|(index, values)| BarRecord { index, values })
    }

    /// Length-axis values of every record.
    pub fn lengths(&self, orientation: BarOrientation) -> impl Iterator<Item = f64> + '_ {
        let offset = orientation.length_index();
        self.values
            .chunks_exact(self.stride)
            .map(move |record| record[offset])
    }
}

/// One bar's slice of a [`PointSequence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRecord<'a> {
    pub index: usize,
    values: &'a [f64],
}

impl BarRecord<'_> {
    #[must_use]
    pub fn x(&self) -> f64 {
        self.values[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.values[1]
    }

    /// Stride-specific extras past `(x, y)`, e.g. the stack bottom.
    #[must_use]
    pub fn extras(&self) -> &[f64] {
        &self.values[PLAIN_BAR_STRIDE..]
    }

    #[must_use]
    pub fn point(&self) -> DataPoint {
        DataPoint::new(self.x(), self.y())
    }

    #[must_use]
    pub fn length(&self, orientation: BarOrientation) -> f64 {
        self.values[orientation.length_index()]
    }
}
