use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::api::BarSeries;
use crate::core::{BarOrientation, CoordinateMapper, DataPoint, PlotOffset};
use crate::error::{ChartError, ChartResult};
use crate::render::{TextAlign, TextBaseline};

use super::align::{LabelBehavior, OUTSIDE_LABEL_PADDING_PX, ResolvedAlignment, ThresholdStyle};

/// One computed value label in surface pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLabel {
    /// Bar record index within the series.
    pub index: usize,
    /// Value the text was formatted from.
    pub value: f64,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Whether the threshold moved the label away from its default spot.
    pub displaced: bool,
}

/// Computes the value label of every bar in `series`.
///
/// Does not look at `show`; callers decide whether a series is labelled.
/// Records are visited in host order and each yields exactly one label.
pub fn place_series_labels<M: CoordinateMapper + ?Sized>(
    series: &BarSeries,
    alignment: &ResolvedAlignment,
    behavior: LabelBehavior,
    mapper: &M,
    offset: PlotOffset,
) -> ChartResult<Vec<PlacedLabel>> {
    let points = &series.points;
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let options = &series.bars.numbers;
    let orientation = series.orientation();
    let units = behavior.offset_units();
    let threshold_style = behavior.threshold_style(orientation);
    let stacked = series.stack.is_active();

    let min_show = points
        .lengths(orientation)
        .map(OrderedFloat)
        .max()
        .and_then(|max| options.threshold.min_show(max.0));

    let mut labels = Vec::with_capacity(points.len());
    for record in points.records() {
        let primary = record.length(orientation);
        if !primary.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "bar {} has a non-finite length",
                record.index
            )));
        }

        let raw = record.point();
        let mut point = DataPoint::new(
            alignment.x.shift_data(raw.x, units),
            alignment.y.shift_data(raw.y, units),
        );

        let value = if stacked {
            let own = series.own_datum(record.index)?.length(orientation);
            set_length(&mut point, orientation, primary - own / 2.0);
            own
        } else {
            primary
        };

        let mut nudge_x = options.x_offset + alignment.x.pixel_nudge(units);
        let mut nudge_y = options.y_offset + alignment.y.pixel_nudge(units);
        let mut align = TextAlign::Center;
        let mut baseline = TextBaseline::Top;
        let mut displaced = false;

        match (threshold_style, min_show) {
            (ThresholdStyle::BaselineFlip, Some(min_show)) if primary < min_show => {
                baseline = TextBaseline::Bottom;
                nudge_y = -options.y_offset + alignment.y.pixel_nudge(units)
                    + OUTSIDE_LABEL_PADDING_PX;
                displaced = true;
            }
            (ThresholdStyle::OutwardShift, Some(min_show)) if primary >= min_show => {
                // Outer end of the bar; for a stacked series, of its own segment.
                set_length(&mut point, orientation, primary);
                align = TextAlign::Right;
                nudge_x -= OUTSIDE_LABEL_PADDING_PX;
                displaced = true;
            }
            _ => {}
        }

        let pixel = mapper.data_to_pixel(point)?;
        let label = PlacedLabel {
            index: record.index,
            value,
            text: options.format_value(value),
            x: pixel.left + offset.left + nudge_x,
            y: pixel.top + offset.top + nudge_y,
            align,
            baseline,
            displaced,
        };
        trace!(
            index = label.index,
            text = %label.text,
            x = label.x,
            y = label.y,
            displaced,
            "placed bar label"
        );
        labels.push(label);
    }

    Ok(labels)
}

fn set_length(point: &mut DataPoint, orientation: BarOrientation, value: f64) {
    match orientation {
        BarOrientation::Horizontal => point.x = value,
        BarOrientation::Vertical => point.y = value,
    }
}
