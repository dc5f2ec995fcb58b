//! Equity curve segmentation
//!
//! Splits the capital series into runs of consistent direction so a chart
//! can draw rising stretches and falling stretches in different colours.
//! Neighbouring segments share their boundary point.

use crate::data::BarTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// Capital after a trade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    /// Time of the trade
    pub time: BarTime,
    /// Cumulative capital
    pub value: Decimal,
}

/// Direction of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Last value at or above the first
    Up,
    /// Last value below the first
    Down,
}

impl Trend {
    fn between(from: Decimal, to: Decimal) -> Self {
        if to >= from {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// Run of points with a single direction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquitySegment {
    /// Overall direction, first point to last
    pub trend: Trend,
    /// Points in chronological order
    pub points: Vec<EquityPoint>,
}

impl EquitySegment {
    fn close(points: Vec<EquityPoint>) -> Self {
        let trend = match (points.first(), points.last()) {
            (Some(first), Some(last)) => Trend::between(first.value, last.value),
            _ => Trend::Up,
        };
        Self { trend, points }
    }
}

/// Partition `points` into directional segments
///
/// A segment's trend is established by its first non-zero move. A later move
/// against that trend closes the segment at the previous point and starts a
/// new one anchored there. Flat moves never reverse a segment.
pub fn segment_equity_curve(points: &[EquityPoint]) -> Vec<EquitySegment> {
    let Some(first) = points.first() else {
        return vec![];
    };

    let mut segments = Vec::new();
    let mut current = vec![first.clone()];
    let mut established: Option<Trend> = None;

    for pair in points.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.value != prev.value {
            let local = Trend::between(prev.value, curr.value);
            match established {
                Some(trend) if trend != local => {
                    let finished = std::mem::replace(&mut current, vec![prev.clone()]);
                    segments.push(EquitySegment::close(finished));
                    established = Some(local);
                }
                Some(_) => {}
                None => established = Some(local),
            }
        }

        current.push(curr.clone());
    }

    segments.push(EquitySegment::close(current));
    segments
}
