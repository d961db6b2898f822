//! Geometry helpers: axis ranges + terminal size plumbing.

use terminal_size::{Height, Width, terminal_size};

use crate::core::{
    constants::{BORDER_WIDTH, LABEL_GUTTER, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH},
    data::PlotPoint,
};

/// Which axis we’re measuring.
#[derive(Clone, Copy, Debug)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Inclusive bounds without any padding.
    ///
    /// * If the series is empty or contains only non-finite values the
    ///   fallback is `(0.0, 1.0)`.
    /// * If *all* finite points are identical we expand by +-0.5 so the graph
    ///   still has non-zero height/width.
    #[must_use]
    pub fn bounds<'a>(self, points: impl IntoIterator<Item = &'a PlotPoint>) -> (f64, f64) {
        let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);

        for p in points.into_iter().filter(|p| p.is_finite()) {
            match self {
                Self::X => {
                    low = low.min(p.x);
                    high = high.max(p.x);
                }
                Self::Y => {
                    low = low.min(p.min);
                    high = high.max(p.max);
                }
            }
        }

        if !low.is_finite() || !high.is_finite() {
            return (0.0, 1.0);
        }

        // Degenerate (flat-line) series - give it some breathing room.
        if (high - low).abs() < f64::EPSILON {
            return (low - 0.5, high + 0.5);
        }

        (low, high)
    }

    /// Bounds widened to whole decades, for log10-valued series.
    #[must_use]
    pub fn decade_bounds<'a>(self, points: impl IntoIterator<Item = &'a PlotPoint>) -> (f64, f64) {
        let (low, high) = self.bounds(points);
        let (low, high) = (low.floor(), high.ceil());
        if high - low < 1.0 {
            (low - 1.0, high + 1.0)
        } else {
            (low, high)
        }
    }
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Plot area for one chart panel in a terminal of the given size, leaving
/// space for borders, y labels of up to `label_width` characters and the
/// legend/tick rows.
#[inline]
#[must_use]
pub fn panel_dims((w, h): (Width, Height), label_width: usize) -> (usize, usize) {
    let x_chars = usize::from(w.0)
        .saturating_sub(BORDER_WIDTH + LABEL_GUTTER + label_width + 1)
        .max(MIN_GRAPH_WIDTH);
    let y_chars = usize::from(h.0).saturating_sub(9).max(MIN_GRAPH_HEIGHT);
    (x_chars, y_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_bounds_span_min_and_max() {
        let pts = [PlotPoint::bar(1.0, 0.0, 4.0), PlotPoint::at(2.0, 7.0)];
        assert_eq!(Axis::Y.bounds(&pts), (0.0, 7.0));
        assert_eq!(Axis::X.bounds(&pts), (1.0, 2.0));
    }

    #[test]
    fn flat_and_empty_series_get_room() {
        assert_eq!(Axis::Y.bounds(&[PlotPoint::at(0.0, 3.0)]), (2.5, 3.5));
        assert_eq!(Axis::Y.bounds(&Vec::<PlotPoint>::new()), (0.0, 1.0));
        assert_eq!(Axis::Y.bounds(&[PlotPoint::at(0.0, f64::NAN)]), (0.0, 1.0));
    }

    #[test]
    fn decades() {
        let pts = [PlotPoint::at(0.0, -17.97), PlotPoint::at(1.0, -97.4)];
        assert_eq!(Axis::Y.decade_bounds(&pts), (-98.0, -17.0));
        assert_eq!(Axis::Y.decade_bounds(&[PlotPoint::at(0.0, -5.0)]), (-6.0, -4.0));
    }

    #[test]
    fn panels_never_shrink_below_minimum() {
        assert_eq!(panel_dims((Width(10), Height(5)), 6), (MIN_GRAPH_WIDTH, MIN_GRAPH_HEIGHT));
        assert_eq!(panel_dims((Width(100), Height(40)), 6), (90, 31));
    }
}
