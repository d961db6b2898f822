//! Plot-space samples handed to the chart renderer.

/// One x position with a vertical extent.  Line samples have `min == max`;
/// bars run from the baseline to the value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub min: f64,
    pub max: f64,
}

impl PlotPoint {
    #[inline]
    #[must_use]
    pub const fn at(x: f64, y: f64) -> Self {
        Self { x, min: y, max: y }
    }

    #[inline]
    #[must_use]
    pub fn bar(x: f64, base: f64, top: f64) -> Self {
        Self {
            x,
            min: base.min(top),
            max: base.max(top),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.min.is_finite() && self.max.is_finite()
    }
}
