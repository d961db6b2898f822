//! Lay a series out across the chart's half-columns.
//!
//! Every braille cell is two dots wide, so a chart `x_chars` wide has
//! `x_chars * 2` half-columns.  Each one receives the min/max of whatever
//! falls into it:
//! * `Style::Line` - linear interpolation sampled at half-column centres
//!   between the first and last point, plus every real point in its own
//!   half-column so checkpoints are never skipped.
//! * `Style::Bars` - every half-column whose centre lies under `x ± width/2`
//!   spans the bar; a bar narrower than a half-column still gets one.

use crate::{
    core::{constants::BRAILLE_HORIZONTAL_RESOLUTION as HR, data::PlotPoint},
    render::chart::{ChartConfig, Series, Style},
};

/// Extrema of one half-column, in data units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bucket {
    pub min: f64,
    pub max: f64,
}

impl Bucket {
    #[inline]
    fn merge(slot: &mut Option<Self>, min: f64, max: f64) {
        *slot = Some(match *slot {
            Some(b) => Self {
                min: b.min.min(min),
                max: b.max.max(max),
            },
            None => Self { min, max },
        });
    }
}

/// Half-column geometry for one chart.
#[derive(Clone, Copy, Debug)]
struct Columns {
    count: usize,
    x_min: f64,
    span: f64,
}

impl Columns {
    fn of(cfg: &ChartConfig) -> Self {
        Self {
            count: cfg.x_chars * HR,
            x_min: cfg.x_min,
            span: cfg.x_max - cfg.x_min,
        }
    }

    /// Half-column holding `x`, clamped to the plot.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn index(self, x: f64) -> usize {
        let r = ((x - self.x_min) / self.span).clamp(0.0, 1.0) * self.count as f64;
        (r.floor() as usize).min(self.count - 1)
    }

    #[allow(clippy::cast_precision_loss)]
    fn centre(self, i: usize) -> f64 {
        self.x_min + (i as f64 + 0.5) / self.count as f64 * self.span
    }
}

/// One slot per half-column; `None` where the series draws nothing.
#[must_use]
pub fn bin(series: &Series, cfg: &ChartConfig) -> Vec<Option<Bucket>> {
    let cols = Columns::of(cfg);
    let mut out = vec![None; cols.count];
    if cols.count == 0 {
        return out;
    }

    let mut pts: Vec<PlotPoint> = series
        .points
        .iter()
        .copied()
        .filter(PlotPoint::is_finite)
        .collect();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x));

    match series.style {
        Style::Line => bin_line(&pts, cols, &mut out),
        Style::Bars { width } => bin_bars(&pts, width, cols, &mut out),
    }
    out
}

fn bin_line(pts: &[PlotPoint], cols: Columns, out: &mut [Option<Bucket>]) {
    let (Some(first), Some(last)) = (pts.first(), pts.last()) else {
        return;
    };

    let mut seg = 0;
    for (i, slot) in out.iter_mut().enumerate() {
        let x = cols.centre(i);
        if x < first.x || x > last.x {
            continue;
        }
        while seg + 1 < pts.len() - 1 && pts[seg + 1].x < x {
            seg += 1;
        }
        let (a, b) = (pts[seg], pts[(seg + 1).min(pts.len() - 1)]);
        let y = if b.x > a.x {
            let t = (x - a.x) / (b.x - a.x);
            a.max + t * (b.max - a.max)
        } else {
            a.max
        };
        Bucket::merge(slot, y, y);
    }

    for p in pts {
        Bucket::merge(&mut out[cols.index(p.x)], p.min, p.max);
    }
}

fn bin_bars(pts: &[PlotPoint], width: f64, cols: Columns, out: &mut [Option<Bucket>]) {
    let half = width.abs() / 2.0;
    for p in pts {
        let (mut lo, mut hi) = (cols.index(p.x - half), cols.index(p.x + half));
        // edge columns count only if the bar reaches their centre
        if lo < hi && cols.centre(lo) < p.x - half {
            lo += 1;
        }
        if lo < hi && cols.centre(hi) > p.x + half {
            hi -= 1;
        }
        for slot in &mut out[lo..=hi] {
            Bucket::merge(slot, p.min, p.max);
        }
    }
}
