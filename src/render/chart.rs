//! Chart description: layout parameters + fluent builder, and the series
//! drawn inside.

use crate::core::{
    color::AnsiCode, constants::DECIMAL_PRECISION, data::PlotPoint, error::RenderError,
};

/// How y values map to axis labels.  Log10 series carry exponents as their
/// y values; only the labels change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scale {
    #[default]
    Linear,
    Log10,
}

impl Scale {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn label(self, y: f64) -> String {
        match self {
            Self::Linear => format!("{y:.prec$}", prec = DECIMAL_PRECISION),
            Self::Log10 => format!("1e{}", y.round() as i64),
        }
    }
}

/// How a series occupies half-columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Style {
    /// Interpolated between samples and bridged vertically.
    Line,
    /// One bar per sample, `width` in x units.
    Bars { width: f64 },
}

#[derive(Clone, Debug)]
pub struct Series {
    pub label: String,
    pub color: AnsiCode,
    pub style: Style,
    pub points: Vec<PlotPoint>,
}

impl Series {
    #[must_use]
    pub fn line(label: impl Into<String>, color: AnsiCode, points: Vec<PlotPoint>) -> Self {
        Self {
            label: label.into(),
            color,
            style: Style::Line,
            points,
        }
    }

    #[must_use]
    pub fn bars(
        label: impl Into<String>,
        color: AnsiCode,
        width: f64,
        points: Vec<PlotPoint>,
    ) -> Self {
        Self {
            label: label.into(),
            color,
            style: Style::Bars { width },
            points,
        }
    }
}

/// Immutable parameters handed to the renderer.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub y_min: f64,
    pub y_max: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub x_chars: usize,
    pub y_chars: usize,
    pub scale: Scale,
    /// `(bottom, top)` overrides for the y labels.
    pub y_labels: Option<(String, String)>,
    /// Labels centred under x positions.
    pub x_ticks: Vec<(f64, String)>,
    /// Title/subtitle colour.
    pub color: AnsiCode,
}

impl ChartConfig {
    #[inline]
    #[must_use]
    pub fn builder(x_chars: usize, y_chars: usize) -> ChartConfigBuilder {
        ChartConfigBuilder::new(x_chars, y_chars)
    }

    /// `(bottom, top)` y labels.
    #[must_use]
    pub fn y_labels(&self) -> (String, String) {
        self.y_labels.clone().unwrap_or_else(|| {
            (self.scale.label(self.y_min), self.scale.label(self.y_max))
        })
    }

    #[must_use]
    pub fn label_width(&self) -> usize {
        let (low, high) = self.y_labels();
        low.chars().count().max(high.chars().count())
    }
}

/// Fluent builder with zero allocation until `build`.
#[derive(Debug)]
pub struct ChartConfigBuilder {
    x_chars: usize,
    y_chars: usize,
    title: Option<String>,
    subtitle: Option<String>,
    y_min: Option<f64>,
    y_max: Option<f64>,
    x_range: Option<(f64, f64)>,
    scale: Scale,
    y_labels: Option<(String, String)>,
    x_ticks: Vec<(f64, String)>,
    color: Option<AnsiCode>,
}

impl ChartConfigBuilder {
    pub(crate) fn new(x_chars: usize, y_chars: usize) -> Self {
        Self {
            x_chars,
            y_chars,
            title: None,
            subtitle: None,
            y_min: None,
            y_max: None,
            x_range: None,
            scale: Scale::Linear,
            y_labels: None,
            x_ticks: Vec::new(),
            color: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn subtitle(mut self, s: impl Into<String>) -> Self {
        self.subtitle = Some(s.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn y_range(mut self, r: std::ops::RangeInclusive<f64>) -> Self {
        self.y_min = Some(*r.start());
        self.y_max = Some(*r.end());
        self
    }
    #[inline]
    #[must_use]
    pub fn x_range(mut self, lo: f64, hi: f64) -> Self {
        self.x_range = Some((lo, hi));
        self
    }
    #[inline]
    #[must_use]
    pub fn scale(mut self, s: Scale) -> Self {
        self.scale = s;
        self
    }
    #[inline]
    #[must_use]
    pub fn y_labels(mut self, bottom: impl Into<String>, top: impl Into<String>) -> Self {
        self.y_labels = Some((bottom.into(), top.into()));
        self
    }
    #[inline]
    #[must_use]
    pub fn x_tick(mut self, x: f64, label: impl Into<String>) -> Self {
        self.x_ticks.push((x, label.into()));
        self
    }
    #[inline]
    #[must_use]
    pub fn color(mut self, c: AnsiCode) -> Self {
        self.color = Some(c);
        self
    }

    pub fn build(self) -> Result<ChartConfig, RenderError> {
        let y_min = self.y_min.ok_or(RenderError::MissingField("y_min"))?;
        let y_max = self.y_max.ok_or(RenderError::MissingField("y_max"))?;
        let (x_min, x_max) = self.x_range.ok_or(RenderError::MissingField("x_range"))?;
        for (low, high) in [(y_min, y_max), (x_min, x_max)] {
            if !(low < high) {
                return Err(RenderError::InvalidRange { low, high });
            }
        }
        Ok(ChartConfig {
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle,
            y_min,
            y_max,
            x_min,
            x_max,
            x_chars: self.x_chars,
            y_chars: self.y_chars,
            scale: self.scale,
            y_labels: self.y_labels,
            x_ticks: self.x_ticks,
            color: self.color.unwrap_or_else(AnsiCode::plain),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let cfg = ChartConfig::builder(40, 10)
            .y_range(-20.0..=-17.0)
            .x_range(0.0, 100.0)
            .scale(Scale::Log10)
            .build()
            .unwrap();
        assert_eq!(cfg.title, "");
        assert_eq!(cfg.y_labels(), ("1e-20".to_owned(), "1e-17".to_owned()));
        assert_eq!(cfg.label_width(), 5);
        assert!(cfg.color.is_plain());
    }

    #[test]
    fn linear_labels_use_one_decimal() {
        assert_eq!(Scale::Linear.label(12.0), "12.0");
        assert_eq!(Scale::Linear.label(0.04), "0.0");
    }

    #[test]
    fn label_override_wins() {
        let cfg = ChartConfig::builder(40, 10)
            .y_range(0.0..=2.0)
            .x_range(0.0, 1.0)
            .y_labels("Tie", "Rounding")
            .build()
            .unwrap();
        assert_eq!(cfg.label_width(), 8);
    }

    #[test]
    fn rejects_missing_and_inverted_ranges() {
        let missing = ChartConfig::builder(40, 10).x_range(0.0, 1.0).build();
        assert!(matches!(missing, Err(RenderError::MissingField("y_min"))));

        let inverted = ChartConfig::builder(40, 10)
            .y_range(1.0..=0.0)
            .x_range(0.0, 1.0)
            .build();
        assert!(matches!(inverted, Err(RenderError::InvalidRange { .. })));

        let nan = ChartConfig::builder(40, 10)
            .y_range(0.0..=1.0)
            .x_range(f64::NAN, 1.0)
            .build();
        assert!(matches!(nan, Err(RenderError::InvalidRange { .. })));
    }
}
