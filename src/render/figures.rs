//! The two charts of an analysis run: the four-panel error figure and the
//! digit figure.  Both come back as text; `save` writes them out.

use std::{fs, path::Path};

use tracing::debug;

use crate::{
    core::{
        analysis::{Analysis, ErrorSeries, Verdict},
        bounds::{Axis, panel_dims, terminal_geometry},
        color::AnsiCode,
        constants::{FILE_DIGIT_HEIGHT, FILE_GRAPH_WIDTH, FILE_PANEL_HEIGHT},
        data::PlotPoint,
        error::RenderError,
    },
    render::{
        chart::{ChartConfig, ChartConfigBuilder, Scale, Series},
        frame::render,
    },
};

/// Widest y label any panel uses ("Rounding").
const LABEL_ALLOWANCE: usize = 8;
/// Gap between the two bars of one checkpoint group.
const GROUP_OFFSET: f64 = 0.175;
const GROUP_BAR_WIDTH: f64 = 0.35;
const DIGIT_BAR_WIDTH: f64 = 0.8;
const DIGIT_Y_MAX: f64 = 12.0;

pub const SUPTITLE: &str = "Pi Precision Analysis: Truncation vs Rounding";
pub const SUPTITLE_FORMULA: &str = "Using Surface Area of Sphere (A = 4πr²)";

/// Size and palette of the rendered figures.
#[derive(Clone, Copy, Debug)]
pub struct FigureOptions {
    pub x_chars: usize,
    pub panel_height: usize,
    pub digit_height: usize,
    pub colored: bool,
    pub truncation: AnsiCode,
    pub rounding: AnsiCode,
    pub digits: AnsiCode,
    pub highlight: AnsiCode,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self::file()
    }
}

impl FigureOptions {
    /// Fixed geometry, no colour: what goes into the chart files.
    #[must_use]
    pub fn file() -> Self {
        Self {
            x_chars: FILE_GRAPH_WIDTH,
            panel_height: FILE_PANEL_HEIGHT,
            digit_height: FILE_DIGIT_HEIGHT,
            colored: false,
            truncation: AnsiCode::red(),
            rounding: AnsiCode::blue(),
            digits: AnsiCode::light_blue(),
            highlight: AnsiCode::orange(),
        }
    }

    /// Sized to the current terminal, coloured.
    #[must_use]
    pub fn terminal() -> Self {
        let (x_chars, y_chars) = panel_dims(terminal_geometry(), LABEL_ALLOWANCE);
        Self {
            x_chars,
            panel_height: y_chars.min(FILE_PANEL_HEIGHT),
            digit_height: y_chars.min(FILE_DIGIT_HEIGHT),
            colored: true,
            ..Self::file()
        }
    }

    #[inline]
    fn paint(&self, c: AnsiCode) -> AnsiCode {
        c.when(self.colored)
    }
}

/// Builder for one panel of the error figure.
fn panel(opts: &FigureOptions) -> ChartConfigBuilder {
    ChartConfig::builder(opts.x_chars, opts.panel_height).color(opts.paint(AnsiCode::cyan()))
}

#[allow(clippy::cast_precision_loss)]
fn index_x(i: usize) -> f64 {
    i as f64
}

/// Log10 errors per strategy; zero errors have no logarithm and are left out.
fn log_points(series: &ErrorSeries) -> (Vec<PlotPoint>, Vec<PlotPoint>) {
    let points = |errors: &[Option<f64>]| -> Vec<PlotPoint> {
        series
            .checkpoints
            .iter()
            .zip(errors)
            .filter_map(|(&d, e)| e.map(|y| PlotPoint::at(f64::from(d), y)))
            .collect()
    };
    (points(series.truncated.as_slice()), points(series.rounded.as_slice()))
}

fn checkpoint_ticks(
    mut b: ChartConfigBuilder,
    analysis: &Analysis,
    categorical: bool,
) -> ChartConfigBuilder {
    for (i, s) in analysis.samples.iter().enumerate() {
        b = if categorical {
            b.x_tick(index_x(i), format!("{} places", s.decimals))
        } else {
            b.x_tick(f64::from(s.decimals), s.decimals.to_string())
        };
    }
    b
}

/// X range spanning the checkpoints themselves.
fn checkpoint_range(analysis: &Analysis) -> (f64, f64) {
    let xs: Vec<PlotPoint> = analysis
        .samples
        .iter()
        .map(|s| PlotPoint::at(f64::from(s.decimals), 0.0))
        .collect();
    Axis::X.bounds(&xs)
}

fn categorical_range(n: usize) -> (f64, f64) {
    (-0.5, index_x(n) - 0.5)
}

/// Panel 1: error against decimal places, one line per strategy.
fn error_lines(
    analysis: &Analysis,
    series: &ErrorSeries,
    opts: &FigureOptions,
) -> Result<String, RenderError> {
    let (truncated, rounded) = log_points(series);
    let (y_min, y_max) = Axis::Y.decade_bounds(truncated.iter().chain(&rounded));
    let (x_min, x_max) = checkpoint_range(analysis);

    let cfg = checkpoint_ticks(panel(opts), analysis, false)
    .title("Error in Surface Area Calculation")
    .subtitle("x: decimal places of π   y: absolute error in m² (log scale)")
    .y_range(y_min..=y_max)
    .x_range(x_min, x_max)
    .scale(Scale::Log10)
    .build()?;

    render(
        &cfg,
        &[
            Series::line("Truncation", opts.paint(opts.truncation), truncated),
            Series::line("Rounding", opts.paint(opts.rounding), rounded),
        ],
    )
}

/// Panel 2: grouped bars, truncation left and rounding right.
fn error_bars(
    analysis: &Analysis,
    series: &ErrorSeries,
    opts: &FigureOptions,
) -> Result<String, RenderError> {
    let (truncated, rounded) = log_points(series);
    let (low, y_max) = Axis::Y.decade_bounds(truncated.iter().chain(&rounded));
    // one extra decade so the smallest bar stays visible
    let y_min = low - 1.0;

    let mut left = Vec::new();
    let mut right = Vec::new();
    for (i, (t, r)) in series.truncated.iter().zip(&series.rounded).enumerate() {
        let x = index_x(i);
        if let Some(y) = *t {
            left.push(PlotPoint::bar(x - GROUP_OFFSET, y_min, y));
        }
        if let Some(y) = *r {
            right.push(PlotPoint::bar(x + GROUP_OFFSET, y_min, y));
        }
    }

    let (x_min, x_max) = categorical_range(analysis.samples.len());
    let cfg = checkpoint_ticks(panel(opts), analysis, true)
    .title("Direct Error Comparison")
    .subtitle("absolute error in m² (log scale)")
    .y_range(y_min..=y_max)
    .x_range(x_min, x_max)
    .scale(Scale::Log10)
    .build()?;

    render(
        &cfg,
        &[
            Series::bars("Truncation", opts.paint(opts.truncation), GROUP_BAR_WIDTH, left),
            Series::bars("Rounding", opts.paint(opts.rounding), GROUP_BAR_WIDTH, right),
        ],
    )
}

/// Panel 3: `|errT − errR|`; exact ties have no logarithm and are listed in
/// the subtitle instead.
fn difference_line(analysis: &Analysis, opts: &FigureOptions) -> Result<String, RenderError> {
    let mut points = Vec::new();
    let mut ties = Vec::new();
    for s in &analysis.samples {
        match s.difference().log10() {
            Some(y) => points.push(PlotPoint::at(f64::from(s.decimals), y)),
            None => ties.push(s.decimals.to_string()),
        }
    }

    let (y_min, y_max) = Axis::Y.decade_bounds(&points);
    let (x_min, x_max) = checkpoint_range(analysis);
    let subtitle = if ties.is_empty() {
        "|truncation error − rounding error| in m² (log scale)".to_owned()
    } else {
        format!("zero difference (tie) omitted at: {}", ties.join(", "))
    };

    let cfg = checkpoint_ticks(panel(opts), analysis, false)
    .title("Absolute Difference Between Methods")
    .subtitle(subtitle)
    .y_range(y_min..=y_max)
    .x_range(x_min, x_max)
    .scale(Scale::Log10)
    .build()?;

    render(
        &cfg,
        &[Series::line("|Difference|", opts.paint(AnsiCode::purple()), points)],
    )
}

/// Panel 4: one bar per checkpoint; its height names the winner.
fn verdict_bars(analysis: &Analysis, opts: &FigureOptions) -> Result<String, RenderError> {
    let mut truncation = Vec::new();
    let mut rounding = Vec::new();
    let mut tie = Vec::new();
    for (i, s) in analysis.samples.iter().enumerate() {
        let x = index_x(i);
        match s.verdict() {
            Verdict::TruncationBetter => truncation.push(PlotPoint::bar(x, 0.0, 1.0)),
            Verdict::RoundingBetter => rounding.push(PlotPoint::bar(x, 0.0, 2.0)),
            Verdict::Tie => tie.push(PlotPoint::bar(x, 0.0, 0.5)),
        }
    }

    let (x_min, x_max) = categorical_range(analysis.samples.len());
    let cfg = checkpoint_ticks(panel(opts), analysis, true)
    .title("Which Method is More Accurate?")
    .subtitle("height 1 = Truncation, 2 = Rounding, short bar = Tie")
    .y_range(0.0..=2.0)
    .y_labels("Tie", "Rounding")
    .x_range(x_min, x_max)
    .build()?;

    let series: Vec<Series> = [
        ("Truncation", opts.truncation, truncation),
        ("Rounding", opts.rounding, rounding),
        ("Tie", AnsiCode::gray(), tie),
    ]
    .into_iter()
    .filter(|(_, _, pts)| !pts.is_empty())
    .map(|(label, color, pts)| Series::bars(label, opts.paint(color), GROUP_BAR_WIDTH, pts))
    .collect();

    render(&cfg, &series)
}

/// The four-panel error figure, stacked vertically under a shared heading.
pub fn error_analysis(analysis: &Analysis, opts: &FigureOptions) -> Result<String, RenderError> {
    if analysis.samples.is_empty() {
        return Err(RenderError::EmptyData);
    }

    let series = analysis.error_series();
    let panels = [
        error_lines(analysis, &series, opts)?,
        error_bars(analysis, &series, opts)?,
        difference_line(analysis, opts)?,
        verdict_bars(analysis, opts)?,
    ];

    let mut out = format!("{SUPTITLE}\n{SUPTITLE_FORMULA}\n");
    for panel in &panels {
        out.push('\n');
        out.push_str(panel);
    }
    debug!(bytes = out.len(), "error figure rendered");
    Ok(out)
}

/// Bars of `digits` (decimal places 1, 2, ...), with the 1-based positions in
/// `highlights` drawn in the highlight colour and labelled `"{pos}th:{digit}"`.
pub fn digit_chart(
    digits: &[u8],
    highlights: &[u32],
    opts: &FigureOptions,
) -> Result<String, RenderError> {
    if digits.is_empty() {
        return Err(RenderError::EmptyData);
    }

    let is_highlight = |pos: usize| highlights.iter().any(|&h| h as usize == pos);

    let mut plain = Vec::with_capacity(digits.len());
    let mut marked = Vec::new();
    for (i, &d) in digits.iter().enumerate() {
        let pos = i + 1;
        let bar = PlotPoint::bar(index_x(pos), 0.0, f64::from(d));
        if is_highlight(pos) {
            marked.push(bar);
        } else {
            plain.push(bar);
        }
    }

    let shown: Vec<u32> = highlights
        .iter()
        .copied()
        .filter(|&h| h >= 1 && (h as usize) <= digits.len())
        .collect();

    let mut b = ChartConfig::builder(opts.x_chars, opts.digit_height)
        .color(opts.paint(AnsiCode::cyan()))
        .title(format!("First {} Decimal Digits of Pi", digits.len()))
        .y_range(0.0..=DIGIT_Y_MAX)
        .y_labels("0", "12")
        .x_range(0.5, index_x(digits.len()) + 0.5);
    for &h in &shown {
        let d = digits[h as usize - 1];
        b = b.x_tick(f64::from(h), format!("{h}th:{d}"));
    }
    if !shown.is_empty() {
        let list: Vec<String> = shown.iter().map(u32::to_string).collect();
        b = b.subtitle(format!("highlighted decimal places: {}", list.join(", ")));
    }
    let cfg = b.build()?;

    render(
        &cfg,
        &[
            Series::bars("Digit", opts.paint(opts.digits), DIGIT_BAR_WIDTH, plain),
            Series::bars("Checkpoint", opts.paint(opts.highlight), DIGIT_BAR_WIDTH, marked),
        ],
    )
}

/// Write a rendered figure to `path`.
pub fn save(path: &Path, contents: &str) -> Result<(), RenderError> {
    fs::write(path, contents).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{analysis::analyze, config::RunConfig};
    use rstest::{fixture, rstest};

    #[fixture]
    fn standard() -> Analysis {
        analyze(&RunConfig::standard().unwrap()).unwrap()
    }

    #[rstest]
    fn error_figure_has_all_panels(standard: Analysis) {
        let fig = error_analysis(&standard, &FigureOptions::file()).unwrap();
        assert!(fig.starts_with(SUPTITLE));
        for title in [
            "Error in Surface Area Calculation",
            "Direct Error Comparison",
            "Absolute Difference Between Methods",
            "Which Method is More Accurate?",
        ] {
            assert!(fig.contains(title), "missing {title}");
        }
        assert!(!fig.contains('\x1b'));
    }

    #[rstest]
    fn tie_is_noted_in_difference_panel(standard: Analysis) {
        // the 20-place cut is a tie in the standard run
        let fig = error_analysis(&standard, &FigureOptions::file()).unwrap();
        assert!(fig.contains("zero difference (tie) omitted at: 20"));
        assert!(fig.contains("■ Tie"));
    }

    #[test]
    fn log_points_skip_zero_errors() {
        let series = ErrorSeries {
            checkpoints: vec![1, 5, 10],
            truncated: vec![Some(-1.0), None, Some(-9.5)],
            rounded: vec![Some(-2.0), Some(-6.0), Some(-10.0)],
        };
        let (truncated, rounded) = log_points(&series);
        let xs: Vec<f64> = truncated.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 10.0]);
        assert_eq!(rounded.len(), 3);
        assert!((rounded[1].max - (-6.0)).abs() < 1e-12);
    }

    #[rstest]
    fn digit_figure_labels_checkpoints(standard: Analysis) {
        let digits = standard.digits(110);
        let fig = digit_chart(&digits, &[20, 40, 60, 100], &FigureOptions::file()).unwrap();
        assert!(fig.contains("First 110 Decimal Digits of Pi"));
        for tick in ["20th:6", "40th:1", "60th:4", "100th:9"] {
            assert!(fig.contains(tick), "missing {tick}");
        }
    }

    #[test]
    fn out_of_range_highlights_are_ignored() {
        let fig = digit_chart(&[1, 4, 1, 5, 9], &[3, 50], &FigureOptions::file()).unwrap();
        assert!(fig.contains("3th:1"));
        assert!(!fig.contains("50th"));
        assert!(fig.contains("highlighted decimal places: 3 "));
    }

    #[test]
    fn coloured_figure_uses_escapes() {
        let opts = FigureOptions {
            colored: true,
            ..FigureOptions::file()
        };
        let fig = digit_chart(&[1, 4, 1, 5, 9], &[2], &opts).unwrap();
        assert!(fig.contains(AnsiCode::orange().as_str()));
    }

    #[test]
    fn empty_digits_are_rejected() {
        assert!(matches!(
            digit_chart(&[], &[], &FigureOptions::file()),
            Err(RenderError::EmptyData)
        ));
    }

    #[test]
    fn save_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let ok = dir.path().join("chart.txt");
        save(&ok, "⣿").unwrap();
        assert_eq!(fs::read_to_string(&ok).unwrap(), "⣿");

        let bad = dir.path().join("missing").join("chart.txt");
        let err = save(&bad, "x").unwrap_err();
        assert!(matches!(err, RenderError::Write { ref path, .. } if *path == bad));
    }
}
