//! Framed braille chart as a `String`:
//! - box chrome with centred title (top) and subtitle (bottom)
//! - y labels on the first and last plot rows
//! - optional x tick row and a colour legend
//!
//! Colour escapes are emitted only when the series colour changes along a
//! row, so `Plain` series produce plain UTF-8.

use std::fmt::Write as _;

use crate::{
    core::{
        color::{AnsiCode, colorize},
        constants::{LABEL_GUTTER, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH},
        error::RenderError,
    },
    render::{
        binner::bin,
        braille::{BraillePlot, glyph, preprocess_to_braille},
        chart::{ChartConfig, Series, Style},
    },
};

/// Two spaces in front, one space behind
const TITLE_PADDING: usize = 3;

// Box-drawing glyphs
const TL: &str = "┌";
const TR: &str = "┐";
const BL: &str = "└";
const BR: &str = "┘";
const H: &str = "─";
const V: &str = "│";

const LEGEND_MARK: &str = "■";

// --- Helpers ---

/// Write centred colored text between horizontal rules; text wider than the
/// rule is cut short with an ellipsis.
fn push_centered(buf: &mut String, text: &str, width: usize, color: &AnsiCode) {
    let inner = width.saturating_sub(TITLE_PADDING);
    if text.is_empty() || inner == 0 {
        buf.push_str(&H.repeat(width));
        return;
    }
    let text: String = if text.chars().count() > inner {
        text.chars().take(inner - 1).chain(std::iter::once('…')).collect()
    } else {
        text.to_owned()
    };
    let len = text.chars().count();
    let pad_left = (inner - len) / 2;
    let pad_right = inner - len - pad_left;

    buf.push_str(&H.repeat(pad_left));
    buf.push_str("  "); // 2-char left padding
    buf.push_str(&colorize(color, &text));
    buf.push(' '); // 1-char right padding
    buf.push_str(&H.repeat(pad_right));
}

fn push_row(buf: &mut String, body: &str) {
    buf.push_str(V);
    buf.push_str(body);
    buf.push_str(V);
    buf.push('\n');
}

/// One row of braille cells.  Overlapping series OR their dots; the first
/// series with a dot in the cell owns its colour.
fn push_cells(buf: &mut String, plots: &[(AnsiCode, BraillePlot)], row: usize, x_chars: usize) {
    let mut active = AnsiCode::plain();
    for col in 0..x_chars {
        let mut mask = 0u8;
        let mut color = active;
        for (c, plot) in plots {
            let m = plot.mask(row, col);
            if m != 0 && mask == 0 {
                color = *c;
            }
            mask |= m;
        }
        if mask != 0 && color != active {
            if color.is_plain() {
                buf.push_str(AnsiCode::reset().as_str());
            } else {
                buf.push_str(color.as_str());
            }
            active = color;
        }
        buf.push(glyph(mask));
    }
    if !active.is_plain() {
        buf.push_str(AnsiCode::reset().as_str());
    }
}

/// Tick labels centred under their x positions; a label that would overlap
/// its left neighbour is dropped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn tick_line(cfg: &ChartConfig) -> String {
    let width = cfg.x_chars;
    let span = cfg.x_max - cfg.x_min;
    let mut line = vec![' '; width];
    let mut next_free = 0usize;

    for (x, label) in &cfg.x_ticks {
        let chars: Vec<char> = label.chars().collect();
        if chars.is_empty() || chars.len() > width {
            continue;
        }
        let centre = (((x - cfg.x_min) / span).clamp(0.0, 1.0) * width as f64).floor() as usize;
        let start = centre
            .min(width - 1)
            .saturating_sub(chars.len() / 2)
            .min(width - chars.len());
        if start < next_free {
            continue;
        }
        line[start..start + chars.len()].copy_from_slice(&chars);
        next_free = start + chars.len() + 1;
    }
    line.into_iter().collect()
}

fn legend(series: &[Series]) -> Option<String> {
    let entries: Vec<String> = series
        .iter()
        .filter(|s| !s.label.is_empty())
        .map(|s| format!("{} {}", colorize(&s.color, LEGEND_MARK), s.label))
        .collect();
    (!entries.is_empty()).then(|| format!("  {}", entries.join("   ")))
}

/// Draw `series` into a framed chart.
pub fn render(cfg: &ChartConfig, series: &[Series]) -> Result<String, RenderError> {
    if cfg.x_chars < MIN_GRAPH_WIDTH || cfg.y_chars < MIN_GRAPH_HEIGHT {
        return Err(RenderError::GraphTooSmall {
            want_w: MIN_GRAPH_WIDTH,
            want_h: MIN_GRAPH_HEIGHT,
            got_w: cfg.x_chars,
            got_h: cfg.y_chars,
        });
    }
    if series.is_empty() {
        return Err(RenderError::EmptyData);
    }

    let plots: Vec<(AnsiCode, BraillePlot)> = series
        .iter()
        .map(|s| {
            let bridge = matches!(s.style, Style::Line);
            (s.color, preprocess_to_braille(&bin(s, cfg), cfg, bridge))
        })
        .collect();

    let (low, high) = cfg.y_labels();
    let label_width = cfg.label_width();
    let inner = label_width + LABEL_GUTTER + cfg.x_chars;
    let gutter = " ".repeat(LABEL_GUTTER);
    let blank = " ".repeat(inner);

    // 3 bytes per braille glyph, plus chrome
    let mut out = String::with_capacity((inner * 3 + 8) * (cfg.y_chars + 6));

    // --- top ---
    out.push_str(TL);
    push_centered(&mut out, &cfg.title, inner, &cfg.color);
    out.push_str(TR);
    out.push('\n');
    push_row(&mut out, &blank);

    // --- plot rows ---
    let last = cfg.y_chars - 1;
    for row in 0..cfg.y_chars {
        let label = match row {
            0 => high.as_str(),
            r if r == last => low.as_str(),
            _ => "",
        };
        out.push_str(V);
        let _ = write!(out, "{label:>label_width$}{gutter}");
        push_cells(&mut out, &plots, row, cfg.x_chars);
        out.push_str(V);
        out.push('\n');
    }

    // --- x ticks ---
    if !cfg.x_ticks.is_empty() {
        let ticks = tick_line(cfg);
        push_row(&mut out, &format!("{:label_width$}{gutter}{ticks}", ""));
    }

    // --- bottom ---
    push_row(&mut out, &blank);
    out.push_str(BL);
    match &cfg.subtitle {
        Some(sub) => push_centered(&mut out, sub, inner, &cfg.color),
        None => out.push_str(&H.repeat(inner)),
    }
    out.push_str(BR);
    out.push('\n');

    if let Some(line) = legend(series) {
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::PlotPoint;

    fn cfg() -> ChartConfig {
        ChartConfig::builder(20, 8)
            .title("Demo")
            .subtitle("below")
            .y_range(0.0..=10.0)
            .x_range(0.0, 10.0)
            .x_tick(0.0, "a")
            .x_tick(10.0, "end")
            .build()
            .unwrap()
    }

    fn ramp(color: AnsiCode) -> Series {
        Series::line(
            "ramp",
            color,
            vec![PlotPoint::at(0.0, 0.0), PlotPoint::at(10.0, 10.0)],
        )
    }

    #[test]
    fn frame_lines_have_equal_width() {
        let out = render(&cfg(), &[ramp(AnsiCode::plain())]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        // top, blank, 8 rows, ticks, blank, bottom, legend
        assert_eq!(lines.len(), 14);
        let width = lines[0].chars().count();
        for line in &lines[..13] {
            assert_eq!(line.chars().count(), width, "{line}");
        }
        assert!(lines[0].contains("Demo"));
        assert!(lines[12].contains("below"));
        assert_eq!(lines[13], "  ■ ramp");
    }

    #[test]
    fn labels_sit_on_first_and_last_rows() {
        let out = render(&cfg(), &[ramp(AnsiCode::plain())]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].starts_with("│10.0 "));
        assert!(lines[9].starts_with("│ 0.0 "));
        assert!(lines[10].contains('a') && lines[10].contains("end"));
    }

    #[test]
    fn plain_output_has_no_escapes() {
        let out = render(&cfg(), &[ramp(AnsiCode::plain())]).unwrap();
        assert!(!out.contains('\x1b'));
        // the ramp touches both corners of the plot
        let lines: Vec<&str> = out.lines().collect();
        assert_ne!(lines[2].chars().rev().nth(1), Some('\u{2800}'));
        assert_ne!(lines[9].chars().nth(6), Some('\u{2800}'));
    }

    #[test]
    fn colored_rows_are_reset() {
        let out = render(&cfg(), &[ramp(AnsiCode::red())]).unwrap();
        assert!(out.contains("\x1b[31m"));
        for line in out.lines().skip(2).take(8) {
            assert_eq!(line.matches("\x1b[31m").count(), line.matches("\x1b[0m").count());
        }
    }

    #[test]
    fn long_subtitle_is_cut_with_ellipsis() {
        let mut buf = String::new();
        push_centered(&mut buf, "zero difference (tie) omitted at: 20", 12, &AnsiCode::plain());
        assert_eq!(buf, "  zero dif… ");

        let cfg = ChartConfig::builder(20, 8)
            .subtitle("zero difference (tie) omitted at: 20, 40, 60")
            .y_range(0.0..=1.0)
            .x_range(0.0, 10.0)
            .build()
            .unwrap();
        let out = render(&cfg, &[ramp(AnsiCode::plain())]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        let bottom = lines[lines.len() - 2];
        assert!(bottom.contains("zero difference"));
        assert!(bottom.contains('…'));
        assert_eq!(bottom.chars().count(), lines[0].chars().count());
    }

    #[test]
    fn overlapping_ticks_are_dropped() {
        let cfg = ChartConfig::builder(20, 8)
            .y_range(0.0..=1.0)
            .x_range(0.0, 10.0)
            .x_tick(5.0, "first")
            .x_tick(5.5, "second")
            .build()
            .unwrap();
        let line = tick_line(&cfg);
        assert!(line.contains("first"));
        assert!(!line.contains("second"));
        assert_eq!(line.chars().count(), 20);
    }

    #[test]
    fn too_small_and_empty_are_errors() {
        let tiny = ChartConfig::builder(4, 2)
            .y_range(0.0..=1.0)
            .x_range(0.0, 1.0)
            .build()
            .unwrap();
        assert!(matches!(
            render(&tiny, &[ramp(AnsiCode::plain())]),
            Err(RenderError::GraphTooSmall { got_w: 4, got_h: 2, .. })
        ));
        assert!(matches!(render(&cfg(), &[]), Err(RenderError::EmptyData)));
    }
}
