//! Half-column buckets to braille dots.
//!
//! ### Workflow
//! 1. `preprocess_to_braille` maps data-space buckets into pixel-space
//!    spans (`PixelSpan`), one optional entry per *half* column.  Line
//!    series are bridged so consecutive spans touch.
//! 2. `BraillePlot::mask` returns the 8-dot mask of one character cell,
//!    and `glyph` turns a mask into its U+2800..U+28FF scalar.
//!
//! The intersection of a contiguous vertical range with a 4-pixel braille
//! cell is always one of 11 canonical patterns: full, the two triplets, the
//! three pairs, the four single dots, or empty.  The bit-mask of each is
//! pre-computed for the left and right half-columns.

use crate::{
    core::constants::BRAILLE_VERTICAL_RESOLUTION,
    render::{binner::Bucket, chart::ChartConfig},
};

/// Pixel rows covered inside one half-column; row 0 is the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSpan {
    pub min: usize,
    pub max: usize,
}

#[derive(Clone, Debug)]
pub struct BraillePlot {
    pub steps: Vec<Option<PixelSpan>>,
}

// --- Pre-Computed Masks ---

/// Pattern enumeration (11 entries):
///
/// 0 empty (⠀), 1 full (⡇), 2 top-three (⠇), 3 bottom-three(⡆), 4 top-two (⠃), 5 middle-two (⠆), 6 bottom-two (⡄),
/// 7 dot-zero (⠁), 8 dot-one (⠂), 9 dot-two (⠄), 10 dot-three (⡀)
const LEFT_MASKS: [u8; 11] = [
    0x00, 0x47, 0x07, 0x46, 0x03, 0x06, 0x44, 0x01, 0x02, 0x04, 0x40,
];
/// Pattern enumeration (11 entries):
///
/// 0 empty (⠀), 1 full (⢸), 2 top-three (⠸), 3 bottom-three(⢰), 4 top-two (⠘), 5 middle-two (⠰), 6 bottom-two (⢠),
/// 7 dot-zero (⠈), 8 dot-one (⠐), 9 dot-two (⠠), 10 dot-three (⢀)
const RIGHT_MASKS: [u8; 11] = [
    0x00, 0xB8, 0x38, 0xB0, 0x18, 0x30, 0xA0, 0x08, 0x10, 0x20, 0x80,
];

/// Map `(low, high)` --- pixel offsets inside a 4-row cell --- to the pattern id.
#[inline]
const fn pattern_id(low: usize, high: usize) -> usize {
    match (low, high) {
        (0, 3) => 1,  // full
        (0, 2) => 2,  // top-3
        (1, 3) => 3,  // bottom-3
        (0, 1) => 4,  // top-2
        (1, 2) => 5,  // middle-2
        (2, 3) => 6,  // bottom-2
        (0, 0) => 7,  // single-0
        (1, 1) => 8,  // single-1
        (2, 2) => 9,  // single-2
        (3, 3) => 10, // single-3
        _ => 0,       // empty / no overlap
    }
}

/// Map buckets into pixel space.  `bridge` joins vertically separated
/// neighbours so a line stays connected.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn preprocess_to_braille(
    buckets: &[Option<Bucket>],
    cfg: &ChartConfig,
    bridge: bool,
) -> BraillePlot {
    let vert_px = cfg.y_chars * BRAILLE_VERTICAL_RESOLUTION;
    let y_span = cfg.y_max - cfg.y_min; // > 0 by construction

    // λ : ℝ → [0,vert_px-1]
    let map = |y: f64| -> usize {
        let r = ((y - cfg.y_min) / y_span).clamp(0.0, 1.0) * (vert_px - 1) as f64;
        (vert_px - 1) - r.round() as usize
    };

    let mut steps: Vec<Option<PixelSpan>> = buckets
        .iter()
        .map(|b| {
            b.map(|b| {
                let (lo, hi) = (map(b.max), map(b.min));
                PixelSpan {
                    min: lo.min(hi),
                    max: lo.max(hi),
                }
            })
        })
        .collect();

    if bridge {
        for i in 1..steps.len() {
            let (Some(prev), Some(curr)) = (steps[i - 1], steps[i]) else {
                continue;
            };
            let mut joined = curr;
            if prev.max + 1 < curr.min {
                // previous column sits higher up
                joined.min = prev.max + 1;
            } else if curr.max + 1 < prev.min {
                joined.max = prev.min - 1;
            }
            steps[i] = Some(joined);
        }
    }

    BraillePlot { steps }
}

impl BraillePlot {
    /// Dot mask of the character cell at (`row`, `col`).
    #[must_use]
    pub fn mask(&self, row: usize, col: usize) -> u8 {
        let row_top = row * BRAILLE_VERTICAL_RESOLUTION;
        let row_bottom = row_top + BRAILLE_VERTICAL_RESOLUTION - 1;

        let pattern = |half: usize| -> usize {
            self.steps
                .get(col * 2 + half)
                .copied()
                .flatten()
                .and_then(|s| {
                    if s.max < row_top || s.min > row_bottom {
                        None
                    } else {
                        Some(pattern_id(
                            s.min.max(row_top) - row_top,
                            s.max.min(row_bottom) - row_top,
                        ))
                    }
                })
                .unwrap_or(0)
        };

        LEFT_MASKS[pattern(0)] | RIGHT_MASKS[pattern(1)]
    }
}

/// The braille scalar for `mask`.
/// <https://en.wikipedia.org/wiki/Braille_Patterns>
#[inline]
#[must_use]
pub fn glyph(mask: u8) -> char {
    char::from_u32(0x2800 | u32::from(mask)).unwrap_or(' ')
}
