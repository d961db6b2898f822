//! A collection of constants.

// --- Experiment defaults ---

/// Sphere radius used when none is given (metres).
pub const DEFAULT_RADIUS: u32 = 10;
/// Significant digits of π carried by the arithmetic layer.
pub const DEFAULT_PRECISION: u32 = 150;
/// Decimal places at which truncation and rounding are compared.
pub const DEFAULT_CHECKPOINTS: [u32; 4] = [20, 40, 60, 100];
/// Checkpoints must stay this many digits below the working precision.
pub const SAFETY_MARGIN: u32 = 10;
/// Upper bound on the working precision.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 100_000;
/// Extra digits carried while summing the arctangent series.
pub const GUARD_DIGITS: u32 = 12;

/// Significant digits printed for each error value.
pub const DEFAULT_ERROR_DIGITS: u32 = 30;
/// Decimal digits of π drawn in the digit chart.
pub const DEFAULT_DIGITS_SHOWN: usize = 110;

pub const ERROR_CHART_FILE: &str = "pi_error_analysis.txt";
pub const DIGIT_CHART_FILE: &str = "pi_digits.txt";

// --- Chart geometry ---

/// The left and right border characters
pub const BORDER_WIDTH: usize = 2;
/// One character of space between y axis labels and the plotted data
pub const LABEL_GUTTER: usize = 1;

/// Graph must be at least 7 characters tall
pub const MIN_GRAPH_HEIGHT: usize = 7;
/// Graph must be at least 14 characters wide
pub const MIN_GRAPH_WIDTH: usize = 14;

/// Plot area of charts written to disk.
pub const FILE_GRAPH_WIDTH: usize = 110;
pub const FILE_PANEL_HEIGHT: usize = 12;
pub const FILE_DIGIT_HEIGHT: usize = 16;

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Linear axis labels are rounded to the first decimal place.
///
/// 14.832 becomes 14.8
pub const DECIMAL_PRECISION: usize = 1;
