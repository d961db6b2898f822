//! Presentation layer: the text report and the braille charts.

pub mod binner;
pub mod braille;
pub mod chart;
pub mod figures;
pub mod frame;
pub mod report;

pub use chart::{ChartConfig, ChartConfigBuilder, Scale, Series, Style};
pub use figures::{FigureOptions, digit_chart, error_analysis, save};
pub use frame::render;
