//! Crate root: re-exports the pipeline types and a one-call standard report.

pub mod cli;
pub mod core;
pub mod render;

pub use crate::core::{
    analysis::{Analysis, ErrorSample, ErrorSeries, Verdict, analyze},
    approx::Strategy,
    area::surface_area,
    color::{AnsiCode, colorize},
    config::{RunConfig, RunConfigBuilder},
    decimal::{Decimal, RoundingMode},
    error::{
        ColorError, ComputeError, ConfigError, DecimalError, PiError, PiResult, PrecisionError,
        RenderError,
    },
    pi::PrecisionContext,
};

pub use render::{ChartConfig, FigureOptions, Series, digit_chart, error_analysis};

/// Run the standard experiment (r = 10, 150 digits, checkpoints 20/40/60/100)
/// and write its report to `out`.
pub fn report_standard(out: &mut impl std::io::Write) -> PiResult<Analysis> {
    let analysis = analyze(&RunConfig::standard()?)?;
    render::report::write_report(out, &analysis, crate::core::constants::DEFAULT_ERROR_DIGITS)?;
    render::report::write_conclusion(out, &analysis)?;
    Ok(analysis)
}
