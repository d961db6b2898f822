//! Plain-text report of an analysis run, written to any `io::Write`.

use std::io::{self, Write};

use crate::core::{
    analysis::{Analysis, ErrorSample, Verdict},
    approx::Strategy,
    decimal::RoundingMode,
};

pub const RULE_WIDTH: usize = 70;

fn rule(w: &mut impl Write, ch: char) -> io::Result<()> {
    writeln!(w, "{}", ch.to_string().repeat(RULE_WIDTH))
}

/// `title` between two heavy rules.
pub fn write_banner(w: &mut impl Write, title: &str) -> io::Result<()> {
    rule(w, '=')?;
    writeln!(w, "{title}")?;
    rule(w, '=')
}

/// Run parameters and the reference area.
pub fn write_header(w: &mut impl Write, analysis: &Analysis) -> io::Result<()> {
    rule(w, '=')?;
    writeln!(w, "SURFACE AREA CALCULATION ERROR ANALYSIS")?;
    writeln!(w, "Formula: A = 4πr²")?;
    writeln!(w, "Radius: {} meters", analysis.radius)?;
    writeln!(w, "Working precision: {} significant digits", analysis.significant_digits)?;
    writeln!(w, "Rounding rule: {}", analysis.rounding.describe())?;
    rule(w, '=')?;

    let area = analysis
        .true_area
        .round_significant(analysis.significant_digits, analysis.rounding);
    writeln!(w, "\nTrue Surface Area (full precision): {area} m²\n")
}

/// The arrow line under a checkpoint.
#[must_use]
pub fn verdict_line(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::RoundingBetter => "→ Rounding is MORE accurate",
        Verdict::TruncationBetter => "→ Truncation is MORE accurate",
        Verdict::Tie => "→ Both methods have equal error",
    }
}

pub fn write_sample(
    w: &mut impl Write,
    sample: &ErrorSample,
    rounding: RoundingMode,
    error_digits: u32,
) -> io::Result<()> {
    writeln!(w, "\n{} DECIMAL PLACES:", sample.decimals)?;
    rule(w, '-')?;
    for strategy in [Strategy::Truncate, Strategy::Round(rounding)] {
        let label = format!("{} Error:", strategy.label());
        let error = sample.error(strategy).to_scientific(error_digits);
        writeln!(w, "{label:<18}{error} m²")?;
    }
    writeln!(w, "{}", verdict_line(sample.verdict()))
}

/// One section per checkpoint, errors to `error_digits` significant digits.
pub fn write_samples(w: &mut impl Write, analysis: &Analysis, error_digits: u32) -> io::Result<()> {
    write_banner(w, "ERRORS AT DIFFERENT DECIMAL PLACES")?;
    for sample in &analysis.samples {
        write_sample(w, sample, analysis.rounding, error_digits)?;
    }
    Ok(())
}

pub fn write_conclusion(w: &mut impl Write, analysis: &Analysis) -> io::Result<()> {
    writeln!(w)?;
    write_banner(w, "CONCLUSION")?;

    let total = analysis.samples.len();
    let rounding = analysis.tally(Verdict::RoundingBetter);
    let truncation = analysis.tally(Verdict::TruncationBetter);
    let ties = analysis.tally(Verdict::Tie);
    writeln!(w, "Rounding more accurate:   {rounding} of {total} checkpoints")?;
    writeln!(w, "Truncation more accurate: {truncation} of {total} checkpoints")?;
    writeln!(w, "Equal error:              {ties} of {total} checkpoints")?;
    writeln!(w)?;

    writeln!(w, "Is there a difference between truncation and rounding?")?;
    if ties == total {
        writeln!(w, "NO - both methods gave identical errors at every checkpoint.")?;
    } else {
        writeln!(w, "YES - but at high decimal precision, both become extremely accurate.")?;
    }
    writeln!(w, "The charts show how errors decrease as precision increases.")?;
    rule(w, '=')
}

/// Header followed by every checkpoint section.
pub fn write_report(w: &mut impl Write, analysis: &Analysis, error_digits: u32) -> io::Result<()> {
    write_header(w, analysis)?;
    write_samples(w, analysis, error_digits)
}
