use std::{
    io::{self, Write},
    path::Path,
};

use tracing::{error, info};

use crate::{
    core::{
        analysis::{self, Analysis},
        color::{AnsiCode, colorize},
        config::RunConfig,
        constants::{DEFAULT_DIGITS_SHOWN, DIGIT_CHART_FILE, ERROR_CHART_FILE},
        error::{ComputeError, PiResult, RenderError},
        pi::PrecisionContext,
    },
    render::{
        figures::{FigureOptions, digit_chart, error_analysis, save},
        report,
    },
};

use super::parse::{AnalyzeArgs, DigitsArgs};

/// A chart that could not be drawn or written.  The report is already out,
/// so this never aborts the run.
fn report_render_failure(what: &str, e: &RenderError) {
    error!(error = %e, "{what} failed");
    eprintln!("✗ {what}: {e}");
}

fn write_chart(
    out: &mut impl Write,
    path: &Path,
    chart: Result<String, RenderError>,
) -> io::Result<()> {
    match chart.and_then(|text| save(path, &text)) {
        Ok(()) => writeln!(out, "✓ Chart saved as '{}'", path.display()),
        Err(e) => {
            report_render_failure(&format!("chart '{}'", path.display()), &e);
            Ok(())
        }
    }
}

fn write_charts(
    out: &mut impl Write,
    analysis: &Analysis,
    dir: &Path,
    opts: &FigureOptions,
) -> io::Result<()> {
    writeln!(out)?;
    report::write_banner(out, "GENERATING VISUALIZATIONS...")?;

    write_chart(out, &dir.join(ERROR_CHART_FILE), error_analysis(analysis, opts))?;

    let digits = analysis.digits(DEFAULT_DIGITS_SHOWN);
    let chart = digit_chart(&digits, &analysis.checkpoints(), opts);
    write_chart(out, &dir.join(DIGIT_CHART_FILE), chart)
}

fn show_charts(out: &mut impl Write, analysis: &Analysis, opts: &FigureOptions) -> io::Result<()> {
    match error_analysis(analysis, opts) {
        Ok(fig) => writeln!(out, "\n{fig}")?,
        Err(e) => report_render_failure("terminal error chart", &e),
    }
    let digits = analysis.digits(DEFAULT_DIGITS_SHOWN);
    match digit_chart(&digits, &analysis.checkpoints(), opts) {
        Ok(fig) => writeln!(out, "{fig}")?,
        Err(e) => report_render_failure("terminal digit chart", &e),
    }
    Ok(())
}

/// Report, charts, conclusion.  Configuration and numeric failures are
/// fatal; chart failures are not.
pub fn analyze(a: &AnalyzeArgs, out: &mut impl Write) -> PiResult<()> {
    let truncation = AnsiCode::from_name(&a.truncation_color).map_err(RenderError::from)?;
    let rounding = AnsiCode::from_name(&a.rounding_color).map_err(RenderError::from)?;

    let cfg = RunConfig::builder()
        .radius(a.radius.clone())
        .precision(a.precision)
        .checkpoints(a.checkpoints.clone())
        .rounding(a.rounding)
        .build()?;
    let analysis = analysis::analyze(&cfg)?;

    report::write_report(out, &analysis, a.error_digits)?;

    if a.no_charts {
        info!("chart generation skipped");
    } else {
        let opts = FigureOptions {
            truncation,
            rounding,
            ..FigureOptions::file()
        };
        write_charts(out, &analysis, &a.out_dir, &opts)?;

        if a.show {
            let opts = FigureOptions {
                truncation,
                rounding,
                ..FigureOptions::terminal()
            };
            show_charts(out, &analysis, &opts)?;
        }
    }

    report::write_conclusion(out, &analysis)?;
    Ok(())
}

/// The digit chart on its own, in the terminal or to `--out`.
pub fn digits(a: &DigitsArgs, out: &mut impl Write) -> PiResult<()> {
    let color = AnsiCode::from_name(&a.color).map_err(RenderError::from)?;
    let precision = PrecisionContext::new(a.precision).map_err(ComputeError::from)?;

    let mut digits = precision.pi().fractional_digits();
    digits.truncate(a.count);

    let base = if a.out.is_some() {
        FigureOptions::file()
    } else {
        FigureOptions::terminal()
    };
    let opts = FigureOptions {
        digits: color,
        ..base
    };
    let chart = digit_chart(&digits, &a.highlight, &opts)?;

    match &a.out {
        Some(path) => {
            save(path, &chart)?;
            writeln!(out, "✓ Chart saved as '{}'", path.display())?;
        }
        None => write!(out, "{chart}")?,
    }
    Ok(())
}

/// Pretty-print available color names + an example hex code.
pub fn colors() {
    println!("\nPossible colors:");
    for (name, c) in [
        ("red", AnsiCode::red()),
        ("green", AnsiCode::green()),
        ("yellow", AnsiCode::yellow()),
        ("blue", AnsiCode::blue()),
        ("magenta", AnsiCode::magenta()),
        ("cyan", AnsiCode::cyan()),
        ("white", AnsiCode::white()),
        ("gray | grey", AnsiCode::gray()),
        ("lightblue", AnsiCode::light_blue()),
        ("purple", AnsiCode::purple()),
        ("orange", AnsiCode::orange()),
    ] {
        println!("{}", colorize(&c, name));
    }
    println!("none | plain  (no escapes)");
    println!(
        "{}  (#505050 or any other #RRGGBB)\n",
        colorize(&AnsiCode::rgb(0x50, 0x50, 0x50), "#505050")
    );
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "pi-precision";
    println!(
        "
Example invocations
-------------------
• Standard run       : {bin} analyze
• Report only        : {bin} analyze --no-charts
• Charts elsewhere   : {bin} analyze --out-dir charts/
• Other sphere       : {bin} analyze --radius 6371000 --precision 300 --checkpoints 10,50,100,250
• Banker's rounding  : {bin} analyze --rounding half-even
• Charts on screen   : {bin} analyze --show --truncation-color orange --rounding-color #6048c1
• Digits of π        : {bin} digits --count 60 --highlight 10,20,30
• Digit chart to file: {bin} digits --out digits.txt
• Verbose logging    : {bin} -dd analyze
"
    );
}
