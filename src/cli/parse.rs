use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::core::{
    constants::{
        DEFAULT_CHECKPOINTS, DEFAULT_DIGITS_SHOWN, DEFAULT_ERROR_DIGITS, DEFAULT_PRECISION,
    },
    decimal::{Decimal, RoundingMode},
};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "pi-precision",
    version,
    about = "How much does truncating π instead of rounding it cost? Measured on A = 4πr²"
)]
pub struct Cli {
    /// Log verbosity on stderr: -d info, -dd debug, -ddd trace
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the truncation vs rounding experiment and write both charts
    Analyze(AnalyzeArgs),
    /// Draw the digits of π with chosen positions highlighted
    Digits(DigitsArgs),
    /// Show available color names / hex syntax
    Colors,
    /// Print example invocations
    Examples,
}

/// `pi-precision analyze …`
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Sphere radius in meters (decimal literal)
    #[arg(short, long, default_value = "10")]
    pub radius: Decimal,

    /// Working precision of π in significant digits
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    pub precision: u32,

    /// Decimal places at which π is cut, comma separated
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_CHECKPOINTS
    )]
    pub checkpoints: Vec<u32>,

    /// Tie rule for the rounding strategy (half-away | half-even)
    #[arg(long, default_value_t = RoundingMode::HalfAwayFromZero)]
    pub rounding: RoundingMode,

    /// Significant digits shown for each error
    #[arg(long, default_value_t = DEFAULT_ERROR_DIGITS)]
    pub error_digits: u32,

    /// Directory receiving the chart files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Print the report only
    #[arg(long)]
    pub no_charts: bool,

    /// Also draw the charts in the terminal
    #[arg(long)]
    pub show: bool,

    /// Truncation series color (name or `#RRGGBB`)
    #[arg(long, default_value = "red")]
    pub truncation_color: String,

    /// Rounding series color (name or `#RRGGBB`)
    #[arg(long, default_value = "blue")]
    pub rounding_color: String,
}

/// `pi-precision digits …`
#[derive(Parser, Debug)]
pub struct DigitsArgs {
    /// How many decimal digits to draw
    #[arg(short = 'n', long, default_value_t = DEFAULT_DIGITS_SHOWN)]
    pub count: usize,

    /// Decimal places to highlight, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_CHECKPOINTS
    )]
    pub highlight: Vec<u32>,

    /// Working precision of π in significant digits
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    pub precision: u32,

    /// Bar color (name or `#RRGGBB`)
    #[arg(long, default_value = "lightblue")]
    pub color: String,

    /// Write the chart here instead of drawing it in the terminal
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["pi-precision", "analyze"]).unwrap();
        let Command::Analyze(a) = cli.cmd else {
            panic!("expected analyze");
        };
        assert_eq!(cli.debug, 0);
        assert_eq!(a.radius, Decimal::from(10u32));
        assert_eq!(a.precision, 150);
        assert_eq!(a.checkpoints, vec![20, 40, 60, 100]);
        assert_eq!(a.rounding, RoundingMode::HalfAwayFromZero);
        assert_eq!(a.error_digits, 30);
        assert_eq!(a.out_dir, PathBuf::from("."));
        assert!(!a.no_charts && !a.show);
    }

    #[test]
    fn analyze_overrides() {
        let cli = Cli::try_parse_from([
            "pi-precision",
            "-dd",
            "analyze",
            "--radius",
            "2.5",
            "--checkpoints",
            "5,10",
            "--rounding",
            "half-even",
            "--no-charts",
        ])
        .unwrap();
        assert_eq!(cli.debug, 2);
        let Command::Analyze(a) = cli.cmd else {
            panic!("expected analyze");
        };
        assert_eq!(a.radius, "2.5".parse::<Decimal>().unwrap());
        assert_eq!(a.checkpoints, vec![5, 10]);
        assert_eq!(a.rounding, RoundingMode::HalfEven);
        assert!(a.no_charts);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Cli::try_parse_from(["pi-precision", "analyze", "--radius", "ten"]).is_err());
        assert!(Cli::try_parse_from(["pi-precision", "analyze", "--rounding", "up"]).is_err());
    }

    #[test]
    fn digits_defaults() {
        let cli = Cli::try_parse_from(["pi-precision", "digits", "-n", "30"]).unwrap();
        let Command::Digits(d) = cli.cmd else {
            panic!("expected digits");
        };
        assert_eq!(d.count, 30);
        assert_eq!(d.highlight, vec![20, 40, 60, 100]);
        assert!(d.out.is_none());
    }
}
