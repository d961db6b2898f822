mod handlers;
pub mod parse;

use std::io;

use clap::Parser;
pub use parse::Cli;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    Layer, fmt, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::core::error::PiResult;

/// Map `-d` count to a level and install a stderr fmt subscriber.
pub fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("max verbosity is -ddd");
            LevelFilter::TRACE
        }
    };

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter);

    // a second call (tests, embedding) keeps the first subscriber
    if tracing_subscriber::registry().with(layer).try_init().is_ok() {
        tracing::debug!(?filter, "logging initialised");
    }
}

pub fn run() -> PiResult<()> {
    let cli = parse::Cli::parse();
    init_logging(cli.debug);

    match cli.cmd {
        parse::Command::Analyze(a) => handlers::analyze(&a, &mut io::stdout().lock()),
        parse::Command::Digits(a) => handlers::digits(&a, &mut io::stdout().lock()),
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}
