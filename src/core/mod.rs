//! Numeric core: exact decimals, π, the experiment and its configuration.

pub mod analysis;
pub mod approx;
pub mod area;
pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod decimal;
pub mod error;
pub mod pi;

// re-export frequently-used items for convenience
pub use analysis::{Analysis, ErrorSample, ErrorSeries, Verdict, analyze};
pub use approx::Strategy;
pub use area::surface_area;
pub use bounds::Axis;
pub use color::{AnsiCode, colorize};
pub use config::{RunConfig, RunConfigBuilder};
pub use constants::{
    BORDER_WIDTH, BRAILLE_HORIZONTAL_RESOLUTION, DECIMAL_PRECISION, LABEL_GUTTER, MIN_GRAPH_HEIGHT,
    MIN_GRAPH_WIDTH,
};
pub use data::PlotPoint;
pub use decimal::{Decimal, RoundingMode};
pub use error::{ColorError, ComputeError, ConfigError, PiError, PrecisionError, RenderError};
pub use pi::PrecisionContext;
