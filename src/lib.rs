// vidprobe library
// Video capability probe over SDL2

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod probe;
pub mod propfile;
pub mod video;

pub use cli::Cli;
pub use config::Options;
pub use logging::LogLevel;
pub use probe::{AcquisitionPolicy, PolicyKind, ProbeConfig, ProbeError, ProbeReport};
