//! Shared entry point for the probe binaries.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;

use crate::cli::Cli;
use crate::config::{self, Driver};
use crate::logging;
use crate::probe::{self, PolicyKind};
use crate::video::{NullBackend, SdlBackend};

/// Run a probe as configured by `cli`.
///
/// `fallback` selects the policy when neither the CLI nor the config file
/// names one. Fatal probe errors are printed to stderr and mapped to a
/// non-zero exit code; configuration errors are returned.
pub fn run(cli: &Cli, fallback: PolicyKind) -> Result<ExitCode> {
    if !logging::log_init(cli.log_level()?) {
        log::debug!("Logger already installed, keeping it");
    }
    log::info!("vidprobe {} starting", env!("CARGO_PKG_VERSION"));

    let options = config::load_config(&cli.configdir)?;
    let options = cli.merge_into_options(options)?;
    let probe_config = options.probe_config(fallback);
    log::debug!("Probe configuration: {:?}", probe_config);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let result = match options.driver.unwrap_or_default() {
        Driver::Sdl2 => probe::run(&mut SdlBackend::new(), &probe_config, &mut out, &mut err),
        Driver::Null => probe::run(&mut NullBackend::new(), &probe_config, &mut out, &mut err),
    };

    match result {
        Ok(report) => {
            log::info!(
                "Probe finished: {}x{}x{} on {}",
                report.surface.width,
                report.surface.height,
                report.surface.bits_per_pixel,
                report.driver_name.as_deref().unwrap_or("unknown driver")
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            out.flush().ok();
            writeln!(err, "{}", e)?;
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn null_cli() -> Cli {
        Cli {
            driver: Some("null".to_string()),
            idle: Some("0".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_run_twice_in_one_process() {
        assert!(run(&null_cli(), PolicyKind::Raster).is_ok());
        assert!(run(&null_cli(), PolicyKind::Accelerated).is_ok());
    }

    #[test]
    fn test_invalid_option_is_an_error() {
        let cli = Cli {
            res: Some("bogus".to_string()),
            ..null_cli()
        };
        assert!(run(&cli, PolicyKind::Raster).is_err());
    }
}
