use std::process::ExitCode;

use vidprobe::{app, Cli, PolicyKind};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse_for("vidprobe");

    match app::run(&cli, PolicyKind::Raster) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("vidprobe: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
