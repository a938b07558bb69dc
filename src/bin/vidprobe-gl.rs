//! Accelerated-context probe. Same as `vidprobe --policy gl`.

use std::process::ExitCode;

use vidprobe::{app, Cli, PolicyKind};

fn main() -> ExitCode {
    let cli = Cli::parse_for("vidprobe-gl");

    match app::run(&cli, PolicyKind::Accelerated) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("vidprobe-gl: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
