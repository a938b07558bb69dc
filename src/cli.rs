use crate::config::{parse_bool, parse_bpp, parse_driver, parse_idle, parse_policy, parse_resolution};
use crate::config::Options;
use crate::logging::LogLevel;
use anyhow::{Context, Result};
use clap::{Command, CommandFactory, FromArgMatches, Parser};

/// vidprobe - video hardware and display mode probe
#[derive(Parser, Debug, Default)]
#[command(name = "vidprobe")]
#[command(version)]
#[command(about = "Probe video capabilities and display modes, then open a test surface", long_about = None)]
pub struct Cli {
    /// Acquisition policy (raster, gl)
    #[arg(short, long, value_name = "POLICY")]
    pub policy: Option<String>,

    /// Video backend (sdl2, null)
    #[arg(short, long, value_name = "DRIVER")]
    pub driver: Option<String>,

    /// Surface resolution (e.g., 1024x768)
    #[arg(short, long, value_name = "WIDTHxHEIGHT")]
    pub res: Option<String>,

    /// Surface bits per pixel (8, 15, 16, 24, 32)
    #[arg(short, long, value_name = "BPP")]
    pub bpp: Option<String>,

    /// Window title
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Center the window (true, false)
    #[arg(long, value_name = "BOOL")]
    pub centered: Option<String>,

    /// Idle time before shutdown, in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub idle: Option<String>,

    /// Configuration directory path
    #[arg(short, long, value_name = "CONFIGDIR")]
    pub configdir: Option<String>,

    /// Log level (nothing, user, error, warning, info, debug, all)
    #[arg(short, long = "loglevel", value_name = "LEVEL")]
    pub loglevel: Option<String>,
}

impl Cli {
    /// Command definition presented under the binary name `name`
    pub fn command_for(name: &'static str) -> Command {
        Self::command().name(name).bin_name(name)
    }

    /// Parse the process arguments for the binary `name`, exiting on error
    pub fn parse_for(name: &'static str) -> Self {
        let matches = Self::command_for(name).get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref config_dir) = self.configdir {
            opts.config_dir = Some(config_dir.clone());
        }

        if let Some(ref driver) = self.driver {
            opts.driver = Some(parse_driver(driver)?);
        }

        if let Some(ref policy) = self.policy {
            opts.policy = Some(parse_policy(policy)?);
        }

        // Size and depth apply to whichever policy runs.
        if let Some(ref res) = self.res {
            let resolution = parse_resolution(res).context("Invalid resolution format")?;
            opts.raster_resolution = Some(resolution);
            opts.gl_resolution = Some(resolution);
        }

        if let Some(ref bpp) = self.bpp {
            let bpp = parse_bpp(bpp)?;
            opts.raster_bpp = Some(bpp);
            opts.gl_bpp = Some(bpp);
        }

        if let Some(ref title) = self.title {
            opts.title = Some(title.clone());
        }

        if let Some(ref centered) = self.centered {
            opts.centered = Some(parse_bool(centered)?);
        }

        if let Some(ref idle) = self.idle {
            opts.idle_ms = Some(parse_idle(idle)?);
        }

        Ok(opts)
    }

    /// Log level requested on the command line
    pub fn log_level(&self) -> Result<LogLevel> {
        match self.loglevel {
            Some(ref level) => Self::parse_log_level(level),
            None => Ok(LogLevel::default()),
        }
    }

    fn parse_log_level(s: &str) -> Result<LogLevel> {
        match s.to_lowercase().as_str() {
            "nothing" | "none" => Ok(LogLevel::Nothing),
            "user" => Ok(LogLevel::User),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "all" => Ok(LogLevel::All),
            _ => match s.parse::<i32>() {
                Ok(level) if (0..=6).contains(&level) => Ok(LogLevel::from_i32(level)),
                _ => anyhow::bail!(
                    "Invalid log level: {}. Valid options: nothing, user, error, warning, info, debug, all",
                    s
                ),
            },
        }
    }
}
