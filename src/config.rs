use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::probe::{PolicyKind, ProbeConfig};
use crate::propfile::parse_properties;

/// Config file looked up in the config directory.
pub const CONFIG_FILE_NAME: &str = "vidprobe.cfg";

/// Probe options that can be set via CLI or config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    // Commandline-only options
    pub config_dir: Option<String>,

    // Commandline and config file options
    pub driver: Option<Driver>,
    pub policy: Option<PolicyKind>,
    pub raster_resolution: Option<Resolution>,
    pub raster_bpp: Option<u8>,
    pub gl_resolution: Option<Resolution>,
    pub gl_bpp: Option<u8>,
    pub title: Option<String>,
    pub centered: Option<bool>,
    pub idle_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Video backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Driver {
    #[default]
    Sdl2,
    Null,
}

impl Options {
    /// Resolve these options into a run configuration.
    ///
    /// `fallback` picks the policy when none was configured.
    pub fn probe_config(&self, fallback: PolicyKind) -> ProbeConfig {
        let kind = self.policy.unwrap_or(fallback);
        let mut policy = kind.default_policy();

        let (resolution, bpp) = match kind {
            PolicyKind::Raster => (self.raster_resolution, self.raster_bpp),
            PolicyKind::Accelerated => (self.gl_resolution, self.gl_bpp),
        };
        if resolution.is_some() || bpp.is_some() {
            let request = policy.request();
            let res = resolution.unwrap_or(Resolution {
                width: request.width,
                height: request.height,
            });
            policy = policy.with_mode(res.width, res.height, bpp.unwrap_or(request.bits_per_pixel));
        }

        let mut config = ProbeConfig::new(policy);
        if let Some(title) = &self.title {
            config = config.with_title(title);
        }
        if let Some(centered) = self.centered {
            config = config.with_centered(centered);
        }
        if let Some(idle_ms) = self.idle_ms {
            config = config.with_idle(Duration::from_millis(idle_ms));
        }
        config
    }
}

/// Path of the config file for `config_dir` (current directory when unset).
pub fn config_path(config_dir: &Option<String>) -> PathBuf {
    let dir = config_dir.as_deref().unwrap_or(".");
    Path::new(dir).join(CONFIG_FILE_NAME)
}

/// Load configuration from vidprobe.cfg
///
/// A missing file yields default options. An explicitly given directory
/// that does not exist is an error.
pub fn load_config(config_dir: &Option<String>) -> Result<Options> {
    if let Some(dir) = config_dir {
        if !Path::new(dir).is_dir() {
            anyhow::bail!("Config directory does not exist: {}", dir);
        }
    }

    let path = config_path(config_dir);
    let data = match fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No config file at {}", path.display());
            return Ok(Options::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    log::info!("Loading config from {}", path.display());
    parse_config(&data).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Parse config file text into options
pub fn parse_config(data: &str) -> Result<Options> {
    let mut opts = Options::default();

    for prop in parse_properties(data) {
        let value = prop.value.as_str();
        let at = || format!("line {}", prop.line);
        match prop.key.to_lowercase().as_str() {
            "driver" => opts.driver = Some(parse_driver(value).with_context(at)?),
            "policy" => opts.policy = Some(parse_policy(value).with_context(at)?),
            "raster.res" => opts.raster_resolution = Some(parse_resolution(value).with_context(at)?),
            "raster.bpp" => opts.raster_bpp = Some(parse_bpp(value).with_context(at)?),
            "gl.res" => opts.gl_resolution = Some(parse_resolution(value).with_context(at)?),
            "gl.bpp" => opts.gl_bpp = Some(parse_bpp(value).with_context(at)?),
            "title" => opts.title = Some(value.to_string()),
            "centered" => opts.centered = Some(parse_bool(value).with_context(at)?),
            "idle_ms" => opts.idle_ms = Some(parse_idle(value).with_context(at)?),
            other => log::warn!("Ignoring unknown config key '{}' at line {}", other, prop.line),
        }
    }

    Ok(opts)
}

/// Parse a resolution string in the format "WIDTHxHEIGHT"
pub fn parse_resolution(s: &str) -> Result<Resolution> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        anyhow::bail!("Resolution must be in WIDTHxHEIGHT format");
    }

    let width: u32 = parts[0].trim().parse().context("Invalid width value")?;
    let height: u32 = parts[1].trim().parse().context("Invalid height value")?;

    if width == 0 || height == 0 {
        anyhow::bail!("Resolution values must be positive");
    }

    Ok(Resolution { width, height })
}

/// Parse a surface depth in bits per pixel
pub fn parse_bpp(s: &str) -> Result<u8> {
    let bpp: u8 = s.trim().parse().context("Invalid bits per pixel value")?;
    match bpp {
        8 | 15 | 16 | 24 | 32 => Ok(bpp),
        _ => anyhow::bail!("Unsupported bits per pixel: {}. Valid options: 8, 15, 16, 24, 32", bpp),
    }
}

/// Parse an idle time in milliseconds
pub fn parse_idle(s: &str) -> Result<u64> {
    s.trim().parse().context("Invalid idle time")
}

pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid boolean: {}. Valid options: true, false", s),
    }
}

pub fn parse_policy(s: &str) -> Result<PolicyKind> {
    match s.trim().to_lowercase().as_str() {
        "raster" | "surface" => Ok(PolicyKind::Raster),
        "gl" | "opengl" | "accelerated" => Ok(PolicyKind::Accelerated),
        _ => anyhow::bail!("Invalid policy: {}. Valid options: raster, gl", s),
    }
}

pub fn parse_driver(s: &str) -> Result<Driver> {
    match s.trim().to_lowercase().as_str() {
        "sdl2" | "sdl" => Ok(Driver::Sdl2),
        "null" | "none" => Ok(Driver::Null),
        _ => anyhow::bail!("Invalid driver: {}. Valid options: sdl2, null", s),
    }
}
