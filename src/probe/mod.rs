//!
//! The probe pipeline.
//!
//! A run initializes the backend, reports capabilities and fullscreen modes,
//! configures the window, acquires a surface with the selected
//! [`AcquisitionPolicy`], reports it, idles and shuts down. The backend is
//! held by a [`VideoSession`], so every exit path after a successful
//! initialization releases it exactly once.
//!

pub mod policy;
pub mod report;
pub mod session;

use std::io::{self, Write};

pub use policy::{AcquisitionPolicy, PolicyKind, ProbeConfig, DEFAULT_IDLE};
pub use session::VideoSession;

use crate::video::{ModeList, SurfaceInfo, VideoBackend, VideoError, VideoInfo};

/// Process status for any fatal error (the `-1` sentinel as an 8-bit status).
pub const FATAL_EXIT_CODE: u8 = 255;

/// Errors that end a probe run.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Could not initialize video subsystem: {0}")]
    Init(#[source] VideoError),

    #[error("No modes available!")]
    NoModes,

    #[error("Could not list display modes: {0}")]
    ModeQuery(#[source] VideoError),

    #[error("Couldn't set {policy} mode: {source}")]
    Acquisition {
        policy: PolicyKind,
        #[source]
        source: VideoError,
    },

    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),
}

impl ProbeError {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        FATAL_EXIT_CODE
    }
}

/// What a successful run observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// Capabilities, `None` when the query failed.
    pub info: Option<VideoInfo>,
    pub modes: ModeList,
    pub surface: SurfaceInfo,
    /// Driver name, `None` when the query failed.
    pub driver_name: Option<String>,
}

/// Run the whole probe against `backend`.
///
/// Report lines go to `out`; warnings for non-fatal failures go to `err`.
/// Fatal failures are returned and left for the caller to print.
pub fn run<B, W, E>(
    backend: &mut B,
    config: &ProbeConfig,
    out: &mut W,
    err: &mut E,
) -> Result<ProbeReport, ProbeError>
where
    B: VideoBackend + ?Sized,
    W: Write + ?Sized,
    E: Write + ?Sized,
{
    writeln!(out, "Initializing video subsystem...")?;
    let mut session = VideoSession::open(backend).map_err(ProbeError::Init)?;
    writeln!(out, "Video subsystem initialized.")?;

    let info = match session.backend().video_info() {
        Ok(info) => {
            report::write_video_info(out, &info)?;
            Some(info)
        }
        Err(e) => {
            log::warn!("Video info query failed: {}", e);
            writeln!(err, "Get the current video hardware information failed: {}", e)?;
            None
        }
    };
    writeln!(out)?;

    let modes = session.backend().list_modes().map_err(ProbeError::ModeQuery)?;
    match &modes {
        ModeList::Unrestricted => report::write_unrestricted(out)?,
        ModeList::Modes(list) if !list.is_empty() => report::write_modes(out, list)?,
        ModeList::NoModes | ModeList::Modes(_) => return Err(ProbeError::NoModes),
    }
    writeln!(out)?;

    let policy = config.policy.kind();
    session.backend().set_window_centered(config.centered);
    session.backend().set_caption(&config.title);

    if let Some(attributes) = config.policy.attributes() {
        log::debug!("Setting GL attributes: {:?}", attributes);
        session
            .backend()
            .set_gl_attributes(attributes)
            .map_err(|source| ProbeError::Acquisition { policy, source })?;
    }

    let surface = session
        .backend()
        .set_video_mode(&config.policy.request())
        .map_err(|source| ProbeError::Acquisition { policy, source })?;
    report::write_surface(out, &surface)?;

    let driver_name = match session.backend().driver_name() {
        Ok(name) => {
            writeln!(out, "The video driver name is {}", name)?;
            Some(name)
        }
        Err(e) => {
            log::warn!("Driver name query failed: {}", e);
            writeln!(err, "Failed to obtain the video driver name: {}", e)?;
            None
        }
    };
    writeln!(out)?;

    writeln!(out, "...waiting for {} ms...", config.idle.as_millis())?;
    session.backend().delay(config.idle);

    writeln!(out, "Quitting video subsystem...")?;
    session.close();
    writeln!(out, "Successfully done.")?;

    Ok(ProbeReport {
        info,
        modes,
        surface,
        driver_name,
    })
}
