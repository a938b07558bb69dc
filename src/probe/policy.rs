//! Surface acquisition policies and run configuration.

use std::fmt;
use std::time::Duration;

use crate::video::{GlAttributes, SurfaceKind, SurfaceRequest};

/// Idle time between the report and teardown.
pub const DEFAULT_IDLE: Duration = Duration::from_millis(2000);

/// Which kind of drawable a run acquires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyKind {
    /// Double-buffered hardware raster surface.
    #[default]
    Raster,
    /// Hardware-accelerated OpenGL context.
    Accelerated,
}

impl PolicyKind {
    /// Default acquisition parameters for this kind.
    #[must_use]
    pub fn default_policy(self) -> AcquisitionPolicy {
        match self {
            Self::Raster => AcquisitionPolicy::raster(),
            Self::Accelerated => AcquisitionPolicy::accelerated(),
        }
    }

    /// Window title used when none is configured.
    #[must_use]
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Raster => "vidprobe test window",
            Self::Accelerated => "vidprobe OpenGL test window",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster => write!(f, "video"),
            Self::Accelerated => write!(f, "GL"),
        }
    }
}

/// How the drawable is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionPolicy {
    /// Raster surface with double-buffer and hardware-surface hints.
    Raster {
        width: u32,
        height: u32,
        bits_per_pixel: u8,
    },
    /// Accelerated context; `attributes` are applied before the request.
    Accelerated {
        width: u32,
        height: u32,
        bits_per_pixel: u8,
        attributes: GlAttributes,
    },
}

impl AcquisitionPolicy {
    /// 1024x768x32 raster surface.
    #[must_use]
    pub const fn raster() -> Self {
        Self::Raster {
            width: 1024,
            height: 768,
            bits_per_pixel: 32,
        }
    }

    /// 800x600x32 OpenGL context with 5/5/5 color, double buffering,
    /// a 16-bit depth buffer and hardware acceleration required.
    #[must_use]
    pub fn accelerated() -> Self {
        Self::Accelerated {
            width: 800,
            height: 600,
            bits_per_pixel: 32,
            attributes: GlAttributes::default(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::Raster { .. } => PolicyKind::Raster,
            Self::Accelerated { .. } => PolicyKind::Accelerated,
        }
    }

    /// Same policy with a different surface size and depth.
    #[must_use]
    pub const fn with_mode(self, new_width: u32, new_height: u32, new_bpp: u8) -> Self {
        match self {
            Self::Raster { .. } => Self::Raster {
                width: new_width,
                height: new_height,
                bits_per_pixel: new_bpp,
            },
            Self::Accelerated { attributes, .. } => Self::Accelerated {
                width: new_width,
                height: new_height,
                bits_per_pixel: new_bpp,
                attributes,
            },
        }
    }

    /// GL attributes to set before acquisition, if any.
    #[must_use]
    pub const fn attributes(&self) -> Option<&GlAttributes> {
        match self {
            Self::Raster { .. } => None,
            Self::Accelerated { attributes, .. } => Some(attributes),
        }
    }

    /// The backend request this policy makes.
    #[must_use]
    pub const fn request(&self) -> SurfaceRequest {
        match *self {
            Self::Raster {
                width,
                height,
                bits_per_pixel,
            } => SurfaceRequest {
                width,
                height,
                bits_per_pixel,
                kind: SurfaceKind::Raster {
                    double_buffer: true,
                    hardware: true,
                },
            },
            Self::Accelerated {
                width,
                height,
                bits_per_pixel,
                ..
            } => SurfaceRequest {
                width,
                height,
                bits_per_pixel,
                kind: SurfaceKind::OpenGl,
            },
        }
    }
}

/// Everything a probe run needs besides the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub policy: AcquisitionPolicy,
    pub title: String,
    pub centered: bool,
    pub idle: Duration,
}

impl ProbeConfig {
    /// Defaults for `policy`: its default title, centered, 2 s idle.
    #[must_use]
    pub fn new(policy: AcquisitionPolicy) -> Self {
        Self {
            policy,
            title: policy.kind().default_title().to_string(),
            centered: true,
            idle: DEFAULT_IDLE,
        }
    }

    #[must_use]
    pub fn with_idle(mut self, idle: Duration) -> Self {
        self.idle = idle;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    #[must_use]
    pub fn with_centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }
}
