//!
//! Common types, traits, and errors for the video backends.
//!
//! Both the SDL2 backend and the headless null backend implement
//! [`VideoBackend`]; the probe pipeline only ever talks to the trait.
//!

use std::fmt;
use std::time::Duration;

/// Error types for backend operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VideoError {
    /// Backend not initialized.
    #[error("Video subsystem not initialized")]
    NotInitialized,
    /// Subsystem initialization failed.
    #[error("{0}")]
    InitFailed(String),
    /// Capability query failed.
    #[error("{0}")]
    InfoUnavailable(String),
    /// Display mode enumeration failed.
    #[error("{0}")]
    ModeQueryFailed(String),
    /// Window creation failed.
    #[error("Window creation failed: {0}")]
    WindowCreationFailed(String),
    /// Video mode configuration failed.
    #[error("Video mode configuration failed: {0}")]
    VideoModeFailed(String),
    /// OpenGL context creation failed.
    #[error("OpenGL context creation failed: {0}")]
    GlContextFailed(String),
    /// Driver name could not be obtained.
    #[error("{0}")]
    DriverNameUnavailable(String),
}

/// Result type for backend operations.
pub type VideoResult<T> = Result<T, VideoError>;

/// Pixel format of the current video device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelFormatInfo {
    /// Bits used to represent each pixel (usually 8, 16, 24 or 32).
    pub bits_per_pixel: u8,
    /// Bytes used to represent each pixel (usually 1 to 4).
    pub bytes_per_pixel: u8,
    /// Whether the format is indexed through a palette.
    pub palette: bool,
    pub rmask: u32,
    pub gmask: u32,
    pub bmask: u32,
    pub amask: u32,
}

impl PixelFormatInfo {
    /// 32-bit XRGB8888, the common desktop format.
    #[must_use]
    pub const fn xrgb8888() -> Self {
        Self {
            bits_per_pixel: 32,
            bytes_per_pixel: 4,
            palette: false,
            rmask: 0x00ff_0000,
            gmask: 0x0000_ff00,
            bmask: 0x0000_00ff,
            amask: 0,
        }
    }
}

/// Read-only snapshot of what the current display and driver support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoInfo {
    /// Hardware surfaces can be created.
    pub hw_available: bool,
    /// A window manager is available.
    pub wm_available: bool,
    /// Hardware to hardware blits are accelerated.
    pub blit_hw: bool,
    /// Hardware to hardware colorkey blits are accelerated.
    pub blit_hw_cc: bool,
    /// Hardware to hardware alpha blits are accelerated.
    pub blit_hw_a: bool,
    /// Software to hardware blits are accelerated.
    pub blit_sw: bool,
    /// Software to hardware colorkey blits are accelerated.
    pub blit_sw_cc: bool,
    /// Software to hardware alpha blits are accelerated.
    pub blit_sw_a: bool,
    /// Color fills are accelerated.
    pub blit_fill: bool,
    /// Total video memory in kilobytes. Only meaningful when `hw_available`.
    pub video_mem_kb: u32,
    /// Current display width.
    pub current_w: u32,
    /// Current display height.
    pub current_h: u32,
    /// Pixel format of the current display.
    pub format: PixelFormatInfo,
}

impl VideoInfo {
    /// Video memory, or `None` when the value carries no meaning.
    #[must_use]
    pub const fn video_memory_kb(&self) -> Option<u32> {
        if self.hw_available {
            Some(self.video_mem_kb)
        } else {
            None
        }
    }
}

/// A fullscreen display resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
}

impl DisplayMode {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// Outcome of a fullscreen hardware mode query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeList {
    /// Any resolution is accepted.
    Unrestricted,
    /// No mode is usable.
    NoModes,
    /// Explicit list, in the order the driver reported it.
    Modes(Vec<DisplayMode>),
}

impl ModeList {
    /// Build a list, mapping an empty vector to [`ModeList::NoModes`].
    #[must_use]
    pub fn from_modes(modes: Vec<DisplayMode>) -> Self {
        if modes.is_empty() {
            Self::NoModes
        } else {
            Self::Modes(modes)
        }
    }
}

/// OpenGL attributes consulted when an accelerated context is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlAttributes {
    /// Framebuffer red component, in bits.
    pub red_size: u8,
    /// Framebuffer green component, in bits.
    pub green_size: u8,
    /// Framebuffer blue component, in bits.
    pub blue_size: u8,
    pub double_buffer: bool,
    /// Depth buffer, in bits.
    pub depth_size: u8,
    /// Refuse software fallbacks.
    pub accelerated: bool,
}

impl Default for GlAttributes {
    fn default() -> Self {
        Self {
            red_size: 5,
            green_size: 5,
            blue_size: 5,
            double_buffer: true,
            depth_size: 16,
            accelerated: true,
        }
    }
}

/// What kind of drawable a [`SurfaceRequest`] asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Plain raster surface.
    Raster {
        double_buffer: bool,
        hardware: bool,
    },
    /// OpenGL rendering context.
    OpenGl,
}

/// Parameters for opening a video surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRequest {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u8,
    pub kind: SurfaceKind,
}

/// The surface the backend actually opened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u8,
    /// `GL_RENDERER` for accelerated contexts, when available.
    pub gl_renderer: Option<String>,
    /// `GL_VENDOR` for accelerated contexts, when available.
    pub gl_vendor: Option<String>,
}

/// Trait for video backends.
///
/// The method set mirrors the library calls a probe run makes: init/quit,
/// capability query, mode enumeration, window hints, GL attributes, mode
/// setting and the driver-name query.
pub trait VideoBackend {
    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Bring the video subsystem up.
    fn init(&mut self) -> VideoResult<()>;

    /// Release everything acquired since [`VideoBackend::init`].
    ///
    /// Must be safe to call when nothing is initialized.
    fn quit(&mut self);

    /// Query current display and driver capabilities.
    fn video_info(&mut self) -> VideoResult<VideoInfo>;

    /// List fullscreen hardware modes.
    fn list_modes(&mut self) -> VideoResult<ModeList>;

    /// Ask for the next window to be centered on screen.
    fn set_window_centered(&mut self, centered: bool);

    /// Set the window title.
    fn set_caption(&mut self, title: &str);

    /// Set OpenGL attributes for the next accelerated context.
    fn set_gl_attributes(&mut self, attributes: &GlAttributes) -> VideoResult<()>;

    /// Open a surface or context.
    fn set_video_mode(&mut self, request: &SurfaceRequest) -> VideoResult<SurfaceInfo>;

    /// Name of the active video driver.
    fn driver_name(&mut self) -> VideoResult<String>;

    /// Block for `duration`.
    fn delay(&mut self, duration: Duration);
}
