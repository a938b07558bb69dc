//!
//! Video backends.
//!
//! # Architecture
//!
//! - `common`: backend trait, capability records, mode lists and errors
//! - `sdl2`: backend over the SDL2 library
//! - `null`: headless scripted backend that records every call

pub mod common;
pub mod null;
pub mod sdl2;

pub use common::{
    DisplayMode, GlAttributes, ModeList, PixelFormatInfo, SurfaceInfo, SurfaceKind,
    SurfaceRequest, VideoBackend, VideoError, VideoInfo, VideoResult,
};
pub use null::{BackendCall, NullBackend};
pub use self::sdl2::SdlBackend;
