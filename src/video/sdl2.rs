//!
//! SDL2 video backend.
//!
//! **Supported:**
//! - Video subsystem init/quit
//! - Capability query from the desktop display mode and renderer drivers
//! - Fullscreen mode enumeration on display 0
//! - Raster surfaces through an SDL renderer
//! - OpenGL contexts with attribute hints
//!
//! **Approximated:**
//! - SDL2 has no blit-acceleration or video-memory query. Blit flags follow
//!   the presence of an accelerated renderer driver and video memory is
//!   always reported as 0.
//! - SDL2 always returns an explicit mode list, so this backend never
//!   reports [`ModeList::Unrestricted`].
//! - The hardware-surface hint asks for an accelerated renderer first and
//!   falls back to the software renderer.
//!

use std::ffi::CStr;
use std::time::Duration;

use sdl2::{
    pixels::PixelFormatEnum,
    render::Canvas,
    video::{GLContext, Window},
    Sdl, VideoSubsystem,
};

use crate::video::common::{
    DisplayMode, GlAttributes, ModeList, PixelFormatInfo, SurfaceInfo, SurfaceKind,
    SurfaceRequest, VideoBackend, VideoError, VideoInfo, VideoResult,
};

/// `SDL_RENDERER_ACCELERATED`.
const RENDERER_ACCELERATED: u32 = 0x0000_0002;

/// Display queried for modes and capabilities.
const DISPLAY_INDEX: i32 = 0;

/// Drivers that run without a window manager.
const HEADLESS_DRIVERS: &[&str] = &["dummy", "offscreen", "evdev", "KMSDRM"];

/// SDL2 video backend.
///
/// # Thread Safety
///
/// SDL2 must be initialized on the main thread. All methods must be called
/// from the thread that called `init()`.
pub struct SdlBackend {
    /// SDL2 context.
    sdl_context: Option<Sdl>,
    /// Video subsystem.
    video_subsystem: Option<VideoSubsystem>,
    /// Canvas owning the window of a raster surface.
    canvas: Option<Canvas<Window>>,
    /// GL context of an accelerated surface. Dropped before `window`.
    gl_context: Option<GLContext>,
    /// Window of an accelerated surface.
    window: Option<Window>,
    /// Title for the next window.
    title: String,
    /// Center the next window.
    centered: bool,
}

impl SdlBackend {
    /// Create a new backend. Nothing is initialized until `init()`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sdl_context: None,
            video_subsystem: None,
            canvas: None,
            gl_context: None,
            window: None,
            title: String::new(),
            centered: false,
        }
    }

    /// Check if the video subsystem is up.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.video_subsystem.is_some()
    }

    fn video(&self) -> VideoResult<&VideoSubsystem> {
        self.video_subsystem
            .as_ref()
            .ok_or(VideoError::NotInitialized)
    }

    fn build_window(&self, request: &SurfaceRequest) -> VideoResult<Window> {
        let video = self.video()?;
        let mut window_builder = video.window(&self.title, request.width, request.height);
        if self.centered {
            window_builder.position_centered();
        }
        if request.kind == SurfaceKind::OpenGl {
            window_builder.opengl();
        }

        window_builder
            .build()
            .map_err(|e| VideoError::WindowCreationFailed(e.to_string()))
    }

    fn open_raster(&mut self, request: &SurfaceRequest, hardware: bool) -> VideoResult<SurfaceInfo> {
        let mut last_error = String::from("no renderer attempted");

        for &renderer in renderer_attempts(hardware) {
            let window = self.build_window(request)?;
            let (width, height) = window.size();
            let bits_per_pixel = window_bits_per_pixel(&window, request.bits_per_pixel);

            // SDL2 renderers always present from a back buffer, so the
            // double-buffer hint needs no flag here.
            let canvas_builder = match renderer {
                RendererKind::Accelerated => window.into_canvas().accelerated(),
                RendererKind::Software => window.into_canvas().software(),
            };

            match canvas_builder.build() {
                Ok(canvas) => {
                    log::info!("SDL2 renderer: {}", canvas.info().name);
                    self.canvas = Some(canvas);
                    return Ok(SurfaceInfo {
                        width,
                        height,
                        bits_per_pixel,
                        gl_renderer: None,
                        gl_vendor: None,
                    });
                }
                Err(e) => {
                    log::warn!("{:?} renderer unavailable: {}", renderer, e);
                    last_error = e.to_string();
                }
            }
        }

        Err(VideoError::VideoModeFailed(last_error))
    }

    fn open_gl(&mut self, request: &SurfaceRequest) -> VideoResult<SurfaceInfo> {
        let window = self.build_window(request)?;
        let gl_context = window
            .gl_create_context()
            .map_err(VideoError::GlContextFailed)?;
        window
            .gl_make_current(&gl_context)
            .map_err(|e| VideoError::GlContextFailed(format!("make current: {}", e)))?;

        let video = self.video()?;
        gl::load_with(|s| video.gl_get_proc_address(s) as *const _);

        let (width, height) = window.size();
        let surface = SurfaceInfo {
            width,
            height,
            bits_per_pixel: window_bits_per_pixel(&window, request.bits_per_pixel),
            gl_renderer: gl_string(gl::RENDERER),
            gl_vendor: gl_string(gl::VENDOR),
        };

        self.gl_context = Some(gl_context);
        self.window = Some(window);
        Ok(surface)
    }
}

impl Default for SdlBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SdlBackend {
    fn drop(&mut self) {
        self.quit();
    }
}

impl VideoBackend for SdlBackend {
    fn name(&self) -> &'static str {
        "sdl2"
    }

    fn init(&mut self) -> VideoResult<()> {
        if self.is_initialized() {
            return Err(VideoError::InitFailed("Already initialized".to_string()));
        }

        let sdl_context = sdl2::init().map_err(VideoError::InitFailed)?;
        let video_subsystem = sdl_context.video().map_err(VideoError::InitFailed)?;
        log::info!("SDL2 video driver: {}", video_subsystem.current_video_driver());

        self.sdl_context = Some(sdl_context);
        self.video_subsystem = Some(video_subsystem);
        Ok(())
    }

    fn quit(&mut self) {
        if self.sdl_context.is_none() {
            return;
        }
        log::debug!("Releasing SDL2 video subsystem");

        self.canvas = None;
        self.gl_context = None;
        self.window = None;
        self.video_subsystem = None;
        self.sdl_context = None;
    }

    fn video_info(&mut self) -> VideoResult<VideoInfo> {
        let video = self.video()?;
        let mode = video
            .desktop_display_mode(DISPLAY_INDEX)
            .map_err(VideoError::InfoUnavailable)?;
        let format = pixel_format_info(mode.format).map_err(VideoError::InfoUnavailable)?;

        let accelerated = sdl2::render::drivers().any(|info| {
            log::debug!("Renderer driver: {} (flags {:#x})", info.name, info.flags);
            info.flags & RENDERER_ACCELERATED != 0
        });
        let wm_available = !HEADLESS_DRIVERS.contains(&video.current_video_driver());

        Ok(VideoInfo {
            hw_available: accelerated,
            wm_available,
            blit_hw: accelerated,
            blit_hw_cc: accelerated,
            blit_hw_a: accelerated,
            blit_sw: accelerated,
            blit_sw_cc: accelerated,
            blit_sw_a: accelerated,
            blit_fill: accelerated,
            video_mem_kb: 0,
            current_w: u32::try_from(mode.w).unwrap_or(0),
            current_h: u32::try_from(mode.h).unwrap_or(0),
            format,
        })
    }

    fn list_modes(&mut self) -> VideoResult<ModeList> {
        let video = self.video()?;
        let count = video
            .num_display_modes(DISPLAY_INDEX)
            .map_err(VideoError::ModeQueryFailed)?;

        let mut modes: Vec<DisplayMode> = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
        for index in 0..count {
            let mode = video
                .display_mode(DISPLAY_INDEX, index)
                .map_err(VideoError::ModeQueryFailed)?;
            let entry = DisplayMode::new(
                u32::try_from(mode.w).unwrap_or(0),
                u32::try_from(mode.h).unwrap_or(0),
            );
            // One entry per refresh rate and format; keep one per size.
            if modes.last() != Some(&entry) {
                modes.push(entry);
            }
        }

        log::debug!("{} display modes reported, {} distinct", count, modes.len());
        Ok(ModeList::from_modes(modes))
    }

    fn set_window_centered(&mut self, centered: bool) {
        self.centered = centered;
    }

    fn set_caption(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_gl_attributes(&mut self, attributes: &GlAttributes) -> VideoResult<()> {
        let gl_attr = self.video()?.gl_attr();
        gl_attr.set_red_size(attributes.red_size);
        gl_attr.set_green_size(attributes.green_size);
        gl_attr.set_blue_size(attributes.blue_size);
        gl_attr.set_double_buffer(attributes.double_buffer);
        gl_attr.set_depth_size(attributes.depth_size);
        gl_attr.set_accelerated_visual(attributes.accelerated);
        Ok(())
    }

    fn set_video_mode(&mut self, request: &SurfaceRequest) -> VideoResult<SurfaceInfo> {
        log::info!(
            "Setting video mode {}x{}x{} ({:?})",
            request.width,
            request.height,
            request.bits_per_pixel,
            request.kind
        );

        match request.kind {
            SurfaceKind::Raster { hardware, .. } => self.open_raster(request, hardware),
            SurfaceKind::OpenGl => self.open_gl(request),
        }
    }

    fn driver_name(&mut self) -> VideoResult<String> {
        self.video_subsystem
            .as_ref()
            .map(|video| video.current_video_driver().to_string())
            .ok_or_else(|| {
                VideoError::DriverNameUnavailable("video subsystem not initialized".to_string())
            })
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Renderer flavour requested for a raster surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RendererKind {
    Accelerated,
    Software,
}

/// Renderers to try, in order. The hardware hint prefers an accelerated
/// renderer but still settles for a software one.
fn renderer_attempts(hardware: bool) -> &'static [RendererKind] {
    if hardware {
        &[RendererKind::Accelerated, RendererKind::Software]
    } else {
        &[RendererKind::Software]
    }
}

/// Describe an SDL pixel format the way the capability report expects.
fn pixel_format_info(format: PixelFormatEnum) -> Result<PixelFormatInfo, String> {
    let masks = format.into_masks()?;
    let palette = matches!(
        format,
        PixelFormatEnum::Index1LSB
            | PixelFormatEnum::Index1MSB
            | PixelFormatEnum::Index4LSB
            | PixelFormatEnum::Index4MSB
            | PixelFormatEnum::Index8
    );

    // Non-FourCC formats carry their byte width in the low byte.
    let raw = format as u32;
    let bytes_per_pixel = if (raw >> 28) & 0x0f == 1 {
        (raw & 0xff) as u8
    } else {
        masks.bpp.div_ceil(8)
    };

    Ok(PixelFormatInfo {
        bits_per_pixel: masks.bpp,
        bytes_per_pixel,
        palette,
        rmask: masks.rmask,
        gmask: masks.gmask,
        bmask: masks.bmask,
        amask: masks.amask,
    })
}

fn window_bits_per_pixel(window: &Window, requested: u8) -> u8 {
    match window.window_pixel_format().into_masks() {
        Ok(masks) => masks.bpp,
        Err(e) => {
            log::debug!("Unknown window pixel format ({}), assuming {} bpp", e, requested);
            requested
        }
    }
}

/// Read a GL string. A context must be current on this thread.
fn gl_string(name: gl::types::GLenum) -> Option<String> {
    if !gl::GetString::is_loaded() {
        return None;
    }
    // SAFETY: the caller made a context current and `name` is a string enum.
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null GL strings are NUL-terminated and static for the context.
    let text = unsafe { CStr::from_ptr(ptr.cast()) };
    Some(text.to_string_lossy().into_owned())
}
