//! Null (headless) video backend
//!
//! Answers every query from a script instead of a display and records each
//! call it receives. Used for dry runs on machines without a display and by
//! the test suite to check which library calls a probe run makes.

use std::time::Duration;

use super::common::{
    DisplayMode, GlAttributes, ModeList, PixelFormatInfo, SurfaceInfo, SurfaceRequest,
    VideoBackend, VideoError, VideoInfo, VideoResult,
};

/// A call received by [`NullBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Init,
    Quit,
    VideoInfo,
    ListModes,
    SetWindowCentered(bool),
    SetCaption(String),
    SetGlAttributes(GlAttributes),
    SetVideoMode(SurfaceRequest),
    DriverName,
    Delay(Duration),
}

/// Null backend with scripted answers
///
/// By default initialization succeeds, capabilities describe a 1920x1080
/// 32-bit display, modes are unrestricted, every surface request is granted
/// as asked and the driver is called `"null"`. Delays are recorded, never
/// slept.
#[derive(Debug, Clone)]
pub struct NullBackend {
    init_error: Option<String>,
    info: Result<VideoInfo, String>,
    modes: Result<ModeList, String>,
    surface: Option<Result<SurfaceInfo, String>>,
    driver_name: Option<String>,
    initialized: bool,
    calls: Vec<BackendCall>,
}

impl NullBackend {
    /// Create a null backend with default answers
    pub fn new() -> Self {
        Self {
            init_error: None,
            info: Ok(Self::default_info()),
            modes: Ok(ModeList::Unrestricted),
            surface: None,
            driver_name: Some("null".to_string()),
            initialized: false,
            calls: Vec::new(),
        }
    }

    /// Capability record answered when none is scripted
    pub fn default_info() -> VideoInfo {
        VideoInfo {
            hw_available: true,
            wm_available: true,
            blit_hw: true,
            blit_hw_cc: true,
            blit_hw_a: true,
            blit_sw: true,
            blit_sw_cc: true,
            blit_sw_a: true,
            blit_fill: true,
            video_mem_kb: 262_144,
            current_w: 1920,
            current_h: 1080,
            format: PixelFormatInfo::xrgb8888(),
        }
    }

    /// Fail `init()` with `message`
    pub fn with_init_failure(mut self, message: &str) -> Self {
        self.init_error = Some(message.to_string());
        self
    }

    /// Answer capability queries with `info`
    pub fn with_info(mut self, info: VideoInfo) -> Self {
        self.info = Ok(info);
        self
    }

    /// Fail capability queries with `message`
    pub fn without_info(mut self, message: &str) -> Self {
        self.info = Err(message.to_string());
        self
    }

    /// Answer mode queries with `modes`
    pub fn with_modes(mut self, modes: ModeList) -> Self {
        self.modes = Ok(modes);
        self
    }

    /// Answer mode queries with an explicit list of `(width, height)` pairs
    pub fn with_mode_sizes(self, sizes: &[(u32, u32)]) -> Self {
        let modes = sizes
            .iter()
            .map(|&(width, height)| DisplayMode::new(width, height))
            .collect();
        self.with_modes(ModeList::from_modes(modes))
    }

    /// Fail mode queries with `message`
    pub fn with_mode_query_failure(mut self, message: &str) -> Self {
        self.modes = Err(message.to_string());
        self
    }

    /// Grant every surface request with `surface` instead of echoing it
    pub fn with_surface(mut self, surface: SurfaceInfo) -> Self {
        self.surface = Some(Ok(surface));
        self
    }

    /// Refuse every surface request with `message`
    pub fn with_surface_failure(mut self, message: &str) -> Self {
        self.surface = Some(Err(message.to_string()));
        self
    }

    /// Fail driver-name queries
    pub fn without_driver_name(mut self) -> Self {
        self.driver_name = None;
        self
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Number of recorded calls equal to `call`
    pub fn count(&self, call: &BackendCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    /// Whether any `SetVideoMode` call was made
    pub fn requested_surface(&self) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, BackendCall::SetVideoMode(_)))
    }

    /// Whether the backend is currently initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_initialized(&self) -> VideoResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(VideoError::NotInitialized)
        }
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoBackend for NullBackend {
    fn name(&self) -> &'static str {
        "null"
    }

    fn init(&mut self) -> VideoResult<()> {
        self.calls.push(BackendCall::Init);
        if let Some(message) = &self.init_error {
            return Err(VideoError::InitFailed(message.clone()));
        }
        self.initialized = true;
        Ok(())
    }

    fn quit(&mut self) {
        self.calls.push(BackendCall::Quit);
        self.initialized = false;
    }

    fn video_info(&mut self) -> VideoResult<VideoInfo> {
        self.calls.push(BackendCall::VideoInfo);
        self.ensure_initialized()?;
        self.info.clone().map_err(VideoError::InfoUnavailable)
    }

    fn list_modes(&mut self) -> VideoResult<ModeList> {
        self.calls.push(BackendCall::ListModes);
        self.ensure_initialized()?;
        self.modes.clone().map_err(VideoError::ModeQueryFailed)
    }

    fn set_window_centered(&mut self, centered: bool) {
        self.calls.push(BackendCall::SetWindowCentered(centered));
    }

    fn set_caption(&mut self, title: &str) {
        self.calls.push(BackendCall::SetCaption(title.to_string()));
    }

    fn set_gl_attributes(&mut self, attributes: &GlAttributes) -> VideoResult<()> {
        self.calls.push(BackendCall::SetGlAttributes(*attributes));
        self.ensure_initialized()
    }

    fn set_video_mode(&mut self, request: &SurfaceRequest) -> VideoResult<SurfaceInfo> {
        self.calls.push(BackendCall::SetVideoMode(*request));
        self.ensure_initialized()?;
        match &self.surface {
            Some(Ok(surface)) => Ok(surface.clone()),
            Some(Err(message)) => Err(VideoError::VideoModeFailed(message.clone())),
            None => Ok(SurfaceInfo {
                width: request.width,
                height: request.height,
                bits_per_pixel: request.bits_per_pixel,
                gl_renderer: None,
                gl_vendor: None,
            }),
        }
    }

    fn driver_name(&mut self) -> VideoResult<String> {
        self.calls.push(BackendCall::DriverName);
        self.ensure_initialized()?;
        self.driver_name.clone().ok_or_else(|| {
            VideoError::DriverNameUnavailable("no driver name scripted".to_string())
        })
    }

    fn delay(&mut self, duration: Duration) {
        self.calls.push(BackendCall::Delay(duration));
    }
}
