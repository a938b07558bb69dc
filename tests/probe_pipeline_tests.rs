//! End-to-end probe runs against the null backend.
//!
//! Each test scripts the backend, runs the whole pipeline and checks the
//! printed report, the returned outcome and the exact backend calls.

use std::time::Duration;

use rstest::rstest;
use vidprobe::probe::{self, AcquisitionPolicy, ProbeConfig, ProbeError, FATAL_EXIT_CODE};
use vidprobe::video::{
    BackendCall, ModeList, PixelFormatInfo, SurfaceInfo, SurfaceKind, VideoInfo,
};
use vidprobe::video::NullBackend;

struct Outcome {
    result: Result<probe::ProbeReport, ProbeError>,
    stdout: String,
    stderr: String,
}

fn run_probe(backend: &mut NullBackend, config: &ProbeConfig) -> Outcome {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = probe::run(backend, config, &mut out, &mut err);
    Outcome {
        result,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

fn raster_config() -> ProbeConfig {
    ProbeConfig::new(AcquisitionPolicy::raster()).with_idle(Duration::ZERO)
}

fn mode_lines(stdout: &str) -> Vec<&str> {
    stdout.lines().filter(|line| line.starts_with('\t')).collect()
}

#[test]
fn init_failure_makes_no_further_calls() {
    let mut backend = NullBackend::new().with_init_failure("No available video device");
    let outcome = run_probe(&mut backend, &raster_config());

    let err = outcome.result.unwrap_err();
    assert!(matches!(err, ProbeError::Init(_)));
    assert_ne!(err.exit_code(), 0);
    assert!(err.to_string().contains("No available video device"));
    assert_eq!(backend.calls(), &[BackendCall::Init]);
}

#[test]
fn no_modes_is_fatal_before_surface_creation() {
    let mut backend = NullBackend::new().with_modes(ModeList::NoModes);
    let outcome = run_probe(&mut backend, &raster_config());

    let err = outcome.result.unwrap_err();
    assert!(matches!(err, ProbeError::NoModes));
    assert_eq!(err.exit_code(), FATAL_EXIT_CODE);
    assert!(!backend.requested_surface());
    assert_eq!(backend.count(&BackendCall::Quit), 1);
}

#[test]
fn empty_explicit_mode_list_is_fatal_and_unreported() {
    let mut backend = NullBackend::new().with_modes(ModeList::Modes(Vec::new()));
    let outcome = run_probe(&mut backend, &raster_config());

    assert!(matches!(outcome.result, Err(ProbeError::NoModes)));
    assert!(!outcome.stdout.contains("No modes available!"));
    assert!(!outcome.stdout.contains("Available Modes:"));
    assert!(!backend.requested_surface());
    assert_eq!(backend.count(&BackendCall::Quit), 1);
}

#[test]
fn mode_query_failure_is_fatal() {
    let mut backend = NullBackend::new().with_mode_query_failure("display 0 gone");
    let outcome = run_probe(&mut backend, &raster_config());

    assert!(matches!(outcome.result, Err(ProbeError::ModeQuery(_))));
    assert!(!backend.requested_surface());
    assert_eq!(backend.count(&BackendCall::Quit), 1);
}

#[test]
fn unrestricted_modes_print_no_list() {
    let mut backend = NullBackend::new().with_modes(ModeList::Unrestricted);
    let outcome = run_probe(&mut backend, &raster_config());

    assert!(outcome.result.is_ok());
    assert!(outcome.stdout.contains("All resolutions available."));
    assert!(!outcome.stdout.contains("Available Modes:"));
    assert!(mode_lines(&outcome.stdout).is_empty());
}

#[rstest]
#[case(&[(640, 480)])]
#[case(&[(1920, 1080), (1280, 720)])]
#[case(&[(2560, 1440), (1920, 1200), (1024, 768), (800, 600), (320, 240)])]
fn mode_list_prints_one_line_per_mode_in_order(#[case] sizes: &[(u32, u32)]) {
    let mut backend = NullBackend::new().with_mode_sizes(sizes);
    let outcome = run_probe(&mut backend, &raster_config());

    assert!(outcome.result.is_ok());
    let expected: Vec<String> = sizes
        .iter()
        .map(|(w, h)| format!("\t{} x {}", w, h))
        .collect();
    assert_eq!(mode_lines(&outcome.stdout), expected);
}

#[test]
fn raster_acquisition_failure_releases_subsystem() {
    let mut backend = NullBackend::new().with_surface_failure("no hardware surface");
    let outcome = run_probe(&mut backend, &raster_config());

    let err = outcome.result.unwrap_err();
    assert!(matches!(err, ProbeError::Acquisition { .. }));
    assert!(err.to_string().starts_with("Couldn't set video mode"));
    assert_ne!(err.exit_code(), 0);
    assert_eq!(backend.calls().last(), Some(&BackendCall::Quit));
    assert_eq!(backend.count(&BackendCall::Quit), 1);
}

#[test]
fn accelerated_acquisition_failure_releases_subsystem() {
    let mut backend = NullBackend::new().with_surface_failure("no accelerated visual");
    let config = ProbeConfig::new(AcquisitionPolicy::accelerated()).with_idle(Duration::ZERO);
    let outcome = run_probe(&mut backend, &config);

    let err = outcome.result.unwrap_err();
    assert!(err.to_string().starts_with("Couldn't set GL mode"));
    assert!(err.to_string().contains("no accelerated visual"));
    assert_eq!(backend.count(&BackendCall::Quit), 1);
    assert!(!backend.is_initialized());
}

#[test]
fn successful_run_idles_then_quits_once() {
    let mut backend = NullBackend::new();
    let config = ProbeConfig::new(AcquisitionPolicy::raster()).with_idle(Duration::from_millis(2000));
    let outcome = run_probe(&mut backend, &config);

    assert!(outcome.result.is_ok());
    assert_eq!(backend.count(&BackendCall::Quit), 1);

    let calls = backend.calls();
    let n = calls.len();
    assert_eq!(calls[n - 2], BackendCall::Delay(Duration::from_millis(2000)));
    assert_eq!(calls[n - 1], BackendCall::Quit);
    assert!(outcome.stdout.contains("...waiting for 2000 ms..."));
    assert!(outcome.stdout.ends_with("Successfully done.\n"));
}

#[test]
fn missing_video_info_is_a_warning() {
    let mut backend = NullBackend::new().without_info("query unsupported");
    let outcome = run_probe(&mut backend, &raster_config());

    let report = outcome.result.unwrap();
    assert!(report.info.is_none());
    assert!(outcome
        .stderr
        .contains("Get the current video hardware information failed: query unsupported"));
    assert!(backend.requested_surface());
}

#[test]
fn missing_driver_name_is_a_warning() {
    let mut backend = NullBackend::new().without_driver_name();
    let outcome = run_probe(&mut backend, &raster_config());

    let report = outcome.result.unwrap();
    assert!(report.driver_name.is_none());
    assert!(outcome.stderr.contains("Failed to obtain the video driver name"));
    assert!(!outcome.stdout.contains("The video driver name is"));
}

#[test]
fn accelerated_policy_requests_gl_context() {
    let mut backend = NullBackend::new();
    let config = ProbeConfig::new(AcquisitionPolicy::accelerated()).with_idle(Duration::ZERO);
    let outcome = run_probe(&mut backend, &config);

    let report = outcome.result.unwrap();
    assert_eq!((report.surface.width, report.surface.height), (800, 600));

    let request = backend
        .calls()
        .iter()
        .find_map(|c| match c {
            BackendCall::SetVideoMode(request) => Some(*request),
            _ => None,
        })
        .unwrap();
    assert_eq!(request.kind, SurfaceKind::OpenGl);
    assert!(backend
        .calls()
        .contains(&BackendCall::SetCaption("vidprobe OpenGL test window".to_string())));
}

#[test]
fn end_to_end_report_reflects_backend_values() {
    let info = VideoInfo {
        hw_available: true,
        wm_available: true,
        blit_hw: true,
        blit_fill: true,
        video_mem_kb: 65_536,
        current_w: 1920,
        current_h: 1080,
        format: PixelFormatInfo::xrgb8888(),
        ..Default::default()
    };
    let mut backend = NullBackend::new()
        .with_info(info)
        .with_mode_sizes(&[(1920, 1080), (1280, 720)])
        .with_surface(SurfaceInfo {
            width: 1024,
            height: 768,
            bits_per_pixel: 32,
            gl_renderer: None,
            gl_vendor: None,
        });
    let outcome = run_probe(&mut backend, &raster_config());

    let report = outcome.result.unwrap();
    assert_eq!(report.info, Some(info));
    assert_eq!(report.surface.width, 1024);
    assert_eq!(report.driver_name.as_deref(), Some("null"));

    let stdout = &outcome.stdout;
    assert!(stdout.contains("Total amount of video memory in Kilobytes: 65536\n"));
    assert!(stdout.contains("Current video resolution is 1920x1080 pixels\n"));
    assert!(stdout.contains("Available Modes:\n\t1920 x 1080\n\t1280 x 720\n"));
    assert!(stdout.contains("The current video surface width is 1024\n"));
    assert!(stdout.contains("The current video surface height is 768\n"));
    assert!(stdout.contains("The current video surface bits per pixel is 32\n"));
    assert!(stdout.contains("The video driver name is null\n"));
    assert!(outcome.stderr.is_empty());
    assert_eq!(backend.count(&BackendCall::Quit), 1);
}
