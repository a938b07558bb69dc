//! Console report lines.

use std::io::{self, Write};

use crate::video::{DisplayMode, SurfaceInfo, VideoInfo};

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Print the capability snapshot and pixel format.
pub fn write_video_info<W: Write + ?Sized>(out: &mut W, info: &VideoInfo) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Is it possible to create hardware surfaces? {}", yes_no(info.hw_available))?;
    writeln!(out, "Is there a window manager available? {}", yes_no(info.wm_available))?;
    writeln!(out, "Are hardware to hardware blits accelerated? {}", yes_no(info.blit_hw))?;
    writeln!(out, "Are hardware to hardware colorkey blits accelerated? {}", yes_no(info.blit_hw_cc))?;
    writeln!(out, "Are hardware to hardware alpha blits accelerated? {}", yes_no(info.blit_hw_a))?;
    writeln!(out, "Are software to hardware blits accelerated? {}", yes_no(info.blit_sw))?;
    writeln!(out, "Are software to hardware colorkey blits accelerated? {}", yes_no(info.blit_sw_cc))?;
    writeln!(out, "Are software to hardware alpha blits accelerated? {}", yes_no(info.blit_sw_a))?;
    writeln!(out, "Are color fills accelerated? {}", yes_no(info.blit_fill))?;
    match info.video_memory_kb() {
        Some(kb) => writeln!(out, "Total amount of video memory in Kilobytes: {}", kb)?,
        None => writeln!(out, "Total amount of video memory in Kilobytes: n/a (no hardware surfaces)")?,
    }
    writeln!(
        out,
        "Current video resolution is {}x{} pixels",
        info.current_w, info.current_h
    )?;
    writeln!(out)?;

    let format = &info.format;
    writeln!(out, "Pixel format of current video device is:")?;
    writeln!(out, "----------------------------------------")?;
    writeln!(out, "Palette: {}", if format.palette { "present" } else { "none" })?;
    writeln!(out, "Bits Per Pixel: {}", format.bits_per_pixel)?;
    writeln!(out, "Bytes Per Pixel: {}", format.bytes_per_pixel)?;
    writeln!(
        out,
        "[RGBA]mask: {:#010x} {:#010x} {:#010x} {:#010x}",
        format.rmask, format.gmask, format.bmask, format.amask
    )
}

/// Print the line for a driver that accepts any resolution.
pub fn write_unrestricted<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "All resolutions available.")
}

/// Print an explicit mode list, one line per mode.
pub fn write_modes<W: Write + ?Sized>(out: &mut W, modes: &[DisplayMode]) -> io::Result<()> {
    writeln!(out, "Available Modes:")?;
    for mode in modes {
        writeln!(out, "\t{}", mode)?;
    }
    Ok(())
}

/// Print the acquired surface.
pub fn write_surface<W: Write + ?Sized>(out: &mut W, surface: &SurfaceInfo) -> io::Result<()> {
    writeln!(out, "The current video surface width is {}", surface.width)?;
    writeln!(out, "The current video surface height is {}", surface.height)?;
    writeln!(
        out,
        "The current video surface bits per pixel is {}",
        surface.bits_per_pixel
    )?;
    if let Some(renderer) = &surface.gl_renderer {
        writeln!(out, "The OpenGL renderer is {}", renderer)?;
    }
    if let Some(vendor) = &surface.gl_vendor {
        writeln!(out, "The OpenGL vendor is {}", vendor)?;
    }
    Ok(())
}
