use zocalo_core::{Rect, ShellResult};

use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use crate::dpi;

/// Returns the full bounds of the primary display.
///
/// Fails when no display surface is available yet (e.g. during session
/// startup) — the caller reports that and continues degraded rather than
/// aborting.
pub fn primary_screen() -> ShellResult<Rect> {
    // SAFETY: GetSystemMetrics is a side-effect-free query.
    let (width, height) = unsafe {
        (
            GetSystemMetrics(SM_CXSCREEN),
            GetSystemMetrics(SM_CYSCREEN),
        )
    };

    if width <= 0 || height <= 0 {
        return Err("no display surface available".into());
    }

    Ok(Rect::new(0, 0, width, height))
}

/// Computes the bar's rectangle: a bottom-anchored strip across the full
/// primary screen width, with the logical height scaled by the system DPI.
pub fn bar_rect(logical_height: i32) -> ShellResult<Rect> {
    let screen = primary_screen()?;
    let height = (f64::from(logical_height) * dpi::system_scale()).round() as i32;
    Ok(screen.bottom_strip(height))
}
