use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, GetDpiForSystem, SetProcessDpiAwarenessContext,
};

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without this, Windows scales coordinates for us based on the primary
/// monitor's DPI and the bar would be positioned in virtualized pixels.
/// Must be called once at process startup, before creating any windows.
pub fn enable_dpi_awareness() {
    // SAFETY: SetProcessDpiAwarenessContext is safe to call once at startup.
    // If it fails (e.g. already set via manifest), we ignore the error.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Returns the system DPI scale factor (1.0 at 96 DPI).
///
/// Used to turn the logical bar height from the config into device pixels.
pub fn system_scale() -> f64 {
    // SAFETY: GetDpiForSystem is a side-effect-free query.
    let dpi = unsafe { GetDpiForSystem() };
    if dpi == 0 { 1.0 } else { f64::from(dpi) / 96.0 }
}
