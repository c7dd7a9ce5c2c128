//! GDI rendering of the bar contents.
//!
//! Classic WM_PAINT drawing: background fill, start button, one slot per
//! tracked window (highlight fill, icon, ellipsized title), and the clock
//! on the right. Geometry comes from `zocalo_core::layout` so clicks and
//! pixels always agree.

use zocalo_core::config::BarConfig;
use zocalo_core::layout::{self, CLOCK_WIDTH, START_WIDTH};
use zocalo_core::mirror::VisualEntry;

use windows::Win32::Foundation::{COLORREF, HWND, RECT, SYSTEMTIME};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DeleteObject, EndPaint, FillRect, HBRUSH, HDC, PAINTSTRUCT,
    SetBkMode, SetTextColor, TRANSPARENT,
};
use windows::Win32::System::SystemInformation::GetLocalTime;
use windows::Win32::UI::WindowsAndMessaging::{
    DI_NORMAL, DT_CENTER, DT_END_ELLIPSIS, DT_NOPREFIX, DT_SINGLELINE, DT_VCENTER, DrawIconEx,
    DrawTextW, GetClientRect, HICON,
};

/// Icon edge length in pixels, drawn vertically centered in the slot.
const ICON_SIZE: i32 = 20;

/// Horizontal padding inside an entry slot.
const ENTRY_PADDING: i32 = 6;

/// Paints the whole bar in response to WM_PAINT.
pub fn paint(hwnd: HWND, config: &BarConfig, entries: &[VisualEntry]) {
    let mut ps = PAINTSTRUCT::default();
    // SAFETY: BeginPaint/EndPaint bracket all drawing; the DC is valid
    // in between and released afterwards.
    unsafe {
        let hdc = BeginPaint(hwnd, &mut ps);
        if !hdc.is_invalid() {
            let mut client = RECT::default();
            let _ = GetClientRect(hwnd, &mut client);
            draw_bar(hdc, &client, config, entries);
        }
        let _ = EndPaint(hwnd, &ps);
    }
}

unsafe fn draw_bar(hdc: HDC, client: &RECT, config: &BarConfig, entries: &[VisualEntry]) {
    let width = client.right - client.left;
    let height = client.bottom - client.top;

    let background = colorref(&config.colors.background, 0x1e1e2e);
    let highlight = colorref(&config.colors.highlight, 0x45475a);
    let text = colorref(&config.colors.text, 0xcdd6f4);

    unsafe {
        fill(hdc, client, background);
        let _ = SetBkMode(hdc, TRANSPARENT);
        let _ = SetTextColor(hdc, text);

        // Start button region.
        let mut start_rect = RECT {
            left: 0,
            top: 0,
            right: START_WIDTH,
            bottom: height,
        };
        draw_label(hdc, "Start", &mut start_rect, DT_CENTER);

        // Window entries.
        for (entry, slot) in entries
            .iter()
            .zip(layout::entry_slots(width, entries.len()))
        {
            if slot.width <= 0 {
                continue;
            }
            let slot_rect = RECT {
                left: slot.x,
                top: 0,
                right: slot.x + slot.width,
                bottom: height,
            };
            if entry.highlighted {
                fill(hdc, &slot_rect, highlight);
            }

            let icon_y = (height - ICON_SIZE) / 2;
            let icon_x = slot.x + ENTRY_PADDING;
            match entry.icon {
                Some(icon) => {
                    let _ = DrawIconEx(
                        hdc,
                        icon_x,
                        icon_y,
                        HICON(icon as *mut _),
                        ICON_SIZE,
                        ICON_SIZE,
                        0,
                        None,
                        DI_NORMAL,
                    );
                }
                None => {
                    // Placeholder block for windows with no icon at all.
                    let block = RECT {
                        left: icon_x,
                        top: icon_y,
                        right: icon_x + ICON_SIZE,
                        bottom: icon_y + ICON_SIZE,
                    };
                    fill(hdc, &block, highlight);
                }
            }

            let mut title_rect = RECT {
                left: icon_x + ICON_SIZE + ENTRY_PADDING,
                top: 0,
                right: slot.x + slot.width - ENTRY_PADDING,
                bottom: height,
            };
            if title_rect.right > title_rect.left {
                draw_label(hdc, &entry.title, &mut title_rect, DT_END_ELLIPSIS);
            }
        }

        // Clock at the right edge.
        let mut clock_rect = RECT {
            left: width - CLOCK_WIDTH,
            top: 0,
            right: width,
            bottom: height,
        };
        draw_label(hdc, &clock_text(&config.clock_format), &mut clock_rect, DT_CENTER);
    }
}

unsafe fn fill(hdc: HDC, rect: &RECT, color: COLORREF) {
    unsafe {
        let brush: HBRUSH = CreateSolidBrush(color);
        let _ = FillRect(hdc, rect, brush);
        let _ = DeleteObject(brush.into());
    }
}

unsafe fn draw_label(
    hdc: HDC,
    text: &str,
    rect: &mut RECT,
    extra: windows::Win32::UI::WindowsAndMessaging::DRAW_TEXT_FORMAT,
) {
    let mut wide: Vec<u16> = text.encode_utf16().collect();
    unsafe {
        let _ = DrawTextW(
            hdc,
            &mut wide,
            rect,
            DT_SINGLELINE | DT_VCENTER | DT_NOPREFIX | extra,
        );
    }
}

/// Formats the current local time using a strftime-like format string.
///
/// Supports `%H` (hour), `%M` (minute), `%S` (second), `%d` (day),
/// `%m` (month), `%Y` (year), and `%%` (literal %).
pub fn clock_text(fmt: &str) -> String {
    // SAFETY: GetLocalTime is a side-effect-free query.
    let st: SYSTEMTIME = unsafe { GetLocalTime() };

    let mut result = String::with_capacity(fmt.len() + 8);
    let mut chars = fmt.chars();

    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.next() {
                Some('H') => result.push_str(&format!("{:02}", st.wHour)),
                Some('M') => result.push_str(&format!("{:02}", st.wMinute)),
                Some('S') => result.push_str(&format!("{:02}", st.wSecond)),
                Some('d') => result.push_str(&format!("{:02}", st.wDay)),
                Some('m') => result.push_str(&format!("{:02}", st.wMonth)),
                Some('Y') => result.push_str(&format!("{}", st.wYear)),
                Some('%') => result.push('%'),
                Some(other) => {
                    result.push('%');
                    result.push(other);
                }
                None => result.push('%'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Parses a `#rrggbb` hex string into a GDI `COLORREF` (0x00bbggrr),
/// falling back to the given `0xrrggbb` default.
fn colorref(hex: &str, fallback: u32) -> COLORREF {
    let rgb = parse_hex(hex).unwrap_or(fallback);
    let (r, g, b) = ((rgb >> 16) & 0xFF, (rgb >> 8) & 0xFF, rgb & 0xFF);
    COLORREF(r | (g << 8) | (b << 16))
}

fn parse_hex(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
