//! DPI awareness utilities for Windows

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Gdi::{MonitorFromRect, MONITOR_DEFAULTTONEAREST};
use windows::Win32::UI::HiDpi::*;

use selfnote::note::{Geometry, BASE_DPI};

/// Enable per-monitor DPI awareness (call early in main)
pub fn enable_dpi_awareness() -> Result<(), windows::core::Error> {
    unsafe {
        // Try V2 first (Windows 10 1703+)
        if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_ok() {
            return Ok(());
        }
        // Fall back to V1
        SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE)
    }
}

/// DPI information struct
#[derive(Clone, Copy, Debug)]
pub struct DpiInfo {
    pub dpi: u32,
    pub scale_factor: f32,
}

impl DpiInfo {
    pub fn new(dpi: u32) -> Self {
        let dpi = if dpi == 0 { BASE_DPI } else { dpi };
        Self {
            dpi,
            scale_factor: dpi as f32 / BASE_DPI as f32,
        }
    }

    pub fn for_window(hwnd: HWND) -> Self {
        Self::new(unsafe { GetDpiForWindow(hwnd) })
    }

    pub fn for_system() -> Self {
        Self::new(unsafe { GetDpiForSystem() })
    }

    /// DPI of the monitor showing most of `g` (screen coordinates)
    ///
    /// Used for both loading and saving the placement, so the size scale is
    /// the same in both directions.
    pub fn for_rect(g: Geometry) -> Self {
        let rect = RECT {
            left: g.x,
            top: g.y,
            right: g.right(),
            bottom: g.bottom(),
        };
        let (mut dpi_x, mut dpi_y) = (0u32, 0u32);
        unsafe {
            let monitor = MonitorFromRect(&rect, MONITOR_DEFAULTTONEAREST);
            if GetDpiForMonitor(monitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y).is_err() {
                return Self::for_system();
            }
        }
        Self::new(dpi_x)
    }

    /// Logical size to physical pixels
    pub fn to_physical(&self, g: Geometry) -> Geometry {
        g.to_physical(self.dpi)
    }

    /// Physical size to logical pixels
    pub fn to_logical(&self, g: Geometry) -> Geometry {
        g.to_logical(self.dpi)
    }

    /// Font height in physical pixels for a size in points
    pub fn font_px(&self, points: f32) -> i32 {
        (points * self.dpi as f32 / 72.0).round() as i32
    }
}
