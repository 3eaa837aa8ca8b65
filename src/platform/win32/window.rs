//! Win32 window creation and management

use std::cell::RefCell;

use windows::core::{w, Error, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, InvalidateRect, MonitorFromWindow, HBRUSH, MONITORINFO,
    MONITOR_DEFAULTTOPRIMARY,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    ReleaseCapture, SetCapture, SetFocus, TrackMouseEvent, TME_LEAVE, TRACKMOUSEEVENT,
};
use windows::Win32::UI::WindowsAndMessaging::*;

use selfnote::interaction::Point;
use selfnote::note::Geometry;

/// Callback message id the tray icon posts to the window
pub const WM_APP_TRAY: u32 = WM_APP + 1;

type WindowCallback = Box<dyn FnMut(HWND, u32, WPARAM, LPARAM) -> Option<LRESULT>>;

/// Thread-local storage for window procedure callback data
thread_local! {
    static WINDOW_CALLBACK: RefCell<Option<WindowCallback>> = RefCell::new(None);
}

/// Set the window procedure callback
pub fn set_window_callback<F>(callback: F)
where
    F: FnMut(HWND, u32, WPARAM, LPARAM) -> Option<LRESULT> + 'static,
{
    WINDOW_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(Box::new(callback));
    });
}

/// Clear the window procedure callback
pub fn clear_window_callback() {
    WINDOW_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Window procedure
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    // A nested message (e.g. sent from inside the callback) finds the cell
    // borrowed and gets default handling.
    let result = WINDOW_CALLBACK.with(|cb| match cb.try_borrow_mut() {
        Ok(mut guard) => guard
            .as_mut()
            .and_then(|callback| callback(hwnd, msg, wparam, lparam)),
        Err(_) => None,
    });

    if let Some(r) = result {
        return r;
    }

    // Default handling
    match msg {
        WM_CLOSE => {
            // Never destroy on close - the note lives in the tray
            log!("WM_CLOSE fell through - hiding window");
            let _ = ShowWindow(hwnd, SW_HIDE);
            LRESULT(0)
        }
        WM_DESTROY => {
            log!("WM_DESTROY received - posting quit message");
            PostQuitMessage(0);
            LRESULT(0)
        }
        WM_ERASEBKGND => {
            // Prevent background erase flickering - we handle all painting
            LRESULT(1)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

const WINDOW_CLASS_NAME: PCWSTR = w!("SelfNoteWindowClass");

/// Register the window class (call once at startup)
pub fn register_window_class() -> Result<(), Error> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: hinstance.into(),
            hIcon: HICON::default(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH::default(), // No background brush - we paint everything
            lpszMenuName: PCWSTR::null(),
            lpszClassName: WINDOW_CLASS_NAME,
            hIconSm: HICON::default(),
        };

        let atom = RegisterClassExW(&wc);
        if atom == 0 {
            return Err(Error::from_win32());
        }

        Ok(())
    }
}

/// Unregister the window class (call at shutdown)
pub fn unregister_window_class() {
    unsafe {
        let _ = GetModuleHandleW(None).map(|h| {
            let _ = UnregisterClassW(WINDOW_CLASS_NAME, h);
        });
    }
}

/// A `width` x `height` (physical) rect centred on the primary monitor's work area
pub fn centered_geometry(width: i32, height: i32) -> Geometry {
    unsafe {
        let monitor = MonitorFromWindow(HWND::default(), MONITOR_DEFAULTTOPRIMARY);
        let mut monitor_info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        let _ = GetMonitorInfoW(monitor, &mut monitor_info);

        let work_area = monitor_info.rcWork;
        let work_width = work_area.right - work_area.left;
        let work_height = work_area.bottom - work_area.top;

        Geometry::new(
            work_area.left + (work_width - width) / 2,
            work_area.top + (work_height - height) / 2,
            width,
            height,
        )
    }
}

/// Create the note window (hidden) at `geometry` in physical pixels
pub fn create_window(geometry: Geometry) -> Result<HWND, Error> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        let hwnd = CreateWindowExW(
            // Tool window (no taskbar button), layered for translucency
            WS_EX_TOOLWINDOW | WS_EX_LAYERED,
            WINDOW_CLASS_NAME,
            w!("Sticky Note"),
            // Popup window (no frame); children are not painted over
            WS_POPUP | WS_CLIPCHILDREN,
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
            None,
            None,
            hinstance,
            None,
        )?;

        Ok(hwnd)
    }
}

/// Set window opacity (0.0 = fully transparent, 1.0 = fully opaque)
pub fn set_window_opacity(hwnd: HWND, opacity: f32) {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    log!("set_window_opacity: opacity={}, alpha={}", opacity, alpha);
    unsafe {
        let _ = SetLayeredWindowAttributes(hwnd, None, alpha, LWA_ALPHA);
    }
}

/// Show the window in its normal state and bring it to the front
pub fn show_window(hwnd: HWND) {
    log!("show_window() called, hwnd={:?}", hwnd);
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOWNORMAL);
        let _ = SetForegroundWindow(hwnd);
    }
}

pub fn hide_window(hwnd: HWND) {
    log!("hide_window() called, hwnd={:?}", hwnd);
    unsafe {
        let _ = ShowWindow(hwnd, SW_HIDE);
    }
}

pub fn is_window_visible(hwnd: HWND) -> bool {
    unsafe { IsWindowVisible(hwnd).as_bool() }
}

/// Add or remove the always-on-top z-order flag
pub fn set_topmost(hwnd: HWND, topmost: bool) {
    log!("set_topmost({})", topmost);
    let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
    unsafe {
        let _ = SetWindowPos(
            hwnd,
            insert_after,
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
        );
    }
}

/// Move the window without resizing it
pub fn move_window(hwnd: HWND, origin: Point) {
    unsafe {
        let _ = SetWindowPos(
            hwnd,
            HWND::default(),
            origin.x,
            origin.y,
            0,
            0,
            SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
        );
    }
}

/// Move and resize the window (physical pixels)
pub fn set_window_geometry(hwnd: HWND, g: Geometry) {
    unsafe {
        let _ = SetWindowPos(
            hwnd,
            HWND::default(),
            g.x,
            g.y,
            g.width,
            g.height,
            SWP_NOZORDER | SWP_NOACTIVATE,
        );
    }
}

/// Current window rect in screen coordinates (physical pixels)
pub fn window_geometry(hwnd: HWND) -> Geometry {
    let mut rect = RECT::default();
    unsafe {
        let _ = GetWindowRect(hwnd, &mut rect);
    }
    Geometry::new(
        rect.left,
        rect.top,
        rect.right - rect.left,
        rect.bottom - rect.top,
    )
}

/// Cursor position in screen coordinates
pub fn cursor_pos() -> Point {
    let mut pt = POINT::default();
    unsafe {
        let _ = GetCursorPos(&mut pt);
    }
    Point::new(pt.x, pt.y)
}

/// Route all mouse input to the window until released
pub fn capture_mouse(hwnd: HWND) {
    unsafe {
        SetCapture(hwnd);
    }
}

pub fn release_mouse() {
    unsafe {
        let _ = ReleaseCapture();
    }
}

/// Ask for a WM_MOUSELEAVE when the pointer leaves the client area
pub fn track_mouse_leave(hwnd: HWND) {
    let mut tme = TRACKMOUSEEVENT {
        cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
        dwFlags: TME_LEAVE,
        hwndTrack: hwnd,
        dwHoverTime: 0,
    };
    unsafe {
        let _ = TrackMouseEvent(&mut tme);
    }
}

/// Give keyboard focus to a window (e.g. the edit control)
pub fn focus(hwnd: HWND) {
    unsafe {
        let _ = SetFocus(hwnd);
    }
}

/// Cursor shapes the note uses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorShape {
    Arrow,
    /// Diagonal from bottom-left to top-right
    SizeNeSw,
    /// Diagonal from top-left to bottom-right
    SizeNwSe,
}

pub fn set_cursor(shape: CursorShape) {
    let id = match shape {
        CursorShape::Arrow => IDC_ARROW,
        CursorShape::SizeNeSw => IDC_SIZENESW,
        CursorShape::SizeNwSe => IDC_SIZENWSE,
    };
    unsafe {
        if let Ok(cursor) = LoadCursorW(None, id) {
            SetCursor(cursor);
        }
    }
}

/// Request window repaint
pub fn invalidate_window(hwnd: HWND) {
    unsafe {
        let _ = InvalidateRect(hwnd, None, false);
    }
}

/// Get window client area size
pub fn get_client_size(hwnd: HWND) -> (i32, i32) {
    unsafe {
        let mut rect = RECT::default();
        let _ = GetClientRect(hwnd, &mut rect);
        (rect.right - rect.left, rect.bottom - rect.top)
    }
}

/// Destroy the window
pub fn destroy_window(hwnd: HWND) {
    unsafe {
        let _ = DestroyWindow(hwnd);
    }
}
