//! Event types and Win32 message translation

use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::GetKeyState;
use windows::Win32::UI::WindowsAndMessaging::*;

use selfnote::note::Geometry;
use selfnote::state::TrayActivation;

use super::window::WM_APP_TRAY;

/// Virtual key code for 'S'
const VK_S: usize = 0x53;

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Get current modifier state from Windows
    pub fn current() -> Self {
        unsafe {
            Self {
                shift: GetKeyState(0x10) < 0, // VK_SHIFT
                ctrl: GetKeyState(0x11) < 0,  // VK_CONTROL
                alt: GetKeyState(0x12) < 0,   // VK_MENU (Alt)
            }
        }
    }

    pub fn ctrl_only(&self) -> bool {
        self.ctrl && !self.shift && !self.alt
    }
}

/// Application events
#[derive(Clone, Debug)]
pub enum Event {
    /// Left button pressed (client coordinates, physical pixels)
    MouseDown { x: i32, y: i32 },
    /// Left button released
    MouseUp { x: i32, y: i32 },
    /// Mouse moved
    MouseMove { x: i32, y: i32 },
    /// Pointer left the client area
    MouseLeave,
    /// Mouse capture was taken away
    CaptureLost,
    /// Window needs repainting
    Paint,
    /// Client area resized (physical pixels)
    Size { width: i32, height: i32 },
    /// DPI changed; Windows suggests a new window rect
    DpiChanged { dpi: u32, suggested: Geometry },
    /// Cursor shape requested; `over_client` is false over children or non-client parts
    SetCursor { over_client: bool },
    /// Tray icon was clicked
    Tray(TrayActivation),
    /// Window should close
    Close,
    /// Window is being destroyed
    Destroy,
}

fn point_from_lparam(lparam: LPARAM) -> (i32, i32) {
    let x = (lparam.0 & 0xFFFF) as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    (x, y)
}

/// Translate a Win32 message to an Event
pub fn translate_message(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<Event> {
    match msg {
        WM_LBUTTONDOWN => {
            let (x, y) = point_from_lparam(lparam);
            Some(Event::MouseDown { x, y })
        }
        WM_LBUTTONUP => {
            let (x, y) = point_from_lparam(lparam);
            Some(Event::MouseUp { x, y })
        }
        WM_MOUSEMOVE => {
            let (x, y) = point_from_lparam(lparam);
            Some(Event::MouseMove { x, y })
        }
        WM_MOUSELEAVE => Some(Event::MouseLeave),
        WM_CAPTURECHANGED => {
            // lparam holds the window gaining capture
            if lparam.0 as usize == hwnd.0 as usize {
                None
            } else {
                Some(Event::CaptureLost)
            }
        }
        WM_PAINT => Some(Event::Paint),
        WM_SIZE => {
            let width = (lparam.0 & 0xFFFF) as i32;
            let height = ((lparam.0 >> 16) & 0xFFFF) as i32;
            Some(Event::Size { width, height })
        }
        WM_DPICHANGED => {
            let dpi = (wparam.0 & 0xFFFF) as u32;
            let rect = unsafe { *(lparam.0 as *const RECT) };
            Some(Event::DpiChanged {
                dpi,
                suggested: Geometry::new(
                    rect.left,
                    rect.top,
                    rect.right - rect.left,
                    rect.bottom - rect.top,
                ),
            })
        }
        WM_SETCURSOR => {
            let over_self = wparam.0 == hwnd.0 as usize;
            let hit = (lparam.0 & 0xFFFF) as u32;
            Some(Event::SetCursor {
                over_client: over_self && hit == HTCLIENT,
            })
        }
        WM_APP_TRAY => match (lparam.0 & 0xFFFF) as u32 {
            WM_LBUTTONUP => Some(Event::Tray(TrayActivation::Trigger)),
            WM_RBUTTONUP => Some(Event::Tray(TrayActivation::Context)),
            WM_LBUTTONDBLCLK => Some(Event::Tray(TrayActivation::DoubleClick)),
            _ => None,
        },
        WM_CLOSE => Some(Event::Close),
        WM_DESTROY => Some(Event::Destroy),
        _ => None,
    }
}

/// Whether a queued message is the Ctrl+S save shortcut
///
/// Checked in the message loop before dispatch, so it also fires while the
/// edit control has focus.
pub fn is_save_shortcut(msg: &MSG) -> bool {
    msg.message == WM_KEYDOWN && msg.wParam.0 == VK_S && Modifiers::current().ctrl_only()
}
