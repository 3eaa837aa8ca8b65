//! System tray icon and its context menu

use windows::core::{Error, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::*;

use selfnote::state::TrayCommand;

use super::window::{cursor_pos, WM_APP_TRAY};

/// Identifier of our single icon
const TRAY_ICON_ID: u32 = 1;

/// Tooltip shown when hovering the tray icon
pub const TRAY_TOOLTIP: &str = "Sticky Note";

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Load an icon file, falling back to the stock application icon
pub fn load_icon(path: &std::path::Path) -> HICON {
    let path_wide = wide(&path.to_string_lossy());
    unsafe {
        match LoadImageW(
            None,
            PCWSTR(path_wide.as_ptr()),
            IMAGE_ICON,
            0,
            0,
            LR_LOADFROMFILE | LR_DEFAULTSIZE,
        ) {
            Ok(handle) => {
                log!("Loaded tray icon from {:?}", path);
                HICON(handle.0)
            }
            Err(e) => {
                log!("Tray icon {:?} unavailable ({:?}), using stock icon", path, e);
                LoadIconW(None, IDI_APPLICATION).unwrap_or_default()
            }
        }
    }
}

/// A registered notification-area icon
pub struct TrayIcon {
    data: NOTIFYICONDATAW,
    added: bool,
}

impl TrayIcon {
    /// Add the icon; clicks arrive at `hwnd` as `WM_APP_TRAY`
    pub fn add(hwnd: HWND, icon: HICON) -> Result<Self, Error> {
        let mut data = NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd,
            uID: TRAY_ICON_ID,
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: WM_APP_TRAY,
            hIcon: icon,
            ..Default::default()
        };
        for (slot, ch) in data
            .szTip
            .iter_mut()
            .zip(TRAY_TOOLTIP.encode_utf16().take(127))
        {
            *slot = ch;
        }

        unsafe {
            if !Shell_NotifyIconW(NIM_ADD, &data).as_bool() {
                return Err(Error::from_win32());
            }
        }
        log!("Tray icon added");

        Ok(Self { data, added: true })
    }

    /// Remove the icon from the notification area
    pub fn remove(&mut self) {
        if !self.added {
            return;
        }
        unsafe {
            let _ = Shell_NotifyIconW(NIM_DELETE, &self.data);
        }
        self.added = false;
        log!("Tray icon removed");
    }

    /// Show the context menu at the cursor and wait for a choice
    pub fn show_menu(&self) -> Option<TrayCommand> {
        let hwnd = self.data.hWnd;
        unsafe {
            let menu = match CreatePopupMenu() {
                Ok(m) => m,
                Err(e) => {
                    log!("CreatePopupMenu failed: {:?}", e);
                    return None;
                }
            };

            let labels: Vec<Vec<u16>> = TrayCommand::ALL.iter().map(|c| wide(c.label())).collect();
            for (i, (cmd, label)) in TrayCommand::ALL.iter().zip(&labels).enumerate() {
                if i > 0 {
                    let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
                }
                let _ = AppendMenuW(menu, MF_STRING, cmd.id() as usize, PCWSTR(label.as_ptr()));
            }

            // Without this the menu does not close when clicking elsewhere
            let _ = SetForegroundWindow(hwnd);
            let at = cursor_pos();
            let chosen = TrackPopupMenu(
                menu,
                TPM_RETURNCMD | TPM_NONOTIFY | TPM_RIGHTBUTTON,
                at.x,
                at.y,
                0,
                hwnd,
                None,
            );
            let _ = PostMessageW(hwnd, WM_NULL, WPARAM(0), LPARAM(0));
            let _ = DestroyMenu(menu);

            TrayCommand::from_id(chosen.0 as u32)
        }
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        self.remove();
    }
}
