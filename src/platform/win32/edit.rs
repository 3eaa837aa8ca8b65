//! Multi-line EDIT child control hosting the note text

use windows::core::{w, Error, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateFontIndirectW, CreateSolidBrush, DeleteObject, SetBkColor, SetTextColor, HBRUSH, HDC,
    HFONT, HGDIOBJ, LOGFONTW,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

use selfnote::note::Geometry;
use selfnote::style::Color;
use selfnote::text::{from_control_text, to_control_text};

/// Child window id of the edit control
const EDIT_CONTROL_ID: usize = 100;

/// Regular font weight
const FW_REGULAR: i32 = 400;

/// The text area of the note
pub struct EditControl {
    hwnd: HWND,
    font: HFONT,
    background: HBRUSH,
    background_color: Color,
    text_color: Color,
}

impl EditControl {
    /// Create the control as a child of `parent` (geometry in client pixels)
    pub fn create(parent: HWND, bounds: Geometry, background: Color, text: Color) -> Result<Self, Error> {
        unsafe {
            let hinstance = GetModuleHandleW(None)?;
            let style = WS_CHILD
                | WS_VISIBLE
                | WS_VSCROLL
                | WINDOW_STYLE((ES_MULTILINE | ES_AUTOVSCROLL | ES_WANTRETURN) as u32);

            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE(0),
                w!("EDIT"),
                PCWSTR::null(),
                style,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                parent,
                HMENU(EDIT_CONTROL_ID as *mut core::ffi::c_void),
                hinstance,
                None,
            )?;

            // Lift the 32K default; 0 means the maximum for multi-line controls
            SendMessageW(hwnd, EM_SETLIMITTEXT, WPARAM(0), LPARAM(0));

            let brush = CreateSolidBrush(COLORREF(background.to_colorref()));
            log!("EditControl created: hwnd={:?}", hwnd);

            Ok(Self {
                hwnd,
                font: HFONT::default(),
                background: brush,
                background_color: background,
                text_color: text,
            })
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Replace the font; `height_px` is the physical pixel height
    pub fn set_font(&mut self, family: &str, height_px: i32) {
        let mut logfont = LOGFONTW {
            lfHeight: -height_px,
            lfWeight: FW_REGULAR,
            ..Default::default()
        };
        for (slot, ch) in logfont
            .lfFaceName
            .iter_mut()
            .zip(family.encode_utf16().take(31))
        {
            *slot = ch;
        }

        unsafe {
            let font = CreateFontIndirectW(&logfont);
            if font.is_invalid() {
                log!("CreateFontIndirectW failed for {:?}", family);
                return;
            }
            SendMessageW(
                self.hwnd,
                WM_SETFONT,
                WPARAM(font.0 as usize),
                LPARAM(1),
            );
            self.release_font();
            self.font = font;
        }
        log!("EditControl font: {} {}px", family, height_px);
    }

    fn release_font(&mut self) {
        if !self.font.is_invalid() {
            unsafe {
                let _ = DeleteObject(HGDIOBJ(self.font.0));
            }
            self.font = HFONT::default();
        }
    }

    /// Move the control (client pixels of the parent)
    pub fn set_bounds(&self, bounds: Geometry) {
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                HWND::default(),
                bounds.x,
                bounds.y,
                bounds.width.max(0),
                bounds.height.max(0),
                SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    /// Current text with LF line endings
    pub fn text(&self) -> String {
        unsafe {
            let len = GetWindowTextLengthW(self.hwnd);
            if len <= 0 {
                return String::new();
            }
            let mut buf = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(self.hwnd, &mut buf);
            buf.truncate(copied.max(0) as usize);
            from_control_text(&String::from_utf16_lossy(&buf))
        }
    }

    /// Replace the text; `content` uses LF line endings
    pub fn set_text(&self, content: &str) {
        let wide: Vec<u16> = to_control_text(content)
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect();
        unsafe {
            if let Err(e) = SetWindowTextW(self.hwnd, PCWSTR(wide.as_ptr())) {
                log!("SetWindowTextW failed: {:?}", e);
            }
        }
    }

    /// Answer WM_CTLCOLOREDIT so the control matches the note palette
    pub fn on_ctl_color(&self, hdc: HDC) -> LRESULT {
        unsafe {
            SetBkColor(hdc, COLORREF(self.background_color.to_colorref()));
            SetTextColor(hdc, COLORREF(self.text_color.to_colorref()));
        }
        LRESULT(self.background.0 as isize)
    }
}

impl Drop for EditControl {
    fn drop(&mut self) {
        self.release_font();
        unsafe {
            let _ = DeleteObject(HGDIOBJ(self.background.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent_window() -> HWND {
        unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                w!("STATIC"),
                PCWSTR::null(),
                WS_POPUP,
                0,
                0,
                200,
                200,
                None,
                None,
                GetModuleHandleW(None).unwrap(),
                None,
            )
            .unwrap()
        }
    }

    #[test]
    fn test_text_limit_is_lifted() {
        let parent = parent_window();
        let edit = EditControl::create(
            parent,
            Geometry::new(0, 0, 100, 100),
            Color::WHITE,
            Color::BLACK,
        )
        .unwrap();

        let limit = unsafe { SendMessageW(edit.hwnd(), EM_GETLIMITTEXT, WPARAM(0), LPARAM(0)) };
        assert!(limit.0 as u32 > 32_767);

        let long = "x".repeat(40_000);
        edit.set_text(&long);
        assert_eq!(edit.text().len(), 40_000);

        drop(edit);
        unsafe {
            let _ = DestroyWindow(parent);
        }
    }
}
