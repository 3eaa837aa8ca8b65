//! Note window application
//!
//! Owns the Win32 pieces (render target, edit control, tray icon) and feeds
//! input into [`NoteState`], applying whatever it decides.

use windows::core::Error;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::DirectWrite::IDWriteTextFormat;
use windows::Win32::Graphics::Gdi::{ValidateRect, HDC};
use windows::Win32::UI::WindowsAndMessaging::{MINMAXINFO, WM_CTLCOLOREDIT, WM_GETMINMAXINFO};

use selfnote::layout::{NoteLayout, Region};
use selfnote::log::exe_dir;
use selfnote::note::{Geometry, Note, MIN_HEIGHT, MIN_WIDTH};
use selfnote::rect::Rect;
use selfnote::state::{Command, NoteState, PointerEffect, TrayCommand, TrayResponse};
use selfnote::style::{Color, Palette};
use selfnote::variant::GripCorner;
use selfnote::{NoteStore, Settings};

use crate::platform::win32::{
    capture_mouse, cursor_pos, destroy_window, focus, get_client_size, hide_window,
    invalidate_window, is_window_visible, load_icon, move_window, release_mouse, set_cursor,
    set_topmost, set_window_geometry, show_window, track_mouse_leave, translate_message,
    window_geometry, CursorShape, DpiInfo, EditControl, Event, Renderer, TrayIcon,
};

/// Label of the save button
const SAVE_LABEL: &str = "Save";
/// Point size of the save label
const SAVE_LABEL_SIZE: f32 = 9.0;
/// Corner radius of the button backgrounds
const BUTTON_RADIUS: f32 = 3.0;
/// Spacing of the grip ridges
const GRIP_RIDGE_STEP: f32 = 4.0;

pub struct App {
    hwnd: HWND,
    renderer: Renderer,
    edit: EditControl,
    tray: TrayIcon,
    state: NoteState,
    store: NoteStore,
    settings: Settings,
    palette: Palette,
    layout: NoteLayout,
    dpi: DpiInfo,
    label_format: Option<IDWriteTextFormat>,
    tracking_leave: bool,
}

impl App {
    /// Build the app around an already created (hidden) window
    pub fn new(hwnd: HWND, settings: Settings, store: NoteStore, note: &Note) -> Result<Self, Error> {
        log!("App::new() starting");

        let renderer = Renderer::new(hwnd)?;
        let dpi = renderer.dpi();
        let palette = Palette::with_overrides(&settings.palette);

        let (width, height) = get_client_size(hwnd);
        let layout = NoteLayout::compute(
            width as f32 / dpi.scale_factor,
            height as f32 / dpi.scale_factor,
            settings.variant,
        );

        let mut edit = EditControl::create(
            hwnd,
            physical_bounds(layout.text_rect(), dpi),
            palette.background,
            palette.text,
        )?;
        edit.set_font(settings.font_family(), dpi.font_px(settings.font_size));
        edit.set_text(&note.content);

        let icon_path = exe_dir().join(settings.variant.icon_file_name());
        let tray = TrayIcon::add(hwnd, load_icon(&icon_path))?;

        let mut state = NoteState::new(settings.variant, note.pinned);
        let (min_width, min_height) = min_size_for(dpi);
        state.set_min_size(min_width, min_height);

        let label_format = renderer
            .create_label_format(settings.font_family(), SAVE_LABEL_SIZE * 96.0 / 72.0)
            .inspect_err(|e| log!("Save label format unavailable: {:?}", e))
            .ok();

        log!(
            "App::new() done: variant={:?}, pinned={}, client {}x{}",
            settings.variant,
            note.pinned,
            width,
            height
        );

        Ok(Self {
            hwnd,
            renderer,
            edit,
            tray,
            state,
            store,
            settings,
            palette,
            layout,
            dpi,
            label_format,
            tracking_leave: false,
        })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Apply the loaded pin state and show the window if the variant starts visible
    pub fn start(&mut self) {
        let visible = self.settings.variant.starts_visible();
        set_topmost(self.hwnd, self.state.is_pinned());
        if visible {
            self.show();
        }
        log!("App started: visible={}", visible);
    }

    /// Handle window message
    pub fn handle_message(
        &mut self,
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> Option<LRESULT> {
        if let Some(event) = translate_message(hwnd, msg, wparam, lparam) {
            return self.handle_event(event);
        }

        match msg {
            WM_CTLCOLOREDIT if lparam.0 as usize == self.edit.hwnd().0 as usize => {
                Some(self.edit.on_ctl_color(HDC(wparam.0 as _)))
            }
            WM_GETMINMAXINFO => {
                let info = unsafe { &mut *(lparam.0 as *mut MINMAXINFO) };
                let (min_width, min_height) = self.min_size();
                info.ptMinTrackSize.x = min_width;
                info.ptMinTrackSize.y = min_height;
                Some(LRESULT(0))
            }
            _ => None,
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<LRESULT> {
        match event {
            Event::MouseDown { x, y } => {
                let region = self.region_at(x, y);
                let effect =
                    self.state
                        .pointer_down(region, cursor_pos(), window_geometry(self.hwnd));
                self.apply_effect(effect);
                Some(LRESULT(0))
            }
            Event::MouseMove { x, y } => {
                if !self.tracking_leave {
                    track_mouse_leave(self.hwnd);
                    self.tracking_leave = true;
                }
                let region = self.region_at(x, y);
                let effect = self.state.pointer_move(region, cursor_pos());
                self.apply_effect(effect);
                Some(LRESULT(0))
            }
            Event::MouseUp { x, y } => {
                let region = self.region_at(x, y);
                let command = self.state.pointer_up(region);
                release_mouse();
                invalidate_window(self.hwnd);
                if let Some(command) = command {
                    self.run_command(command);
                }
                Some(LRESULT(0))
            }
            Event::MouseLeave => {
                self.tracking_leave = false;
                let effect = self.state.pointer_leave();
                self.apply_effect(effect);
                Some(LRESULT(0))
            }
            Event::CaptureLost => {
                log!("Mouse capture lost, cancelling gestures");
                self.state.cancel_gestures();
                invalidate_window(self.hwnd);
                Some(LRESULT(0))
            }
            Event::Paint => {
                self.paint();
                Some(LRESULT(0))
            }
            Event::Size { width, height } => {
                self.relayout(width, height);
                Some(LRESULT(0))
            }
            Event::DpiChanged { dpi, suggested } => {
                self.handle_dpi_change(dpi, suggested);
                Some(LRESULT(0))
            }
            Event::SetCursor { over_client } => {
                if over_client && (self.state.is_resizing() || self.state.hovered() == Region::SizeGrip)
                {
                    set_cursor(match self.state.variant().grip_corner() {
                        GripCorner::BottomLeft => CursorShape::SizeNeSw,
                        GripCorner::BottomRight => CursorShape::SizeNwSe,
                    });
                    Some(LRESULT(1))
                } else {
                    None
                }
            }
            Event::Tray(activation) => {
                match self.state.on_tray_activation(activation) {
                    TrayResponse::ToggleVisibility => self.toggle_visibility(),
                    TrayResponse::ShowMenu => {
                        if let Some(choice) = self.tray.show_menu() {
                            self.run_tray_command(choice);
                        }
                    }
                    TrayResponse::Ignore => {}
                }
                Some(LRESULT(0))
            }
            Event::Close => {
                log!("Close requested - hiding to tray");
                self.hide();
                Some(LRESULT(0))
            }
            // Default handling posts the quit message
            Event::Destroy => None,
        }
    }

    /// Region under a client point given in physical pixels
    fn region_at(&self, x: i32, y: i32) -> Region {
        let scale = self.dpi.scale_factor;
        self.layout.hit_test(x as f32 / scale, y as f32 / scale)
    }

    fn apply_effect(&mut self, effect: PointerEffect) {
        match effect {
            PointerEffect::None => {}
            PointerEffect::Repaint => invalidate_window(self.hwnd),
            PointerEffect::Move(origin) => move_window(self.hwnd, origin),
            PointerEffect::Resize(geometry) => {
                set_window_geometry(self.hwnd, geometry);
                // The nested WM_SIZE arrives while we are borrowed, so lay out here
                let (width, height) = get_client_size(self.hwnd);
                self.relayout(width, height);
            }
            PointerEffect::Capture => {
                capture_mouse(self.hwnd);
                invalidate_window(self.hwnd);
            }
        }
    }

    fn run_command(&mut self, command: Command) {
        log!("Command: {:?}", command);
        match command {
            Command::TogglePin => {
                let pinned = self.state.toggle_pin();
                set_topmost(self.hwnd, pinned);
                // Reapplying z-order flags may leave the window hidden behind others
                self.show();
            }
            Command::Hide => self.hide(),
            Command::Save => self.save(),
        }
    }

    fn run_tray_command(&mut self, command: TrayCommand) {
        log!("Tray menu: {:?}", command);
        match command {
            TrayCommand::ToggleVisibility => self.toggle_visibility(),
            TrayCommand::Quit => self.quit(),
        }
    }

    fn show(&mut self) {
        self.state.set_visible(true);
        show_window(self.hwnd);
        focus(self.edit.hwnd());
        invalidate_window(self.hwnd);
    }

    fn hide(&mut self) {
        self.state.request_close();
        release_mouse();
        hide_window(self.hwnd);
    }

    /// Show the note if hidden, hide it otherwise
    pub fn toggle_visibility(&mut self) {
        // A WM_CLOSE handled by the default window proc hides without telling us
        self.state.sync_visible(is_window_visible(self.hwnd));
        if self.state.is_visible() {
            self.hide();
        } else {
            self.show();
        }
    }

    /// The note as it should be persisted: text, placement, pin state
    fn snapshot(&self) -> Note {
        // Same monitor lookup as start-up, so restoring reproduces this size
        let placement = window_geometry(self.hwnd);
        Note {
            content: self.edit.text(),
            geometry: Some(DpiInfo::for_rect(placement).to_logical(placement)),
            pinned: self.state.is_pinned(),
        }
    }

    /// Write the note to disk; failures are only logged
    pub fn save(&mut self) {
        let note = self.snapshot();
        match self.store.save(&note) {
            Ok(()) => log!(
                "Note saved to {:?} ({} chars)",
                self.store.path(),
                note.content.chars().count()
            ),
            Err(e) => log!("Failed to save note: {}", e),
        }
    }

    /// Remove the tray icon and tear the window down (no implicit save)
    fn quit(&mut self) {
        log!("Quit requested");
        self.tray.remove();
        destroy_window(self.hwnd);
    }

    fn min_size(&self) -> (i32, i32) {
        min_size_for(self.dpi)
    }

    /// Recompute the layout for a client area in physical pixels
    fn relayout(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        let scale = self.dpi.scale_factor;
        self.layout = NoteLayout::compute(
            width as f32 / scale,
            height as f32 / scale,
            self.state.variant(),
        );
        self.edit
            .set_bounds(physical_bounds(self.layout.text_rect(), self.dpi));
        if let Err(e) = self.renderer.handle_resize() {
            log!("Renderer resize failed: {:?}", e);
        }
        invalidate_window(self.hwnd);
    }

    fn handle_dpi_change(&mut self, new_dpi: u32, suggested: Geometry) {
        log!("DPI changed to {}, suggested {:?}", new_dpi, suggested);
        self.dpi = DpiInfo::new(new_dpi);
        self.renderer.handle_dpi_change(new_dpi);
        self.edit
            .set_font(self.settings.font_family(), self.dpi.font_px(self.settings.font_size));
        let (min_width, min_height) = self.min_size();
        self.state.set_min_size(min_width, min_height);

        set_window_geometry(self.hwnd, suggested);
        let (width, height) = get_client_size(self.hwnd);
        self.relayout(width, height);
    }

    /// Paint the chrome; the edit control paints itself
    fn paint(&mut self) {
        if self.renderer.begin_draw() {
            self.renderer.clear(self.palette.background);
            if let Err(e) = self.draw_chrome() {
                log!("paint: draw failed: {:?}", e);
            }
            if let Err(e) = self.renderer.end_draw() {
                log!("paint: end_draw failed: {:?}", e);
            }
        }
        unsafe {
            let _ = ValidateRect(self.hwnd, None);
        }
    }

    fn draw_chrome(&mut self) -> Result<(), Error> {
        let layout = self.layout;
        let palette = self.palette;
        let hovered = self.state.hovered();
        let pressed = self.state.pressed();

        self.renderer.fill_rect(layout.title_bar, palette.title_bar)?;

        // Pin button
        let pin = layout.pin_button;
        if self.state.is_pinned() {
            self.renderer
                .fill_rounded_rect(pin, BUTTON_RADIUS, palette.pin_checked)?;
        } else if hovered == Region::PinButton {
            self.renderer
                .fill_rounded_rect(pin, BUTTON_RADIUS, palette.button_hover)?;
        }
        let (cx, cy) = pin.center();
        let head = if self.state.is_pinned() {
            Color::WHITE
        } else {
            palette.pin_glyph
        };
        self.renderer.draw_line(cx, cy - 1.0, cx, cy + 7.0, palette.close_glyph, 1.5)?;
        self.renderer.fill_circle(cx, cy - 3.0, 4.0, head)?;

        // Close button
        let close = layout.close_button;
        let glyph = if hovered == Region::CloseButton {
            self.renderer
                .fill_rounded_rect(close, BUTTON_RADIUS, palette.close_hover)?;
            palette.close_glyph_hover
        } else {
            palette.close_glyph
        };
        let (cx, cy) = close.center();
        self.renderer.draw_line(cx - 4.0, cy - 4.0, cx + 4.0, cy + 4.0, glyph, 1.5)?;
        self.renderer.draw_line(cx - 4.0, cy + 4.0, cx + 4.0, cy - 4.0, glyph, 1.5)?;

        // Save button
        let save = layout.save_button;
        let save_fill = match (pressed, hovered) {
            (Region::SaveButton, Region::SaveButton) => Some(palette.save_pressed),
            (_, Region::SaveButton) => Some(palette.save_hover),
            _ => None,
        };
        if let Some(fill) = save_fill {
            self.renderer.fill_rounded_rect(save, BUTTON_RADIUS, fill)?;
        }
        self.renderer.draw_rect(save.inset(0.5), palette.save_border, 1.0)?;
        if let Some(format) = self.label_format.clone() {
            self.renderer
                .draw_text(SAVE_LABEL, &format, save, palette.save_text)?;
        }

        self.draw_grip(layout.size_grip, palette.grip)?;

        // 1px border around everything
        self.renderer
            .draw_rect(layout.bounds.inset(0.5), palette.border, 1.0)?;
        Ok(())
    }

    /// Diagonal ridges pointing at the corner the grip resizes from
    fn draw_grip(&mut self, grip: Rect, color: Color) -> Result<(), Error> {
        let mut offset = GRIP_RIDGE_STEP;
        while offset < grip.width() {
            match self.state.variant().grip_corner() {
                GripCorner::BottomRight => self.renderer.draw_line(
                    grip.right - offset,
                    grip.bottom,
                    grip.right,
                    grip.bottom - offset,
                    color,
                    1.0,
                )?,
                GripCorner::BottomLeft => self.renderer.draw_line(
                    grip.left + offset,
                    grip.bottom,
                    grip.left,
                    grip.bottom - offset,
                    color,
                    1.0,
                )?,
            }
            offset += GRIP_RIDGE_STEP;
        }
        Ok(())
    }
}

/// Minimum window size in physical pixels
fn min_size_for(dpi: DpiInfo) -> (i32, i32) {
    let min = dpi.to_physical(Geometry::new(0, 0, MIN_WIDTH, MIN_HEIGHT));
    (min.width, min.height)
}

/// Logical layout rect to physical child-window bounds
fn physical_bounds(rect: Rect, dpi: DpiInfo) -> Geometry {
    let scaled = rect.scale(dpi.scale_factor);
    Geometry::new(
        scaled.left.round() as i32,
        scaled.top.round() as i32,
        scaled.width().round() as i32,
        scaled.height().round() as i32,
    )
}
