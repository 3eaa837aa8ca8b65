//! Win32 platform implementation

pub mod dpi;
pub mod edit;
pub mod event;
pub mod render;
pub mod tray;
pub mod window;

pub use dpi::{enable_dpi_awareness, DpiInfo};
pub use edit::EditControl;
pub use event::{is_save_shortcut, translate_message, Event};
pub use render::Renderer;
pub use tray::{load_icon, TrayIcon};
pub use window::{
    capture_mouse, centered_geometry, clear_window_callback, create_window, cursor_pos,
    destroy_window, focus, hide_window, invalidate_window, is_window_visible, move_window,
    register_window_class, release_mouse, set_cursor, set_topmost, set_window_callback,
    set_window_geometry, set_window_opacity, show_window, track_mouse_leave,
    unregister_window_class, window_geometry, CursorShape,
};
