//! SelfNote - a minimal desktop sticky note
//!
//! One frameless, translucent note that lives in the system tray.
//! Click the tray icon to show or hide it, Ctrl+S or the save button to
//! write it to disk.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[macro_use]
extern crate selfnote;

#[cfg(windows)]
mod app;
#[cfg(windows)]
mod platform;

#[cfg(windows)]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, TranslateMessage, MSG,
    };

    use selfnote::note::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use selfnote::store::{self, NoteStore};
    use selfnote::{log, Settings};

    use app::App;
    use platform::win32::{
        self, centered_geometry, create_window, enable_dpi_awareness, is_save_shortcut,
        register_window_class, set_window_callback, set_window_opacity, unregister_window_class,
        DpiInfo,
    };

    // Settings decide where the log goes, so they load before logging starts
    let settings_path = Settings::find_config_path();
    let settings_result = match settings_path {
        Some(ref path) => Settings::load_from_path(path).map(Some),
        None => Ok(None),
    };
    let settings = settings_result.as_ref().ok().cloned().flatten().unwrap_or_default();

    if let Some(dir) = store::log_dir_for(&settings) {
        log::init(&dir);
    }
    log!("main() starting");

    match (&settings_path, &settings_result) {
        (Some(path), Ok(_)) => log!("Settings loaded from {:?}", path),
        (Some(path), Err(e)) => log!("Failed to load settings from {:?}: {}, using defaults", path, e),
        (None, _) => log!("No settings file found, using defaults"),
    }
    log!("Settings: {:?}", settings);

    log!("Enabling DPI awareness...");
    if let Err(e) = enable_dpi_awareness() {
        log!("Warning: Failed to enable DPI awareness: {:?}", e);
    }

    let store = match NoteStore::open_default(&settings) {
        Ok(s) => s,
        Err(e) => {
            log!("FATAL: No usable data directory: {}", e);
            log::shutdown();
            std::process::exit(1);
        }
    };
    let note = store.load();

    // The saved size is logical; scale it for the monitor it was saved on
    let geometry = match note.geometry {
        Some(g) => DpiInfo::for_rect(g).to_physical(g),
        None => {
            let system_dpi = DpiInfo::for_system();
            let size = system_dpi.to_physical(selfnote::Geometry::new(
                0,
                0,
                DEFAULT_WIDTH,
                DEFAULT_HEIGHT,
            ));
            centered_geometry(size.width, size.height)
        }
    };
    log!("Initial geometry (physical): {:?}", geometry);

    log!("Registering window class...");
    if let Err(e) = register_window_class() {
        log!("FATAL: Failed to register window class: {:?}", e);
        log::shutdown();
        std::process::exit(1);
    }

    let hwnd = match create_window(geometry) {
        Ok(h) => {
            log!("Window created: HWND={:?}", h);
            h
        }
        Err(e) => {
            log!("FATAL: Failed to create window: {:?}", e);
            unregister_window_class();
            log::shutdown();
            std::process::exit(1);
        }
    };
    set_window_opacity(hwnd, settings.opacity);

    let app = match App::new(hwnd, settings, store, &note) {
        Ok(a) => Rc::new(RefCell::new(a)),
        Err(e) => {
            log!("FATAL: Failed to create App: {:?}", e);
            win32::destroy_window(hwnd);
            unregister_window_class();
            log::shutdown();
            std::process::exit(1);
        }
    };

    let app_clone = app.clone();
    set_window_callback(move |hwnd, msg, wparam, lparam| {
        // ShowWindow and SetWindowPos send messages synchronously while we
        // hold the borrow; those fall through to default handling
        match app_clone.try_borrow_mut() {
            Ok(mut app) => app.handle_message(hwnd, msg, wparam, lparam),
            Err(_) => None,
        }
    });

    app.borrow_mut().start();
    log!("SelfNote started. Entering message loop.");

    unsafe {
        let mut msg = MSG::default();
        loop {
            let ret = GetMessageW(&mut msg, None, 0, 0);
            if ret.0 <= 0 {
                log!("GetMessageW returned {}, exiting loop", ret.0);
                break;
            }

            // Ctrl+S is caught before dispatch so it works while the edit has focus
            if is_save_shortcut(&msg) {
                let hwnd = app.borrow().hwnd();
                app.borrow_mut().save();
                win32::invalidate_window(hwnd);
                continue;
            }

            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    log!("Cleaning up...");
    win32::clear_window_callback();
    drop(app);
    unregister_window_class();

    log!("SelfNote exited normally.");
    log::shutdown();
}

#[cfg(not(windows))]
fn main() {
    use selfnote::{log, store, Settings};

    let settings = Settings::find_config_path()
        .and_then(|path| Settings::load_from_path(&path).ok())
        .unwrap_or_default();
    if let Some(dir) = store::log_dir_for(&settings) {
        log::init(&dir);
    }
    log!("No native front end for this platform; exiting");
    log::shutdown();
    eprintln!("selfnote: only the Windows front end is available");
    std::process::exit(1);
}
