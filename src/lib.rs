//! SelfNote library - everything that does not touch Win32
//!
//! The main binary is in main.rs, but the note model, persistence, layout
//! and input state live here so they can be tested on any host.

// Declared first so the log! macro is visible in every module below
#[macro_use]
pub mod log;

pub mod errors;
pub mod interaction;
pub mod layout;
pub mod note;
pub mod rect;
pub mod settings;
pub mod state;
pub mod store;
pub mod style;
pub mod text;
pub mod variant;

pub use errors::NoteError;
pub use note::{Geometry, Note};
pub use settings::Settings;
pub use store::NoteStore;
pub use variant::Variant;
