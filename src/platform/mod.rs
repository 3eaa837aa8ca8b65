//! Native front end
//!
//! Only a Win32 implementation exists; `main` compiles this module on
//! Windows alone.

pub mod win32;
