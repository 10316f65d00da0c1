//! Window, drawing and input backends
//!
//! - Win32 (`FindWindowW`, GDI, `SendMessageW`, a low-level mouse hook)
//! - Everywhere else: the same API, failing with `Error::Unsupported`

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::{
    subscribe_releases, unsubscribe_releases, GdiCanvas as WindowCanvas,
    MessageInput as WindowInput, Window,
};

#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
pub use unsupported::{
    subscribe_releases, unsubscribe_releases, NullCanvas as WindowCanvas,
    NullInput as WindowInput, Window,
};
