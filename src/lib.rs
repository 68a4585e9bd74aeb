//! Editable image slot for iced applications.
//!
//! The slot shows a persisted image, or a generated placeholder when there
//! is none, and opens a modal to pick, preview, save, cancel or delete a
//! replacement. Persistence is delegated to caller-supplied callbacks.

pub mod config;
pub mod error;
pub mod slot;
pub mod store;

pub use error::{Result, SlotError};
pub use slot::{EditableImage, Message, Outcome};
