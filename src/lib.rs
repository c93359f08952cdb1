//! Confirm/alert dialog controller with an async result, plus the in-memory
//! document and terminal host used to drive it.

pub mod cli;
pub mod config;
pub mod dialog;
pub mod document;
pub mod tui;

pub use dialog::{DialogController, DialogError, DialogOptions, DialogResult, PendingDialog};
pub use document::MemoryDocument;
