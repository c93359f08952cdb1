//! Confirm/alert dialog
//!
//! A single dialog surface driven by [`DialogController`]. `open` shows the
//! dialog and hands back a [`PendingDialog`] future; the host forwards clicks
//! and key presses through [`DialogController::handle_event`], and the first
//! terminal interaction settles the future.
//!
//! The controller only sees the host through the [`Element`] and [`Document`]
//! traits, so it runs the same against a real page binding or the in-memory
//! document in [`crate::document`].

pub mod controller;
pub mod host;
pub mod request;
pub mod types;

pub use controller::DialogController;
pub use host::{
    same_element, DialogElements, Display, Document, Element, ElementRef, ElementSelectors,
    HostEvent, SHOW_CLASS,
};
pub use request::PendingDialog;
pub use types::*;
