//! Per-screen state for the ordering app. Each screen owns its state,
//! built when the screen is entered and dropped when it is left.

pub mod admin;
pub mod alert;
pub mod chat;
pub mod login;
pub mod menu;
pub mod orders;
pub mod registration;
pub mod schedule;

pub use alert::Alert;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
