//! Event contract shared by the domain crates.

pub mod event;
pub mod history;

pub use event::Event;
pub use history::{EventHistory, RecordedEvent};
