//! Pure algorithms over validated lessons.

pub mod overlap;

pub use overlap::{conflict_messages, detect, Conflict};
