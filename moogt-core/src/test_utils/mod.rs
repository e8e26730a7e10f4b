//! Deterministic implementations for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that prove the trait APIs are usable.

mod failing_sink;
mod manual_clock;
mod recording_sink;

pub use failing_sink::FailingSink;
pub use manual_clock::ManualClock;
pub use recording_sink::{RecordingSink, SentNotification};
