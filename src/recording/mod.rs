//! Event recording
//!
//! Persists the event stream of a search so an external renderer can replay
//! it step by step.
//!
//! # Components
//!
//! - `jsonl_writer`: one JSON object per event, one event per line

pub mod jsonl_writer;

pub use jsonl_writer::{read_events, JsonLinesRecorder};
