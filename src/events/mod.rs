//! Event/Reporter interface
//!
//! Both engines push discrete [`SearchEvent`]s through an [`EventSink`] as they
//! run. Sinks are a pure side channel: nothing an engine decides depends on
//! what a sink does with an event.

pub mod event;
pub mod sink;

pub use event::SearchEvent;
pub use sink::{EventLog, EventSink, LogSink, NullSink};
