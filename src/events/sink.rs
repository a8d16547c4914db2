use crate::events::event::SearchEvent;

/// Consumer of search events.
///
/// Implementors must not expect to influence the search: engines never read
/// anything back from a sink.
pub trait EventSink {
    fn emit(&mut self, event: SearchEvent);

    /// Engines skip building events entirely when this returns false
    fn enabled(&self) -> bool {
        true
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: SearchEvent) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventLog {
    events: Vec<SearchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events of the given variant (see [`SearchEvent::name`])
    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|event| event.name() == name).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn into_events(self) -> Vec<SearchEvent> {
        self.events
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: SearchEvent) {
        self.events.push(event);
    }
}

/// Forwards events to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: SearchEvent) {
        log::debug!("{:?}", event);
    }

    fn enabled(&self) -> bool {
        log::log_enabled!(log::Level::Debug)
    }
}

/// Fan-out: each event goes to both sinks.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: SearchEvent) {
        match (self.0.enabled(), self.1.enabled()) {
            (true, true) => {
                self.0.emit(event.clone());
                self.1.emit(event);
            }
            (true, false) => self.0.emit(event),
            (false, true) => self.1.emit(event),
            (false, false) => {}
        }
    }

    fn enabled(&self) -> bool {
        self.0.enabled() || self.1.enabled()
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: SearchEvent) {
        (**self).emit(event);
    }

    fn enabled(&self) -> bool {
        (**self).enabled()
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: SearchEvent) {
        (**self).emit(event);
    }

    fn enabled(&self) -> bool {
        (**self).enabled()
    }
}
