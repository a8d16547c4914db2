//! JSON-lines writer for search events.

use crate::events::{EventSink, SearchEvent};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

/// Writes each event as one JSON line.
///
/// An [`EventSink`] cannot fail, so the first write error is kept and
/// reported by [`finish`](Self::finish); later events are dropped.
pub struct JsonLinesRecorder<W: Write> {
    writer: W,
    written: usize,
    error: Option<io::Error>,
}

impl JsonLinesRecorder<BufWriter<File>> {
    /// Create a recorder writing to a new (or truncated) file
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path.as_ref())?;
        log::info!("recording search events to {}", path.as_ref().display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            error: None,
        }
    }

    /// Number of events written so far
    pub fn written(&self) -> usize {
        self.written
    }

    fn write_event(&mut self, event: &SearchEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")
    }

    /// Flushes and returns the underlying writer, or the first error met.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        log::debug!("event recorder finished after {} events", self.written);
        Ok(self.writer)
    }
}

impl<W: Write> EventSink for JsonLinesRecorder<W> {
    fn emit(&mut self, event: SearchEvent) {
        if self.error.is_some() {
            return;
        }
        match self.write_event(&event) {
            Ok(()) => self.written += 1,
            Err(err) => {
                log::error!("failed to record {} event: {}", event.name(), err);
                self.error = Some(err);
            }
        }
    }
}

/// Reads back a JSON-lines event file as raw JSON values, skipping blank lines.
pub fn read_events<R: BufRead>(reader: R) -> io::Result<Vec<serde_json::Value>> {
    let mut events = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        events.push(serde_json::from_str(&line)?);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let mut recorder = JsonLinesRecorder::new(Vec::new());
        recorder.emit(SearchEvent::IterationStarted { iteration: 1 });
        recorder.emit(SearchEvent::SimulationResult {
            leaf_id: "L".to_string(),
            result: 1.0,
        });
        assert_eq!(recorder.written(), 2);

        let bytes = recorder.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"event":"IterationStarted","iteration":1}"#);

        let events = read_events(text.as_bytes()).unwrap();
        assert_eq!(events[1]["event"], "SimulationResult");
        assert_eq!(events[1]["leaf_id"], "L");
    }

    #[test]
    fn test_first_error_reported_on_finish() {
        let mut recorder = JsonLinesRecorder::new(FailingWriter);
        recorder.emit(SearchEvent::IterationStarted { iteration: 1 });
        recorder.emit(SearchEvent::IterationStarted { iteration: 2 });

        assert_eq!(recorder.written(), 0);
        let err = recorder.finish().err().unwrap();
        assert_eq!(err.to_string(), "disk full");
    }
}
