//! Streaming tokenizer over lshistory output

use std::io::BufRead;

use super::super::HistoryError;
use super::comment::CommentBuffer;
use super::{LineKind, Parser};
use crate::model::RawEvent;

/// Counters describing what a [`HistoryReader`] has seen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    /// Header lines that produced an event
    pub events: usize,
    /// Header lines skipped as malformed
    pub malformed: usize,
    /// cleartool diagnostic lines dropped from the stream
    pub diagnostics: usize,
}

/// Iterator of [`RawEvent`]s read from an lshistory stream
///
/// An event is yielded once its comment is complete, i.e. when the next
/// header line or the end of the stream is reached. The reader owns the
/// stream; dropping the reader releases it.
pub struct HistoryReader<R> {
    reader: R,
    pending: Option<RawEvent>,
    comment: CommentBuffer,
    stats: HistoryStats,
    finished: bool,
}

impl<R: BufRead> HistoryReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
            comment: CommentBuffer::default(),
            stats: HistoryStats::default(),
            finished: false,
        }
    }

    pub fn stats(&self) -> HistoryStats {
        self.stats
    }

    /// Read one line without its line ending; `None` at end of stream
    ///
    /// Unlike `BufRead::read_until`, an interrupted read is reported to the
    /// caller instead of being retried. Bytes that are not valid UTF-8 are
    /// replaced rather than failing the whole extraction.
    fn read_line(&mut self) -> Result<Option<String>, HistoryError> {
        let mut buf = Vec::new();
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                break;
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    buf.extend_from_slice(&available[..=end]);
                    self.reader.consume(end + 1);
                    break;
                }
                None => {
                    let len = available.len();
                    buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }

        if buf.is_empty() {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Complete the pending event with the collected comment
    fn flush(&mut self) -> Option<RawEvent> {
        let mut event = self.pending.take()?;
        event.comment = self.comment.take();
        self.stats.events += 1;
        Some(event)
    }

    fn start_record(&mut self, line: &str) -> Option<RawEvent> {
        let finished = self.flush();
        self.comment.clear();
        self.pending = Parser::parse_header(line);
        if self.pending.is_none() {
            self.stats.malformed += 1;
            tracing::debug!(line, "skipping malformed history record");
        }
        finished
    }
}

impl<R: BufRead> Iterator for HistoryReader<R> {
    type Item = Result<RawEvent, HistoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.finished = true;
                    return self.flush().map(Ok);
                }
                Err(err) => {
                    self.finished = true;
                    self.pending = None;
                    return Some(Err(err));
                }
            };

            match Parser::classify_line(&line) {
                LineKind::Header => {
                    if let Some(event) = self.start_record(&line) {
                        return Some(Ok(event));
                    }
                }
                LineKind::Diagnostic => {
                    self.stats.diagnostics += 1;
                    tracing::warn!(line, "cleartool reported a problem while listing history");
                }
                LineKind::Continuation => {
                    // Lines outside any well-formed record have nowhere to go
                    if self.pending.is_some() {
                        self.comment.push(&line);
                    }
                }
            }
        }
    }
}
