//! Comment accumulation for the event being parsed

/// Collects the continuation lines of one event
#[derive(Debug, Default)]
pub(super) struct CommentBuffer {
    lines: Vec<String>,
}

impl CommentBuffer {
    /// Append one continuation line (line ending already stripped)
    ///
    /// Blank lines before the first text line are separators, not content.
    pub(super) fn push(&mut self, line: &str) {
        if self.lines.is_empty() && line.trim().is_empty() {
            return;
        }
        self.lines.push(line.to_string());
    }

    /// Finish the comment and reset the buffer
    ///
    /// Trailing blank lines are dropped; interior ones are kept.
    pub(super) fn take(&mut self) -> String {
        while self.lines.last().is_some_and(|l| l.trim().is_empty()) {
            self.lines.pop();
        }
        let comment = self.lines.join("\n");
        self.lines.clear();
        comment
    }

    /// Drop anything collected so far
    pub(super) fn clear(&mut self) {
        self.lines.clear();
    }
}
