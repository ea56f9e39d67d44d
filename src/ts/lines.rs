// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Approximate line numbers of messages in a catalog.
//!
//! The XML reader does not expose line numbers, so the raw data is scanned forward
//! only: the Nth message of the document is mapped to the first line after the
//! previous match which contains the `<message` start marker.
//!
//! Known limitation: this is a best-effort mapping, not a verified one. It is wrong
//! if two messages start on the same line, or if a `<message` marker appears in a
//! comment or a CDATA section before the real element.

use memchr::memmem::Finder;

const MESSAGE_MARKER: &[u8] = b"<message";

pub struct LineLocator<'d> {
    data: &'d [u8],
    finder: Finder<'static>,
    offset: usize,
    line_number: usize,
}

impl<'d> LineLocator<'d> {
    /// Create a new `LineLocator` for the given raw data.
    #[must_use]
    pub fn new(data: &'d [u8]) -> Self {
        Self {
            data,
            finder: Finder::new(MESSAGE_MARKER),
            offset: 0,
            line_number: 1,
        }
    }

    /// Return `true` if the byte following the marker ends the tag name.
    fn is_tag_end(byte: Option<&u8>) -> bool {
        matches!(byte, Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n'))
    }

    /// Return the line number (starting at 1) of the next message, or 0 if there is
    /// no more message marker after the cursor.
    ///
    /// The cursor is moved to the line following the match, so two calls never
    /// return the same line.
    pub fn next_message_line(&mut self) -> usize {
        let mut search_from = self.offset;
        while search_from < self.data.len() {
            let Some(pos) = self.finder.find(&self.data[search_from..]) else {
                return 0;
            };
            let start = search_from + pos;
            let end = start + MESSAGE_MARKER.len();
            if !Self::is_tag_end(self.data.get(end)) {
                // Another tag like `<messages>`: keep searching on the same line.
                search_from = end;
                continue;
            }
            self.line_number += memchr::memchr_iter(b'\n', &self.data[self.offset..start]).count();
            let found = self.line_number;
            match memchr::memchr(b'\n', &self.data[start..]) {
                Some(pos_lf) => {
                    self.offset = start + pos_lf + 1;
                    self.line_number += 1;
                }
                None => self.offset = self.data.len(),
            }
            return found;
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_message() {
        let mut locator = LineLocator::new(b"<TS>\n</TS>\n");
        assert_eq!(locator.next_message_line(), 0);
        assert_eq!(locator.next_message_line(), 0);
    }

    #[test]
    fn test_messages() {
        let content = r#"<?xml version="1.0" encoding="utf-8"?>
<TS version="2.1" language="de">
<context>
    <name>Test</name>
    <message>
        <source>Hello</source>
        <translation>Hallo</translation>
    </message>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n Datei</numerusform>
            <numerusform>%n Dateien</numerusform>
        </translation>
    </message>
</context>
</TS>
"#;
        let mut locator = LineLocator::new(content.as_bytes());
        assert_eq!(locator.next_message_line(), 5);
        assert_eq!(locator.next_message_line(), 9);
        assert_eq!(locator.next_message_line(), 0);
    }

    #[test]
    fn test_forward_only() {
        // Two messages on the same line: the second one gets the next marker found.
        let content = "<message><source>a</source></message><message>\n<message>\n";
        let mut locator = LineLocator::new(content.as_bytes());
        assert_eq!(locator.next_message_line(), 1);
        assert_eq!(locator.next_message_line(), 2);
        assert_eq!(locator.next_message_line(), 0);
    }

    #[test]
    fn test_skip_other_tags() {
        let content = "<messages>\n<messageX/>\n  <message>\n";
        let mut locator = LineLocator::new(content.as_bytes());
        assert_eq!(locator.next_message_line(), 3);
    }

    #[test]
    fn test_no_final_newline() {
        let mut locator = LineLocator::new(b"\n\n<message/>");
        assert_eq!(locator.next_message_line(), 3);
        assert_eq!(locator.next_message_line(), 0);
    }
}
