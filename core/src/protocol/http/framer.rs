/*
 * framer.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Cartolina, a minimal asynchronous HTTP client.
 *
 * Cartolina is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Cartolina is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Cartolina.  If not, see <http://www.gnu.org/licenses/>.
 */

//! HTTP/1.1 response framer: push-style state machine.
//!
//! Phase one accumulates bytes until the `\r\n\r\n` header terminator is
//! seen; phase two reads exactly Content-Length further bytes. Feed chunks
//! with `push` as they arrive off the wire and call `finish` on EOF; the
//! machine is indifferent to how the stream was chunked across reads, and
//! the terminator is found even when it straddles two chunks.

use bytes::BytesMut;

use crate::error::HttpError;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// First position of `needle` within `haystack`.
pub(crate) fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Framing state. `Failed` is absorbing; `Complete` exposes the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    AwaitingHeaders,
    HeadersReady,
    ReadingBody,
    Complete,
    Failed,
}

/// Two-phase response framer: header accumulation, then a length-bounded
/// body read. The caller drives it with raw chunks in arrival order.
pub struct ResponseFramer {
    state: FrameState,
    /// Raw header bytes; frozen (terminator included) once the terminator is found.
    headers: BytesMut,
    body: Vec<u8>,
    expected: usize,
    received: usize,
}

impl ResponseFramer {
    pub fn new() -> Self {
        Self {
            state: FrameState::AwaitingHeaders,
            headers: BytesMut::with_capacity(1024),
            body: Vec::new(),
            expected: 0,
            received: 0,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == FrameState::Complete
    }

    /// The frozen header block, once the terminator has been seen.
    pub fn header_block(&self) -> Option<&[u8]> {
        match self.state {
            FrameState::AwaitingHeaders | FrameState::Failed => None,
            _ => Some(&self.headers),
        }
    }

    /// Feed one chunk as read from the transport. Returns an error (and
    /// moves to `Failed`) only for framing failures; I/O failures are the
    /// caller's to report.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), HttpError> {
        match self.state {
            FrameState::AwaitingHeaders => {
                // Rescan from 3 bytes back so a terminator straddling the
                // previous chunk edge is still found.
                let scan_from = self.headers.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
                self.headers.extend_from_slice(chunk);
                if let Some(at) = find_subsequence(&self.headers[scan_from..], HEADER_TERMINATOR) {
                    let block_end = scan_from + at + HEADER_TERMINATOR.len();
                    let rest = self.headers.split_off(block_end);
                    self.state = FrameState::HeadersReady;
                    let expected = self.parse_content_length()?;
                    self.expected = expected;
                    self.received = 0;
                    self.body = Vec::with_capacity(expected);
                    self.state = FrameState::ReadingBody;
                    if !rest.is_empty() {
                        self.fill_body(&rest);
                    }
                }
                Ok(())
            }
            FrameState::ReadingBody => {
                self.fill_body(chunk);
                Ok(())
            }
            // Bytes past the declared length are discarded: the connection
            // carries exactly one response (`Connection: close`).
            FrameState::Complete | FrameState::HeadersReady | FrameState::Failed => Ok(()),
        }
    }

    /// Signal EOF from the transport. Clean EOF at exactly the declared
    /// length is completion; anything earlier is a framing failure.
    pub fn finish(&mut self) -> Result<(), HttpError> {
        match self.state {
            FrameState::Complete => Ok(()),
            FrameState::ReadingBody => {
                self.state = FrameState::Failed;
                Err(HttpError::RaggedBody {
                    received: self.received,
                    expected: self.expected,
                })
            }
            // No partial-header tolerance: an unterminated block is a failure
            // whether or not bytes arrived.
            FrameState::AwaitingHeaders | FrameState::HeadersReady | FrameState::Failed => {
                self.state = FrameState::Failed;
                Err(HttpError::PrematureEof)
            }
        }
    }

    /// The completed body. Meaningful only once `is_complete()`.
    pub fn take_body(self) -> Vec<u8> {
        self.body
    }

    fn fill_body(&mut self, chunk: &[u8]) {
        let take = (self.expected - self.received).min(chunk.len());
        self.body.extend_from_slice(&chunk[..take]);
        self.received += take;
        if self.received == self.expected {
            self.state = FrameState::Complete;
        }
    }

    /// First header line whose name is `Content-Length`, case-insensitively;
    /// later duplicates are ignored. Absent, non-numeric or zero values are
    /// a framing failure distinct from I/O errors.
    fn parse_content_length(&mut self) -> Result<usize, HttpError> {
        for line in self.headers[..].split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if let Some(colon) = line.iter().position(|&b| b == b':') {
                let name = trim_ascii(&line[..colon]);
                if name.eq_ignore_ascii_case(b"content-length") {
                    let value = std::str::from_utf8(trim_ascii(&line[colon + 1..])).ok();
                    return match value.and_then(|v| v.parse::<usize>().ok()) {
                        Some(n) if n > 0 => Ok(n),
                        _ => {
                            self.state = FrameState::Failed;
                            Err(HttpError::MissingLength)
                        }
                    };
                }
            }
        }
        self.state = FrameState::Failed;
        Err(HttpError::MissingLength)
    }
}

impl Default for ResponseFramer {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_ascii(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if first.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = bytes {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello";

    fn feed(framer: &mut ResponseFramer, chunks: &[&[u8]]) {
        for chunk in chunks {
            framer.push(chunk).expect("push failed");
        }
    }

    #[test]
    fn whole_response_in_one_chunk() {
        let mut framer = ResponseFramer::new();
        feed(&mut framer, &[RESPONSE]);
        assert!(framer.is_complete());
        assert_eq!(framer.take_body(), b"hello");
    }

    #[test]
    fn body_is_identical_for_every_split_point() {
        for split in 1..RESPONSE.len() {
            let mut framer = ResponseFramer::new();
            feed(&mut framer, &[&RESPONSE[..split], &RESPONSE[split..]]);
            assert!(framer.is_complete(), "split at {split}");
            assert_eq!(framer.take_body(), b"hello", "split at {split}");
        }
    }

    #[test]
    fn terminator_straddling_two_reads() {
        let mut framer = ResponseFramer::new();
        feed(
            &mut framer,
            &[b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r", b"\nhello"],
        );
        assert!(framer.is_complete());
        assert_eq!(framer.take_body(), b"hello");
    }

    #[test]
    fn byte_at_a_time_delivery() {
        let mut framer = ResponseFramer::new();
        for &b in RESPONSE {
            framer.push(&[b]).unwrap();
        }
        assert!(framer.is_complete());
        assert_eq!(framer.take_body(), b"hello");
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let mut framer = ResponseFramer::new();
        feed(
            &mut framer,
            &[b"HTTP/1.1 200 OK\r\ncOnTeNt-LeNgTh: 2\r\n\r\nok"],
        );
        assert!(framer.is_complete());
        assert_eq!(framer.take_body(), b"ok");
    }

    #[test]
    fn content_length_found_among_other_headers() {
        let mut framer = ResponseFramer::new();
        feed(
            &mut framer,
            &[b"HTTP/1.1 200 OK\r\nServer: test\r\nDate: today\r\nContent-Length: 5\r\nVary: *\r\n\r\nhello"],
        );
        assert!(framer.is_complete());
        assert_eq!(framer.take_body(), b"hello");
    }

    #[test]
    fn first_content_length_wins_over_duplicates() {
        let mut framer = ResponseFramer::new();
        feed(
            &mut framer,
            &[b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nContent-Length: 99\r\n\r\nhello"],
        );
        assert!(framer.is_complete());
        assert_eq!(framer.take_body(), b"hello");
    }

    #[test]
    fn missing_content_length_fails() {
        let mut framer = ResponseFramer::new();
        let err = framer
            .push(b"HTTP/1.1 200 OK\r\nServer: x\r\n\r\n")
            .unwrap_err();
        assert!(matches!(err, HttpError::MissingLength));
        assert_eq!(framer.state(), FrameState::Failed);
    }

    #[test]
    fn non_numeric_content_length_fails() {
        let mut framer = ResponseFramer::new();
        let err = framer
            .push(b"HTTP/1.1 200 OK\r\nContent-Length: five\r\n\r\n")
            .unwrap_err();
        assert!(matches!(err, HttpError::MissingLength));
    }

    #[test]
    fn zero_content_length_fails() {
        let mut framer = ResponseFramer::new();
        let err = framer
            .push(b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n")
            .unwrap_err();
        assert!(matches!(err, HttpError::MissingLength));
    }

    #[test]
    fn eof_short_of_declared_length_is_ragged() {
        let mut framer = ResponseFramer::new();
        feed(&mut framer, &[&RESPONSE[..RESPONSE.len() - 2]]);
        assert_eq!(framer.state(), FrameState::ReadingBody);
        let err = framer.finish().unwrap_err();
        assert!(matches!(
            err,
            HttpError::RaggedBody {
                received: 3,
                expected: 5
            }
        ));
    }

    #[test]
    fn eof_at_exactly_declared_length_completes() {
        let mut framer = ResponseFramer::new();
        feed(&mut framer, &[RESPONSE]);
        assert!(framer.finish().is_ok());
        assert_eq!(framer.take_body(), b"hello");
    }

    #[test]
    fn eof_before_terminator_is_premature_even_with_partial_headers() {
        let mut framer = ResponseFramer::new();
        framer.push(b"HTTP/1.1 200 OK\r\nContent-Le").unwrap();
        let err = framer.finish().unwrap_err();
        assert!(matches!(err, HttpError::PrematureEof));
        assert_eq!(framer.state(), FrameState::Failed);
    }

    #[test]
    fn trailing_bytes_past_declared_length_are_discarded() {
        let mut framer = ResponseFramer::new();
        feed(
            &mut framer,
            &[b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhelloEXTRA"],
        );
        assert!(framer.is_complete());
        assert_eq!(framer.take_body(), b"hello");
    }

    #[test]
    fn header_block_is_frozen_with_terminator() {
        let mut framer = ResponseFramer::new();
        feed(&mut framer, &[RESPONSE]);
        assert_eq!(
            framer.header_block(),
            Some(&b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n"[..])
        );
    }
}
