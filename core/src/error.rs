/*
 * error.rs
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

//! Error kinds for the HTTP client.
//!
//! Each kind is detected at the point of occurrence and never retried here;
//! retry, if wanted, is the caller's business, per whole-request attempt.
//! Any error that touches an open connection closes it before surfacing.

use std::io;

/// Errors produced by the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Name resolution produced no usable addresses.
    #[error("failed to resolve {host}:{port}")]
    Resolution { host: String, port: u16 },

    /// The name resolved but no endpoint accepted the connection.
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// A write delivered fewer bytes than requested.
    #[error("short write: {written} of {expected} bytes sent")]
    ShortWrite { written: usize, expected: usize },

    /// Non-EOF I/O error on an established connection.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// The peer closed the connection before the header block was complete.
    #[error("connection closed before headers were complete")]
    PrematureEof,

    /// No usable Content-Length header in the response.
    #[error("missing or invalid Content-Length in response headers")]
    MissingLength,

    /// The peer closed with fewer body bytes than it declared.
    #[error("connection closed with {received} of {expected} body bytes")]
    RaggedBody { received: usize, expected: usize },

    /// Operation attempted on a connection already moved to closed.
    #[error("operation on a closed connection")]
    Closed,

    /// A bounded I/O step did not complete in time.
    #[error("i/o step timed out")]
    Timeout,

    /// A spawned request task panicked or was cancelled before producing a result.
    #[error("request task failed: {0}")]
    Task(String),
}
