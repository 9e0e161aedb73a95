/*
 * config.rs
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

//! Client configuration: per-step I/O deadlines.
//!
//! Every connect, read and write is bounded; a peer that stops responding
//! fails that request with `HttpError::Timeout` instead of stalling its
//! task forever.

use std::time::Duration;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeouts applied to each individual I/O step of a request.
#[derive(Debug, Clone, Copy)]
pub struct ClientConfig {
    /// Bound on DNS resolution plus one TCP connect attempt.
    pub connect_timeout: Duration,
    /// Bound on each single read or write call.
    pub io_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }
}
