/*
 * mod.rs
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

//! HTTP/1.1 client: request rendering, Content-Length response framing,
//! one TCP connection per request.
//!
//! - Requests: fixed header set, `Connection: close`, optional body.
//! - Responses: header block terminated by `\r\n\r\n`, body bounded by
//!   `Content-Length`. No chunked transfer-encoding, no TLS, no redirects.
//! - Buffers: `bytes` (`BytesMut` for the header accumulation buffer).

mod framer;
mod request;

pub mod client;
pub mod connection;

pub use connection::Connection;
pub use framer::{FrameState, ResponseFramer};
pub use request::{Method, Request};
