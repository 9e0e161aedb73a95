/*
 * lib.rs
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

//! Cartolina core: minimal asynchronous HTTP/1.1 client over plain TCP.
//!
//! One connection per request (`Connection: close`), Content-Length framed
//! responses, and a fan-out/join coordinator for running several requests
//! concurrently on one tokio runtime. No TLS, no chunked transfer-encoding,
//! no redirects, no pooling.

pub mod config;
pub mod error;
pub mod parallel;
pub mod protocol;

pub use config::ClientConfig;
pub use error::HttpError;
