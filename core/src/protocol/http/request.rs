/*
 * request.rs
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

//! HTTP request: an immutable value plus its wire rendering.
//!
//! `to_bytes` is a pure function of the request: same value, byte-identical
//! output, every time. The header set is fixed (`Host`, `Accept`,
//! `Connection: close`, plus `Content-Type`/`Content-Length` with a body);
//! nothing else is ever emitted.

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One HTTP request: method, resource path, target host, optional body.
///
/// Built once per attempt and never mutated after serialization.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub resource: String,
    pub host: String,
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// GET request for `resource` on `host`.
    pub fn get(host: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            resource: resource.into(),
            host: host.into(),
            body: None,
        }
    }

    /// POST request carrying `body` (sent as text/plain with an exact Content-Length).
    pub fn post(host: impl Into<String>, resource: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            resource: resource.into(),
            host: host.into(),
            body: Some(body),
        }
    }

    /// Render the request to wire bytes: request line, fixed headers, blank
    /// line, raw body. Always HTTP/1.1 with `Connection: close`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(128 + self.body.as_ref().map_or(0, Vec::len));
        out.extend_from_slice(self.method.as_str().as_bytes());
        out.extend_from_slice(b" ");
        out.extend_from_slice(self.resource.as_bytes());
        out.extend_from_slice(b" HTTP/1.1\r\nHost: ");
        out.extend_from_slice(self.host.as_bytes());
        out.extend_from_slice(b"\r\nAccept: */*\r\nConnection: close\r\n");
        match &self.body {
            Some(body) => {
                out.extend_from_slice(b"Content-Type: text/plain; charset=UTF-8\r\n");
                out.extend_from_slice(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes());
                out.extend_from_slice(body);
            }
            None => out.extend_from_slice(b"\r\n"),
        }
        out
    }
}
