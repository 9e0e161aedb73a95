/*
 * connection.rs
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

//! Transport: one plain TCP stream to one host and port.
//!
//! A Connection moves unconnected → connected → closed; closed is terminal.
//! Every I/O error, timeout or detected EOF closes it, and operations on a
//! closed Connection fail fast with `HttpError::Closed` and no side effects.
//! Exactly one task owns a Connection at a time; the protocol is strictly
//! request-then-response, never pipelined.

use std::io;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::protocol::http::framer::{find_subsequence, ResponseFramer};

/// Per-read buffer size when driving the response framer.
const READ_CHUNK: usize = 8 * 1024;
/// Cap on a single read in the generic byte-stream primitives.
const MAX_FRAME: usize = 64 * 1024;

/// One exclusive TCP connection. `stream` is `None` once closed.
#[derive(Debug)]
pub struct Connection {
    stream: Option<TcpStream>,
    host: String,
    port: u16,
    config: ClientConfig,
}

impl Connection {
    /// Resolve `host` and connect to the first reachable address.
    ///
    /// Resolution failure (no addresses at all) and connect failure (name
    /// resolved, nothing reachable) are reported distinctly; neither is
    /// retried here.
    pub async fn open(host: &str, port: u16, config: ClientConfig) -> Result<Self, HttpError> {
        let addrs: Vec<SocketAddr> = match lookup_host((host, port)).await {
            Ok(found) => found.collect(),
            Err(e) => {
                error!(host, port, error = %e, "name resolution failed");
                return Err(HttpError::Resolution {
                    host: host.to_string(),
                    port,
                });
            }
        };
        if addrs.is_empty() {
            error!(host, port, "name resolved to no addresses");
            return Err(HttpError::Resolution {
                host: host.to_string(),
                port,
            });
        }

        let mut last_error: Option<io::Error> = None;
        for addr in addrs {
            match timeout(config.connect_timeout, TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => {
                    debug!(host, port, %addr, "connected");
                    return Ok(Self {
                        stream: Some(stream),
                        host: host.to_string(),
                        port,
                        config,
                    });
                }
                Ok(Err(e)) => last_error = Some(e),
                Err(_) => {
                    last_error = Some(io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))
                }
            }
        }
        let source =
            last_error.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "no endpoint"));
        error!(host, port, error = %source, "connect failed");
        Err(HttpError::Connect {
            host: host.to_string(),
            port,
            source,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Move to closed. Idempotent; closed is terminal.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            debug!(host = %self.host, port = self.port, "connection closed");
        }
    }

    /// Write all of `bytes`. A write that makes no progress is a short
    /// write and a failure in itself, never silently accepted.
    pub async fn send(&mut self, bytes: &[u8]) -> Result<usize, HttpError> {
        let mut written = 0;
        while written < bytes.len() {
            let io_timeout = self.config.io_timeout;
            let stream = self.stream.as_mut().ok_or(HttpError::Closed)?;
            let wrote = timeout(io_timeout, stream.write(&bytes[written..])).await;
            let n = match wrote {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => {
                    self.close();
                    return Err(HttpError::Transport(e));
                }
                Err(_) => {
                    self.close();
                    return Err(HttpError::Timeout);
                }
            };
            if n == 0 {
                error!(written, expected = bytes.len(), "short write");
                self.close();
                return Err(HttpError::ShortWrite {
                    written,
                    expected: bytes.len(),
                });
            }
            written += n;
        }
        if let Some(stream) = self.stream.as_mut() {
            let flushed = stream.flush().await;
            if let Err(e) = flushed {
                self.close();
                return Err(HttpError::Transport(e));
            }
        }
        Ok(written)
    }

    /// One underlying read into `buf`. `Ok(0)` only on EOF, which also
    /// moves the Connection to closed; a non-EOF error closes and surfaces.
    pub async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, HttpError> {
        let io_timeout = self.config.io_timeout;
        let stream = self.stream.as_mut().ok_or(HttpError::Closed)?;
        let read = timeout(io_timeout, stream.read(buf)).await;
        match read {
            Ok(Ok(0)) => {
                self.close();
                Ok(0)
            }
            Ok(Ok(n)) => Ok(n),
            Ok(Err(e)) => {
                error!(error = %e, "read failed");
                self.close();
                Err(HttpError::Transport(e))
            }
            Err(_) => {
                self.close();
                Err(HttpError::Timeout)
            }
        }
    }

    /// Drive the response framer over this connection until the response is
    /// complete, returning the body. Closes the Connection on every framing
    /// failure so no socket leaks on a protocol error.
    pub async fn read_response(&mut self) -> Result<Vec<u8>, HttpError> {
        let mut framer = ResponseFramer::new();
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let n = self.read_chunk(&mut chunk).await?;
            if n == 0 {
                framer.finish()?;
                break;
            }
            if let Err(e) = framer.push(&chunk[..n]) {
                self.close();
                return Err(e);
            }
            if framer.is_complete() {
                break;
            }
        }
        Ok(framer.take_body())
    }

    /// Generic byte-stream exchange: write `out` fully, then read into the
    /// caller's pre-sized buffer until it is full or the peer closes.
    ///
    /// Returns the number of bytes placed in `buf`; an early EOF yields a
    /// short count, not an error — interpretation is the caller's. A short
    /// write aborts before any read. Reads are bounded by the buffer's
    /// remaining capacity, so no bytes past the target are consumed.
    pub async fn write_then_read(
        &mut self,
        out: &[u8],
        buf: &mut [u8],
    ) -> Result<usize, HttpError> {
        assert!(!buf.is_empty(), "result buffer must be pre-sized");
        self.send(out).await?;
        let mut total = 0;
        while total < buf.len() {
            let want = (buf.len() - total).min(MAX_FRAME);
            let n = self.read_chunk(&mut buf[total..total + want]).await?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }

    /// Delimiter variant: write `out` fully, then accumulate reads until
    /// `delimiter` appears, returning everything read. EOF before the
    /// delimiter is a framing failure.
    pub async fn write_then_read_until(
        &mut self,
        out: &[u8],
        delimiter: &[u8],
    ) -> Result<Vec<u8>, HttpError> {
        assert!(!delimiter.is_empty(), "delimiter must be non-empty");
        self.send(out).await?;
        let mut acc = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let n = self.read_chunk(&mut chunk).await?;
            if n == 0 {
                return Err(HttpError::PrematureEof);
            }
            let scan_from = acc.len().saturating_sub(delimiter.len() - 1);
            acc.extend_from_slice(&chunk[..n]);
            if find_subsequence(&acc[scan_from..], delimiter).is_some() {
                return Ok(acc);
            }
        }
    }
}
