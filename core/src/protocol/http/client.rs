/*
 * client.rs
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

//! Client entry points: single-shot fetches and the parallel fan-out.
//!
//! One set of protocol logic serves every caller; the blocking variant
//! differs only in how it drives the runtime, not in what goes over the
//! wire.

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::parallel::TaskGroup;
use crate::protocol::http::{Connection, Request};

/// Issue `request` on an existing connection and return the response body
/// as text. The connection is single-owner and strictly request-then-
/// response; a framing or I/O failure leaves it closed.
pub async fn execute(conn: &mut Connection, request: &Request) -> Result<String, HttpError> {
    let wire = request.to_bytes();
    conn.send(&wire).await?;
    let body = conn.read_response().await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Resolve, connect and GET `resource` from `host:port` with default
/// timeouts.
pub async fn fetch(host: &str, port: u16, resource: &str) -> Result<String, HttpError> {
    fetch_with(host, port, resource, ClientConfig::default()).await
}

/// As `fetch`, with explicit timeouts.
pub async fn fetch_with(
    host: &str,
    port: u16,
    resource: &str,
    config: ClientConfig,
) -> Result<String, HttpError> {
    let request = Request::get(host, resource);
    let mut conn = Connection::open(host, port, config).await?;
    execute(&mut conn, &request).await
}

/// Run every request concurrently, one spawned task per request, and wait
/// for all of them (join, not race). Each task connects to its request's
/// host on `port`. Results come back in submission order, failures at
/// their original indices; one member's failure never cancels another.
pub async fn run_parallel(requests: Vec<Request>, port: u16) -> Vec<Result<String, HttpError>> {
    let mut group = TaskGroup::new();
    for (index, request) in requests.into_iter().enumerate() {
        let handle = tokio::spawn(async move {
            debug!(task = index, host = %request.host, resource = %request.resource, "request task started");
            let mut conn = Connection::open(&request.host, port, ClientConfig::default()).await?;
            execute(&mut conn, &request).await
        });
        group.push(async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => Err(HttpError::Task(e.to_string())),
            }
        });
    }
    group.join().await
}

/// Single-shot blocking variant: same protocol logic, driven to completion
/// on a dedicated current-thread runtime.
pub mod blocking {
    use super::*;

    pub fn fetch(host: &str, port: u16, resource: &str) -> Result<String, HttpError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(super::fetch(host, port, resource))
    }
}
