/*
 * main.rs
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

//! `cartolina <server> <port> <path>`: fetch one resource twice in
//! parallel and print both bodies. Usage errors exit with code 1.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cartolina_core::protocol::http::{client, Request};

#[derive(Parser)]
#[command(name = "cartolina", version, about = "Fetch a resource twice in parallel over HTTP/1.1")]
struct Args {
    /// Server to connect to, e.g. www.example.org
    server: String,
    /// TCP port, e.g. 80
    port: u16,
    /// Resource path, e.g. /index.html
    path: String,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            return ExitCode::from(1);
        }
    };
    runtime.block_on(run(args))
}

async fn run(args: Args) -> ExitCode {
    let requests = vec![
        Request::get(&args.server, &args.path),
        Request::get(&args.server, &args.path),
    ];
    let results = client::run_parallel(requests, args.port).await;

    let mut all_ok = true;
    for (index, result) in results.iter().enumerate() {
        println!("Client {}:", index + 1);
        match result {
            Ok(body) => println!("{body}"),
            Err(e) => {
                all_ok = false;
                eprintln!("request failed: {e}");
            }
        }
        println!("--------------------------");
    }
    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
