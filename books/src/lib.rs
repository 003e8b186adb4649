// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! REST service to manage a catalog of books.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use axum::Router;
use bookshelf_authn::driver::AuthnDriver;
use bookshelf_authn::provider::{AuthProvider, HttpProvider};
use bookshelf_core::clocks::Clock;
use bookshelf_core::db::Db;
use bookshelf_core::rest::ResponseMapper;
use log::info;
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

pub mod config;
use config::Config;
pub mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;

/// Builds the router for the whole service.
///
/// The authentication endpoints are mounted under `/auth` only if `authn` is provided.  Error
/// responses carry details only if `debug` is true.
fn app(driver: Driver, authn: Option<AuthnDriver>, debug: bool) -> Router {
    let mut app = rest::app(driver);
    if let Some(authn) = authn {
        app = app.nest("/auth", bookshelf_authn::rest::app(authn));
    }
    ResponseMapper::new(debug).attach(app)
}

/// Waits until the process receives a termination request.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Cannot listen for termination requests: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Instantiates all resources to serve the application as described by `config`.
///
/// The `db` must already have its schema initialized.  The database is closed once the server
/// stops, and also if the server cannot be started.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    config: Config,
    db: Arc<dyn Db + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let result = run(config, db.clone(), clock).await;
    db.close().await;
    result
}

/// Sets up the service on top of `db` and runs it until a termination request arrives.
async fn run(
    config: Config,
    db: Arc<dyn Db + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let authn = match config.authn {
        Some(authn) => {
            let provider: Arc<dyn AuthProvider + Send + Sync> =
                Arc::new(HttpProvider::new(authn.provider)?);
            Some(AuthnDriver::new(clock.clone(), vec![provider], authn.opts))
        }
        None => None,
    };

    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    info!(
        "Listening on {} (authentication {}; debug {})",
        bind_addr,
        if authn.is_some() { "enabled" } else { "disabled" },
        if config.debug { "enabled" } else { "disabled" },
    );

    let driver = Driver::new(db, clock);
    let app = app(driver, authn, config.debug);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
