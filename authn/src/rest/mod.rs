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

//! REST interface for authentication through external identity providers.

use crate::driver::AuthnDriver;
use axum::Router;

mod api_grant_post;
mod api_protected_get;
mod httputils;
#[cfg(test)]
mod testutils;

pub use api_grant_post::GrantResponse;
pub use httputils::get_bearer_auth;

/// Creates the router for the authentication endpoints.
///
/// The `driver` is a configured instance of the `AuthnDriver` that knows about the identity
/// providers that clients can use.
pub fn app(driver: AuthnDriver) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/protected", get(api_protected_get::handler))
        .route("/:provider", post(api_grant_post::handler))
        .with_state(driver)
}
