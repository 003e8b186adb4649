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

//! API to authenticate a user through an identity provider.

use crate::driver::AuthnDriver;
use crate::model::{AccessToken, Credentials};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Json, http};
use bookshelf_core::rest::{FormBody, RestError};
use serde::{Deserialize, Serialize};

/// Message returned by the server after a successful grant.
#[derive(Debug, Deserialize, Serialize)]
pub struct GrantResponse {
    /// Access token for the authenticated user.
    pub access_token: AccessToken,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<AuthnDriver>,
    Path(provider): Path<String>,
    FormBody(credentials): FormBody<Credentials>,
) -> Result<impl IntoResponse, RestError> {
    let access_token = driver.grant_intent(&provider, credentials).await?;

    Ok((http::StatusCode::ACCEPTED, Json(GrantResponse { access_token })))
}
