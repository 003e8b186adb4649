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

//! Identity provider reached over HTTP.

use crate::model::{Credentials, ProviderGrant};
use crate::provider::{AuthProvider, ProviderError, ProviderResult};
use async_trait::async_trait;
use bookshelf_core::env::{get_optional_var, get_required_var};
use derivative::Derivative;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Default value for the `TIMEOUT` setting when not specified.
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Converts a `reqwest::Error` to a `ProviderError`.
fn reqwest_error_to_provider_error(e: reqwest::Error) -> ProviderError {
    if e.is_connect() || e.is_timeout() {
        ProviderError::Network(e.to_string())
    } else {
        ProviderError::Other(e.to_string())
    }
}

/// Converts a `reqwest::Response` to a `ProviderError`.  The response should have a non-OK status.
async fn http_response_to_provider_error(response: Response) -> ProviderError {
    let status = response.status();

    let message = match response.text().await {
        Ok(text) => format!("HTTP request returned status {} with text '{}'", status, text),
        Err(e) => {
            format!("HTTP request returned status {} and failed to get text due to {}", status, e)
        }
    };

    match status {
        StatusCode::OK => panic!("Should not have been called on a successful request"),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Unauthorized(message),
        _ => ProviderError::Other(message),
    }
}

/// Password grant request sent to the provider as a form.
#[derive(Serialize)]
struct GrantRequest<'a> {
    /// Name of the user to authenticate.
    username: &'a str,

    /// Password of the user to authenticate.
    password: &'a str,

    /// Domain of the user to authenticate.
    domain: &'a str,

    /// OAuth grant type, which is always `password`.
    grant_type: &'static str,
}

/// Options to configure an `HttpProvider`.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct HttpProviderOptions {
    /// Name under which clients refer to this provider.
    pub name: String,

    /// Address of the password grant endpoint.
    pub url: Url,

    /// Identifier of this service at the provider.
    pub client_id: String,

    /// Secret of this service at the provider.
    #[derivative(Debug = "ignore")]
    pub client_secret: String,

    /// Maximum amount of time to wait for the provider to answer.
    pub timeout: Duration,
}

impl HttpProviderOptions {
    /// Creates a set of options from environment variables whose name is prefixed with the given
    /// `prefix`.
    ///
    /// This will use variables such as `<prefix>_NAME`, `<prefix>_URL`, `<prefix>_CLIENT_ID`,
    /// `<prefix>_CLIENT_SECRET` and `<prefix>_TIMEOUT`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            name: get_required_var::<String>(prefix, "NAME")?,
            url: get_required_var::<Url>(prefix, "URL")?,
            client_id: get_required_var::<String>(prefix, "CLIENT_ID")?,
            client_secret: get_required_var::<String>(prefix, "CLIENT_SECRET")?,
            timeout: get_optional_var::<Duration>(prefix, "TIMEOUT")?
                .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)),
        })
    }
}

/// Identity provider that accepts password grants over HTTP.
#[derive(Clone)]
pub struct HttpProvider {
    /// Configuration of the provider.
    opts: HttpProviderOptions,

    /// Asynchronous HTTP client with which to issue the grant requests.
    client: Client,
}

impl HttpProvider {
    /// Creates a new provider using `opts` for configuration.
    pub fn new(opts: HttpProviderOptions) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(opts.timeout)
            .build()
            .map_err(|e| ProviderError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { opts, client })
    }
}

#[async_trait]
impl AuthProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.opts.name
    }

    async fn grant(&self, credentials: &Credentials) -> ProviderResult<ProviderGrant> {
        let request = GrantRequest {
            username: credentials.username(),
            password: credentials.password(),
            domain: credentials.domain(),
            grant_type: "password",
        };

        let response = self
            .client
            .post(self.opts.url.clone())
            .basic_auth(&self.opts.client_id, Some(&self.opts.client_secret))
            .form(&request)
            .send()
            .await
            .map_err(reqwest_error_to_provider_error)?;
        match response.status() {
            StatusCode::OK => {
                let bytes = response.bytes().await.map_err(reqwest_error_to_provider_error)?;
                serde_json::from_slice::<ProviderGrant>(&bytes)
                    .map_err(|e| ProviderError::Other(format!("Invalid grant response: {}", e)))
            }
            _ => Err(http_response_to_provider_error(response).await),
        }
    }
}
