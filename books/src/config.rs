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

//! Configuration of the service.

use bookshelf_authn::driver::AuthnOptions;
use bookshelf_authn::provider::HttpProviderOptions;
#[cfg(feature = "postgres")]
use bookshelf_core::db::postgres::PostgresOptions;
use bookshelf_core::env::get_optional_var;

/// Default TCP port to listen on.
const DEFAULT_PORT: u16 = 8080;

/// Configuration of the authentication feature.
#[derive(Debug)]
pub struct AuthnConfig {
    /// Options to mint and verify access tokens.
    pub opts: AuthnOptions,

    /// Options to contact the identity provider.
    pub provider: HttpProviderOptions,
}

impl AuthnConfig {
    /// Initializes the authentication configuration from environment variables whose name is
    /// prefixed with `prefix`, or returns none if the feature is not enabled.
    fn from_env(prefix: &str) -> Result<Option<Self>, String> {
        if !get_optional_var::<bool>(prefix, "ENABLED")?.unwrap_or(false) {
            return Ok(None);
        }

        Ok(Some(Self {
            opts: AuthnOptions::from_env(prefix)?,
            provider: HttpProviderOptions::from_env(&format!("{}_PROVIDER", prefix))?,
        }))
    }
}

/// Configuration of the whole service.
#[derive(Debug)]
pub struct Config {
    /// TCP port to listen on.
    pub port: u16,

    /// Whether to include error details in responses.
    pub debug: bool,

    /// Options to connect to the database.
    #[cfg(feature = "postgres")]
    pub db: PostgresOptions,

    /// Configuration of the authentication feature, if enabled.
    pub authn: Option<AuthnConfig>,
}

impl Config {
    /// Initializes the configuration from environment variables whose name is prefixed with
    /// `prefix`.
    ///
    /// This uses `<prefix>_PORT` and `<prefix>_DEBUG`, the database options under
    /// `<prefix>_PGSQL`, and the authentication options under `<prefix>_AUTHN`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            debug: get_optional_var::<bool>(prefix, "DEBUG")?.unwrap_or(false),
            #[cfg(feature = "postgres")]
            db: PostgresOptions::from_env(&format!("{}_PGSQL", prefix))?,
            authn: AuthnConfig::from_env(&format!("{}_AUTHN", prefix))?,
        })
    }
}
