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

//! Business logic for authentication through external identity providers.

use crate::model::{AccessToken, AccessTokenData};
use crate::provider::AuthProvider;
use bookshelf_core::clocks::Clock;
use bookshelf_core::driver::{DriverError, DriverResult};
use bookshelf_core::env::{get_optional_var, get_required_var};
use derivative::Derivative;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

mod grant;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
mod verify;

/// Default value for the `TOKEN_MAX_AGE` setting when not specified.
const DEFAULT_TOKEN_MAX_AGE_SECONDS: u64 = 60 * 60;

/// Configuration options for the authentication driver.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct AuthnOptions {
    /// Key with which to sign and verify access tokens.
    #[derivative(Debug = "ignore")]
    pub sign_key: String,

    /// The amount of time we consider access tokens valid for.
    pub token_max_age: Duration,
}

impl AuthnOptions {
    /// Creates a new set of options from environment variables.
    ///
    /// This will use variables such as `<prefix>_SIGN_KEY` and `<prefix>_TOKEN_MAX_AGE`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            sign_key: get_required_var::<String>(prefix, "SIGN_KEY")?,
            token_max_age: get_optional_var::<Duration>(prefix, "TOKEN_MAX_AGE")?
                .unwrap_or_else(|| Duration::from_secs(DEFAULT_TOKEN_MAX_AGE_SECONDS)),
        })
    }
}

/// Claims stored in the access tokens that we mint.
#[derive(Debug, Deserialize, Serialize)]
struct TokenClaims {
    /// Data about the holder of the token.
    #[serde(flatten)]
    data: AccessTokenData,

    /// Time when the token was issued, in seconds since the epoch.
    iat: i64,

    /// Time when the token expires, in seconds since the epoch.
    exp: i64,
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot", so they consume the driver.
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct AuthnDriver {
    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,

    /// Known identity providers keyed by their name.
    providers: Arc<HashMap<String, Arc<dyn AuthProvider + Send + Sync>>>,

    /// Key to sign new access tokens.
    encoding_key: EncodingKey,

    /// Key to verify the signature of access tokens.
    decoding_key: DecodingKey,

    /// Options for the authentication driver.
    opts: AuthnOptions,
}

impl AuthnDriver {
    /// Creates a new driver backed by the given dependencies.
    ///
    /// If more than one provider in `providers` has the same name, the last one wins.
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        providers: Vec<Arc<dyn AuthProvider + Send + Sync>>,
        opts: AuthnOptions,
    ) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| (provider.name().to_owned(), provider))
            .collect::<HashMap<_, _>>();
        Self {
            clock,
            providers: Arc::from(providers),
            encoding_key: EncodingKey::from_secret(opts.sign_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(opts.sign_key.as_bytes()),
            opts,
        }
    }

    /// Mints a signed access token that carries `data`.
    fn sign(&self, data: AccessTokenData) -> DriverResult<AccessToken> {
        let iat = self.clock.now_utc().unix_timestamp();
        let max_age = i64::try_from(self.opts.token_max_age.as_secs()).map_err(|e| {
            DriverError::TokenError(format!("Token max age is out of range: {}", e))
        })?;
        let claims = TokenClaims { data, iat, exp: iat.saturating_add(max_age) };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DriverError::TokenError(format!("Failed to sign token: {}", e)))?;
        AccessToken::new(token).map_err(|e| DriverError::TokenError(e.to_string()))
    }

    /// Checks the signature of `token` and returns its claims.  Expiration is not checked here
    /// because it must use our own clock.
    fn decode(&self, token: &AccessToken) -> DriverResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        match jsonwebtoken::decode::<TokenClaims>(token.as_str(), &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(DriverError::Unauthorized(format!("Invalid access token: {}", e))),
        }
    }
}
