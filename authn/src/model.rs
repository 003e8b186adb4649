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

//! Data types for the authentication flows.

use bookshelf_core::model::{ModelError, ModelResult, validate_ascii_text};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw credentials as received in the login form, before validation.
#[derive(Deserialize)]
struct CredentialsForm {
    /// Name of the user at the provider.
    username: String,

    /// Password of the user at the provider.
    password: String,

    /// Domain of the user at the provider.
    domain: String,
}

/// Validated credentials of a user at an identity provider.
#[derive(Clone, Deserialize, PartialEq)]
#[serde(try_from = "CredentialsForm")]
pub struct Credentials {
    /// Name of the user at the provider.
    username: String,

    /// Password of the user at the provider.
    password: String,

    /// Domain of the user at the provider.
    domain: String,
}

impl Credentials {
    /// Creates a new set of credentials after validating all of its parts.
    pub fn new<S1, S2, S3>(username: S1, password: S2, domain: S3) -> ModelResult<Self>
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        let username = username.into();
        validate_ascii_text("username", &username, 3, 60, false)?;
        let password = password.into();
        validate_ascii_text("password", &password, 3, 20, false)?;
        let domain = domain.into();
        validate_ascii_text("domain", &domain, 3, 10, false)?;
        Ok(Self { username, password, domain })
    }

    /// Returns the name of the user.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password of the user.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the domain of the user.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl TryFrom<CredentialsForm> for Credentials {
    type Error = ModelError;

    fn try_from(form: CredentialsForm) -> ModelResult<Self> {
        Credentials::new(form.username, form.password, form.domain)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"scrubbed")
            .field("domain", &self.domain)
            .finish()
    }
}

/// Access details returned by an identity provider on a successful password grant.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProviderAccessToken {
    /// Role of the user at the provider.
    #[serde(rename = "Rol")]
    pub rol: String,

    /// Identifier of the authenticated client.
    #[serde(rename = "Client_Id")]
    pub client_id: String,

    /// Space-separated list of scopes granted to the client.
    #[serde(rename = "Scope")]
    pub scope: String,
}

/// Payload returned by an identity provider on a successful password grant.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProviderGrant {
    /// Type of the token issued by the provider.
    #[serde(rename = "Token_Type")]
    pub token_type: String,

    /// Access details for the authenticated user.
    #[serde(rename = "Access_Token")]
    pub access_token: ProviderAccessToken,
}

/// Claims about the authenticated user carried in our access tokens.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Claims {
    /// Subject of the token.
    pub sub: String,

    /// Role of the subject.
    pub rol: String,
}

/// Contents of the access tokens minted by this service.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessTokenData {
    /// Scopes granted to the holder of the token.
    pub scope: Vec<String>,

    /// Claims about the holder of the token.
    pub claims: Claims,
}

impl From<ProviderGrant> for AccessTokenData {
    fn from(grant: ProviderGrant) -> Self {
        let ProviderAccessToken { rol, client_id, scope } = grant.access_token;
        Self {
            scope: scope.split_whitespace().map(str::to_owned).collect(),
            claims: Claims { sub: client_id, rol },
        }
    }
}

/// An opaque signed access token.
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new access token from its textual representation.
    pub fn new<S: Into<String>>(token: S) -> ModelResult<Self> {
        let token = token.into();
        if token.is_empty() || !token.chars().all(|ch| ch.is_ascii_graphic()) {
            return Err(ModelError("Invalid access token".to_owned()));
        }
        Ok(Self(token))
    }

    /// Returns the string representation of the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed access token")
    }
}
