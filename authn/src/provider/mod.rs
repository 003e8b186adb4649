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

//! Identity providers that validate user credentials on our behalf.

use crate::model::{Credentials, ProviderGrant};
use async_trait::async_trait;
use bookshelf_core::driver::DriverError;

mod http;
pub use http::{HttpProvider, HttpProviderOptions};
#[cfg(any(test, feature = "testutils"))]
mod mock;
#[cfg(any(test, feature = "testutils"))]
pub use mock::MockProvider;

/// Errors returned by identity providers.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// Indicates that the provider could not be reached.
    #[error("Cannot reach provider: {0}")]
    Network(String),

    /// Indicates that the provider rejected the credentials.
    #[error("Provider rejected the credentials: {0}")]
    Unauthorized(String),

    /// Catch-all error type for any other provider failure.
    #[error("Provider failure: {0}")]
    Other(String),
}

impl From<ProviderError> for DriverError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Network(_) => DriverError::Unavailable(e.to_string()),
            ProviderError::Unauthorized(_) => DriverError::Unauthorized(e.to_string()),
            ProviderError::Other(_) => DriverError::InternalError(e.to_string()),
        }
    }
}

/// Result type for this module.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Interface to an identity provider that supports password grants.
#[async_trait]
pub trait AuthProvider {
    /// Returns the name under which clients refer to this provider.
    fn name(&self) -> &str;

    /// Asks the provider to authenticate the user described by `credentials`.
    async fn grant(&self, credentials: &Credentials) -> ProviderResult<ProviderGrant>;
}
