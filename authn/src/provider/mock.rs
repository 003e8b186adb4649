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

//! Identity provider backed by an in-memory table for testing purposes.

use crate::model::{Credentials, ProviderAccessToken, ProviderGrant};
use crate::provider::{AuthProvider, ProviderError, ProviderResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Identity provider that answers grant requests from a table of outcomes keyed by username.
///
/// Users not in the table are rejected as unauthorized.
#[derive(Clone)]
pub struct MockProvider {
    /// Name under which clients refer to this provider.
    name: String,

    /// Mapping of usernames to the outcome of their grant requests.
    outcomes: HashMap<String, ProviderResult<ProviderGrant>>,

    /// Number of grant requests received so far.
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Creates a new mock provider named `name` that rejects everyone.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), outcomes: HashMap::default(), calls: Arc::default() }
    }

    /// Registers `username` as a user that can log in and who gets the `rol` role and the
    /// space-separated `scope` list.  The subject of the grant is `<username>-client`.
    pub fn with_user(mut self, username: &str, rol: &str, scope: &str) -> Self {
        let grant = ProviderGrant {
            token_type: "bearer".to_owned(),
            access_token: ProviderAccessToken {
                rol: rol.to_owned(),
                client_id: format!("{}-client", username),
                scope: scope.to_owned(),
            },
        };
        self.outcomes.insert(username.to_owned(), Ok(grant));
        self
    }

    /// Configures grant requests for `username` to fail with `error`.
    pub fn with_error(mut self, username: &str, error: ProviderError) -> Self {
        self.outcomes.insert(username.to_owned(), Err(error));
        self
    }

    /// Returns the number of grant requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn grant(&self, credentials: &Credentials) -> ProviderResult<ProviderGrant> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcomes.get(credentials.username()) {
            Some(outcome) => outcome.clone(),
            None => Err(ProviderError::Unauthorized(format!(
                "Unknown user {}",
                credentials.username()
            ))),
        }
    }
}
