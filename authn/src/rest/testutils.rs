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

//! Test utilities for the REST API.

use crate::driver::{AuthnDriver, AuthnOptions};
use crate::driver::testutils::{self, TEST_PROVIDER, test_options, test_provider};
use crate::model::{AccessToken, Credentials};
use crate::provider::MockProvider;
use crate::rest::app;
use axum::Router;
use bookshelf_core::clocks::testutils::SettableClock;
use bookshelf_core::rest::ResponseMapper;

/// State of a running test.
pub(crate) struct TestContext {
    /// The driver-level test context that backs the app.
    inner: testutils::TestContext,

    /// The app under test, mounted under `/auth` and with error details enabled.
    app: Router,
}

impl TestContext {
    /// Initializes the app with the default test provider.
    pub(crate) fn setup() -> Self {
        Self::setup_with_provider(test_provider())
    }

    /// Initializes the app with a custom `provider`.
    pub(crate) fn setup_with_provider(provider: MockProvider) -> Self {
        Self::setup_with(test_options(), provider)
    }

    /// Initializes the app with custom `opts` and `provider`.
    pub(crate) fn setup_with(opts: AuthnOptions, provider: MockProvider) -> Self {
        let inner = testutils::TestContext::setup_with(opts, provider);
        let app = ResponseMapper::new(true).attach(Router::new().nest("/auth", app(inner.driver())));
        Self { inner, app }
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Gets the clock used by the app.
    pub(crate) fn clock(&self) -> &SettableClock {
        self.inner.clock()
    }

    /// Gets the identity provider known to the app.
    pub(crate) fn provider(&self) -> &MockProvider {
        self.inner.provider()
    }

    /// Gets a copy of the driver used by the app.
    pub(crate) fn driver(&self) -> AuthnDriver {
        self.inner.driver()
    }

    /// Obtains an access token for `username` without going through the REST API.
    pub(crate) async fn login(&self, username: &str) -> AccessToken {
        let credentials = Credentials::new(username, "secret", "web").unwrap();
        self.driver().grant_intent(TEST_PROVIDER, credentials).await.unwrap()
    }
}
