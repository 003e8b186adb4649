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

//! Utilities to help testing services that integrate with the `authn` features.

use crate::driver::{AuthnDriver, AuthnOptions};
use crate::provider::{AuthProvider, MockProvider};
use bookshelf_core::clocks::testutils::{SettableClock, utc_datetime};
use std::sync::Arc;
use std::time::Duration;

/// Name of the provider configured by the test context.
pub const TEST_PROVIDER: &str = "mock";

/// Returns the options used by the test context.
pub fn test_options() -> AuthnOptions {
    AuthnOptions {
        sign_key: "test signing key".to_owned(),
        token_max_age: Duration::from_secs(60 * 60),
    }
}

/// Returns the provider used by the test context, which knows about a single user `alice`.
pub fn test_provider() -> MockProvider {
    MockProvider::new(TEST_PROVIDER).with_user("alice", "admin", "books:read books:write")
}

/// State of a running test.
pub struct TestContext {
    /// The clock used by the driver.
    clock: Arc<SettableClock>,

    /// The identity provider known to the driver.
    provider: MockProvider,

    /// The driver to handle authentication flows.
    driver: AuthnDriver,
}

impl TestContext {
    /// Initializes the driver with the default test options and provider.
    pub fn setup() -> Self {
        Self::setup_with(test_options(), test_provider())
    }

    /// Initializes the driver with the given `opts` and a single `provider`.
    pub fn setup_with(opts: AuthnOptions, provider: MockProvider) -> Self {
        let clock = Arc::from(SettableClock::new(utc_datetime(2023, 6, 1, 12, 0, 0)));
        let auth_provider: Arc<dyn AuthProvider + Send + Sync> = Arc::new(provider.clone());
        let driver = AuthnDriver::new(clock.clone(), vec![auth_provider], opts);
        Self { clock, provider, driver }
    }

    /// Gets the clock used by the driver.
    pub fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Gets the identity provider known to the driver.
    pub fn provider(&self) -> &MockProvider {
        &self.provider
    }

    /// Gets a copy of the driver in this test context.
    pub fn driver(&self) -> AuthnDriver {
        self.driver.clone()
    }
}
