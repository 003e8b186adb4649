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

//! Extends the driver with the `grant_intent` method.

use crate::driver::AuthnDriver;
use crate::model::{AccessToken, AccessTokenData, Credentials};
use bookshelf_core::driver::{DriverError, DriverResult};
use log::{debug, warn};

impl AuthnDriver {
    /// Asks the provider named `provider` to authenticate the user with `credentials` and, if
    /// successful, mints an access token with the claims that the provider returned.
    pub(crate) async fn grant_intent(
        self,
        provider: &str,
        credentials: Credentials,
    ) -> DriverResult<AccessToken> {
        let auth_provider = match self.providers.get(provider) {
            Some(auth_provider) => auth_provider,
            None => return Err(DriverError::UnknownProvider(provider.to_owned())),
        };

        let grant = match auth_provider.grant(&credentials).await {
            Ok(grant) => grant,
            Err(e) => {
                warn!("Provider {} denied access to {}: {}", provider, credentials.username(), e);
                return Err(e.into());
            }
        };

        let token = self.sign(AccessTokenData::from(grant))?;
        debug!("Provider {} granted access to {}", provider, credentials.username());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use crate::driver::testutils::*;
    use crate::model::*;
    use crate::provider::ProviderError;
    use bookshelf_core::driver::DriverError;

    #[tokio::test]
    async fn test_grant_intent_ok() {
        let context = TestContext::setup();

        let token = context
            .driver()
            .grant_intent(TEST_PROVIDER, Credentials::new("alice", "secret", "web").unwrap())
            .await
            .unwrap();

        let data = context.driver().verify(token).await.unwrap();
        assert_eq!(
            AccessTokenData {
                scope: vec!["books:read".to_owned(), "books:write".to_owned()],
                claims: Claims { sub: "alice-client".to_owned(), rol: "admin".to_owned() },
            },
            data
        );
        assert_eq!(1, context.provider().calls());
    }

    #[tokio::test]
    async fn test_grant_intent_unknown_provider() {
        let context = TestContext::setup();

        assert_eq!(
            DriverError::UnknownProvider("other".to_owned()),
            context
                .driver()
                .grant_intent("other", Credentials::new("alice", "secret", "web").unwrap())
                .await
                .unwrap_err()
        );
        assert_eq!(0, context.provider().calls());
    }

    #[tokio::test]
    async fn test_grant_intent_provider_errors() {
        let provider = test_provider()
            .with_error("net", ProviderError::Network("refused".to_owned()))
            .with_error("other", ProviderError::Other("bad payload".to_owned()));
        let context = TestContext::setup_with(test_options(), provider);

        for (username, exp_error) in [
            ("net", DriverError::Unavailable("Cannot reach provider: refused".to_owned())),
            ("other", DriverError::InternalError("Provider failure: bad payload".to_owned())),
            (
                "mallory",
                DriverError::Unauthorized(
                    "Provider rejected the credentials: Unknown user mallory".to_owned(),
                ),
            ),
        ] {
            let credentials = Credentials::new(username, "secret", "web").unwrap();
            assert_eq!(
                exp_error,
                context.driver().grant_intent(TEST_PROVIDER, credentials).await.unwrap_err()
            );
        }
        assert_eq!(3, context.provider().calls());
    }
}
