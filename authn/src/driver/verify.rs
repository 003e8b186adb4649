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

//! Extends the driver with the `verify` method.

use crate::driver::AuthnDriver;
use crate::model::{AccessToken, AccessTokenData};
use bookshelf_core::driver::{DriverError, DriverResult};

impl AuthnDriver {
    /// Validates the signature and expiration of `token` and returns the data it carries.
    pub async fn verify(self, token: AccessToken) -> DriverResult<AccessTokenData> {
        let claims = self.decode(&token)?;

        let now = self.clock.now_utc().unix_timestamp();
        if now >= claims.exp {
            return Err(DriverError::Unauthorized(
                "Access token expired; please log in again".to_owned(),
            ));
        }

        Ok(claims.data)
    }
}
