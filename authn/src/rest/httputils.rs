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

//! Utilities to deal with HTTP authorization.

use crate::model::AccessToken;
use axum::http::HeaderMap;
use bookshelf_core::rest::{RestError, RestResult, get_unique_header};

/// Validates that the `Authorization` HTTP header contains a textual payload for the
/// `exp_scheme` scheme and returns it.
fn get_authorization_header<'a>(
    headers: &'a HeaderMap,
    exp_scheme: &'static str,
) -> RestResult<&'a str> {
    let authz = match get_unique_header(headers, "Authorization") {
        Ok(Some(value)) => value,
        Ok(None) => {
            return Err(RestError::Unauthorized("Missing Authorization header".to_owned()));
        }
        Err(e) => return Err(RestError::Unauthorized(e.to_string())),
    };

    let authz = match authz.to_str() {
        Ok(value) => value,
        Err(e) => {
            return Err(RestError::Unauthorized(format!(
                "Bad encoding in Authorization header: {}",
                e
            )));
        }
    };

    let mut fields = authz.splitn(2, ' ');
    let scheme = match fields.next() {
        Some(s) if !s.is_empty() => s,
        _ => {
            return Err(RestError::Unauthorized(
                "Bad Authorization header: missing scheme".to_owned(),
            ));
        }
    };
    let payload = match fields.next() {
        Some(s) => s,
        None => {
            return Err(RestError::Unauthorized(
                "Bad Authorization header: missing payload".to_owned(),
            ));
        }
    };

    if scheme != exp_scheme {
        return Err(RestError::Unauthorized("Unsupported scheme".to_owned()));
    }

    Ok(payload)
}

/// Assumes that the `headers` contain a bearer access token and extracts it.
pub fn get_bearer_auth(headers: &HeaderMap) -> RestResult<AccessToken> {
    let payload = get_authorization_header(headers, "Bearer")?;
    match AccessToken::new(payload) {
        Ok(token) => Ok(token),
        Err(e) => Err(RestError::Unauthorized(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_get_bearer_auth_ok() {
        let mut headers = HeaderMap::new();
        headers.append("Authorization", "Bearer a.b.c".parse().unwrap());
        assert_eq!(AccessToken::new("a.b.c").unwrap(), get_bearer_auth(&headers).unwrap());
    }

    /// Runs `get_bearer_auth` with an invalid set of header `values` and ensures that the call
    /// fails with an `Unauthorized` error that contains `exp_error` in the failure message.
    fn do_get_bearer_auth_error_test(exp_error: &str, values: &[&[u8]]) {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append("Authorization", HeaderValue::from_bytes(value).unwrap());
        }
        match get_bearer_auth(&headers) {
            Err(ref e @ RestError::Unauthorized(ref message)) => {
                assert!(
                    message.contains(exp_error),
                    "message '{}' does not contain '{}'",
                    message,
                    exp_error
                );
                assert!(e.to_string().contains(exp_error));
            }
            e => panic!("{:?}", e),
        }
    }

    #[test]
    fn test_get_bearer_auth_missing() {
        do_get_bearer_auth_error_test("Missing Authorization", &[]);
    }

    #[test]
    fn test_get_bearer_auth_duplicate() {
        do_get_bearer_auth_error_test("cannot have more than one value", &[b"abc", b"def"]);
    }

    #[test]
    fn test_get_bearer_auth_invalid_encoding() {
        do_get_bearer_auth_error_test("Bad encoding in Authorization", &[b"bad \xc5 bytes"]);
    }

    #[test]
    fn test_get_bearer_auth_missing_scheme() {
        do_get_bearer_auth_error_test("missing scheme", &[b""]);
    }

    #[test]
    fn test_get_bearer_auth_missing_payload() {
        do_get_bearer_auth_error_test("missing payload", &[b"Bearer"]);
    }

    #[test]
    fn test_get_bearer_auth_unsupported_scheme() {
        do_get_bearer_auth_error_test("Unsupported scheme", &[b"Basic 123"]);
    }

    #[test]
    fn test_get_bearer_auth_invalid_token() {
        do_get_bearer_auth_error_test("Invalid access token", &[b"Bearer a b"]);
    }
}
