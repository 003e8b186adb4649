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

//! API to get a single book.

use crate::driver::Driver;
use crate::rest::BookIdPath;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use bookshelf_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    BookIdPath(id): BookIdPath,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let book = driver.get_book(id).await?;

    Ok(Json(book))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    fn route<I: std::fmt::Display>(id: I) -> (http::Method, String) {
        (http::Method::GET, format!("/books/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        context.add_book("Dune", 1).await;
        let book = context.add_book("Emma", 2).await;

        let response = OneShotBuilder::new(context.app(), route(book.id()))
            .send_empty()
            .await
            .expect_json::<Book>()
            .await;
        assert_eq!(book, response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        context.add_book("Dune", 1).await;

        OneShotBuilder::new(context.app(), route(999999))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("err.not_found", "Entity not found")
            .await;
    }

    #[tokio::test]
    async fn test_id_not_a_number() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("first"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("err.not_found", "Cannot parse")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
