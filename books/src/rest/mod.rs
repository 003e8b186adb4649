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

//! REST interface for the books service.

use crate::driver::Driver;
use crate::model::BookId;
use async_trait::async_trait;
use axum::Router;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use bookshelf_core::rest::{RestError, not_found_fallback};

mod book_delete;
mod book_get;
mod book_put;
mod books_get;
mod books_post;
mod dto;
#[cfg(test)]
mod testutils;

/// Extractor for the `:id` path segment of the APIs that operate on a single book.
///
/// Segments that are not unsigned integers, or that do not fit the storage type, cannot name an
/// existing book so they are reported as not found.
pub(crate) struct BookIdPath(pub(crate) BookId);

#[async_trait]
impl<S> FromRequestParts<S> for BookIdPath
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = match Path::<u64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => id,
            Err(e) => return Err(RestError::NotFound(e.body_text())),
        };
        match BookId::new(id) {
            Ok(id) => Ok(BookIdPath(id)),
            Err(e) => Err(RestError::NotFound(e.to_string())),
        }
    }
}

/// Creates the router for the books API.
///
/// The returned router does not expose error details: callers must attach a `ResponseMapper`.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/books", get(books_get::handler).post(books_post::handler))
        .route(
            "/books/:id",
            get(book_get::handler).put(book_put::handler).delete(book_delete::handler),
        )
        .fallback(not_found_fallback)
        .with_state(driver)
}
