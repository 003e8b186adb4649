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

use crate::db::{BookRepository, init_schema};
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use bookshelf_core::clocks::testutils::MonotonicClock;
use bookshelf_core::db::{Db, DbResult};
use bookshelf_core::rest::ResponseMapper;
use std::sync::Arc;

/// Seconds since the epoch at which the clock of the test context starts.
pub(crate) const START_SECS: u64 = 1000;

pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The app under test, with error details enabled.
    app: Router,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(bookshelf_core::db::sqlite::testutils::setup().await);
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(MonotonicClock::new(START_SECS));
        let driver = Driver::new(db.clone(), clock);
        let app = ResponseMapper::new(true).attach(app(driver));
        Self { db, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Adds a book directly to the database, bypassing the API.
    pub(crate) async fn add_book(&self, name: &'static str, items: u64) -> Book {
        let data = BookData::new(BookName::from(name), ItemCount::new(items).unwrap());
        let created_at = time::OffsetDateTime::from_unix_timestamp(1).unwrap();
        self.db.ex().await.unwrap().add_book(&data, created_at).await.unwrap()
    }

    /// Gets a book directly from the database, bypassing the API.
    pub(crate) async fn get_book(&self, id: BookId) -> DbResult<Book> {
        self.db.ex().await.unwrap().get_book(id).await
    }

    /// Gets all books directly from the database, bypassing the API.
    pub(crate) async fn get_books(&self) -> Vec<Book> {
        self.db.ex().await.unwrap().get_books().await.unwrap()
    }
}
