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

//! Test utilities for the business layer.

use crate::db::init_schema;
use crate::driver::Driver;
use bookshelf_core::clocks::testutils::MonotonicClock;
use bookshelf_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a monotonic clock that starts at
    /// `start_secs` since the epoch.
    pub(crate) async fn setup(start_secs: u64) -> Self {
        let db = Arc::new(bookshelf_core::db::sqlite::testutils::setup().await);
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(MonotonicClock::new(start_secs));
        let driver = Driver::new(db.clone(), clock);
        Self { db, driver }
    }

    /// Obtains a direct executor against the database to inspect or tweak its contents.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Obtains a copy of the driver to run a single operation.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }
}
