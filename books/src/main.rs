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

//! Entry point to the books service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf_books::config::Config;
use bookshelf_books::db::init_schema;
use bookshelf_books::serve;
use bookshelf_core::clocks::SystemClock;
use bookshelf_core::db::Db;
use bookshelf_core::db::postgres::PostgresDb;
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config::from_env("BOOKSHELF")?;

    let db: Arc<dyn Db + Send + Sync> = Arc::new(PostgresDb::connect(config.db.clone())?);
    let result = match db.ex().await {
        Ok(mut ex) => init_schema(&mut ex).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        db.close().await;
        return Err(e.into());
    }

    serve(config, db, Arc::new(SystemClock::default())).await
}
