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

//! Operations on the collection of books.

use crate::db::BookRepository;
use crate::driver::Driver;
use crate::model::{Book, BookData};
use bookshelf_core::driver::DriverResult;

impl Driver {
    /// Gets all existing books.
    pub(crate) async fn get_books(self) -> DriverResult<Vec<Book>> {
        let books = self.db.ex().await?.get_books().await?;
        Ok(books)
    }

    /// Creates a new book with `data`, failing if another book already has the same name.
    pub(crate) async fn create_book(self, data: BookData) -> DriverResult<Book> {
        let now = self.clock.now_utc();

        let mut tx = self.db.begin().await?;
        let book = tx.ex().add_book(&data, now).await?;
        tx.commit().await?;
        Ok(book)
    }
}
