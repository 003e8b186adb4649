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

//! Operations on a single book.

use crate::db::BookRepository;
use crate::driver::Driver;
use crate::model::{Book, BookData, BookId};
use bookshelf_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Gets the book identified by `id`.
    pub(crate) async fn get_book(self, id: BookId) -> DriverResult<Book> {
        let book = self.db.ex().await?.get_book(id).await?;
        Ok(book)
    }

    /// Deletes the book identified by `id` and returns the number of deleted books, which is zero
    /// if the book did not exist.
    pub(crate) async fn delete_book(self, id: BookId) -> DriverResult<u64> {
        let deleted = self.db.ex().await?.delete_book(id).await?;
        Ok(deleted)
    }

    /// Replaces the contents of the book identified by `id` with `data` and returns the book as
    /// stored after the update.
    pub(crate) async fn update_book(self, id: BookId, data: BookData) -> DriverResult<Book> {
        let now = self.clock.now_utc();

        let mut tx = self.db.begin().await?;
        if tx.ex().update_book(id, &data, now).await? == 0 {
            return Err(DriverError::NotFound(format!("Book {} not found", id)));
        }
        let book = tx.ex().get_book(id).await?;
        tx.commit().await?;
        Ok(book)
    }
}
