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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::{Book, BookData, BookId, BookName, ItemCount};
use async_trait::async_trait;
#[cfg(feature = "postgres")]
use bookshelf_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use bookshelf_core::db::sqlite::{self, build_optional_timestamp, build_timestamp, unpack_timestamp};
use bookshelf_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Book {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let items: i16 = row.try_get("items").map_err(postgres::map_sqlx_error)?;
        let created_at: OffsetDateTime =
            row.try_get("created_at").map_err(postgres::map_sqlx_error)?;
        let updated_at: Option<OffsetDateTime> =
            row.try_get("updated_at").map_err(postgres::map_sqlx_error)?;

        let data = BookData::new(BookName::new(name)?, ItemCount::from_i64(i64::from(items))?);
        let mut book = Book::new(BookId::from_i64(id)?, data, created_at);
        if let Some(updated_at) = updated_at {
            book = book.with_updated_at(updated_at);
        }
        Ok(book)
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Book {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let items: i64 = row.try_get("items").map_err(sqlite::map_sqlx_error)?;
        let created_at_secs: i64 =
            row.try_get("created_at_secs").map_err(sqlite::map_sqlx_error)?;
        let created_at_nsecs: i64 =
            row.try_get("created_at_nsecs").map_err(sqlite::map_sqlx_error)?;
        let updated_at_secs: Option<i64> =
            row.try_get("updated_at_secs").map_err(sqlite::map_sqlx_error)?;
        let updated_at_nsecs: Option<i64> =
            row.try_get("updated_at_nsecs").map_err(sqlite::map_sqlx_error)?;

        let data = BookData::new(BookName::new(name)?, ItemCount::from_i64(items)?);
        let created_at = build_timestamp(created_at_secs, created_at_nsecs)?;
        let mut book = Book::new(BookId::from_i64(id)?, data, created_at);
        if let Some(updated_at) = build_optional_timestamp(updated_at_secs, updated_at_nsecs)? {
            book = book.with_updated_at(updated_at);
        }
        Ok(book)
    }
}

/// Persistence operations on books.
#[async_trait]
pub(crate) trait BookRepository {
    /// Gets all existing books, sorted by their identifier.
    async fn get_books(&mut self) -> DbResult<Vec<Book>>;

    /// Gets the book identified by `id`.
    async fn get_book(&mut self, id: BookId) -> DbResult<Book>;

    /// Stores a new book with `data` as created at `created_at`, failing if a book with the same
    /// name already exists.  Returns the stored book with its server-assigned fields.
    async fn add_book(&mut self, data: &BookData, created_at: OffsetDateTime) -> DbResult<Book>;

    /// Deletes the book identified by `id` and returns the number of affected rows.
    async fn delete_book(&mut self, id: BookId) -> DbResult<u64>;

    /// Replaces the contents of the book identified by `id` with `data`, recording `updated_at`
    /// as its last update time.  Returns the number of affected rows.
    async fn update_book(
        &mut self,
        id: BookId,
        data: &BookData,
        updated_at: OffsetDateTime,
    ) -> DbResult<u64>;
}

#[async_trait]
impl BookRepository for Executor {
    async fn get_books(&mut self) -> DbResult<Vec<Book>> {
        let query_str = "SELECT * FROM books ORDER BY id";
        match self {
            #[cfg(feature = "postgres")]
            Executor::Postgres(ex) => {
                let rows = sqlx::query(query_str)
                    .fetch_all(ex.conn())
                    .await
                    .map_err(postgres::map_sqlx_error)?;
                rows.into_iter().map(Book::try_from).collect()
            }

            #[cfg(any(feature = "sqlite", test))]
            Executor::Sqlite(ex) => {
                let rows = sqlx::query(query_str)
                    .fetch_all(ex.conn())
                    .await
                    .map_err(sqlite::map_sqlx_error)?;
                rows.into_iter().map(Book::try_from).collect()
            }

            #[allow(unused)]
            _ => unreachable!(),
        }
    }

    async fn get_book(&mut self, id: BookId) -> DbResult<Book> {
        match self {
            #[cfg(feature = "postgres")]
            Executor::Postgres(ex) => {
                let query_str = "SELECT * FROM books WHERE id = $1";
                let row = sqlx::query(query_str)
                    .bind(id.as_i64())
                    .fetch_one(ex.conn())
                    .await
                    .map_err(postgres::map_sqlx_error)?;
                Book::try_from(row)
            }

            #[cfg(any(feature = "sqlite", test))]
            Executor::Sqlite(ex) => {
                let query_str = "SELECT * FROM books WHERE id = ?";
                let row = sqlx::query(query_str)
                    .bind(id.as_i64())
                    .fetch_one(ex.conn())
                    .await
                    .map_err(sqlite::map_sqlx_error)?;
                Book::try_from(row)
            }

            #[allow(unused)]
            _ => unreachable!(),
        }
    }

    async fn add_book(&mut self, data: &BookData, created_at: OffsetDateTime) -> DbResult<Book> {
        let id = match self {
            #[cfg(feature = "postgres")]
            Executor::Postgres(ex) => {
                let query_str = "SELECT id FROM books WHERE name = $1";
                let existing = sqlx::query(query_str)
                    .bind(data.name().as_str())
                    .fetch_optional(ex.conn())
                    .await
                    .map_err(postgres::map_sqlx_error)?;
                if existing.is_some() {
                    return Err(DbError::AlreadyExists);
                }

                let query_str = "
                    INSERT INTO books (name, items, created_at)
                    VALUES ($1, $2, $3)
                    RETURNING id";
                let row = sqlx::query(query_str)
                    .bind(data.name().as_str())
                    .bind(data.items().as_i16())
                    .bind(created_at)
                    .fetch_one(ex.conn())
                    .await
                    .map_err(postgres::map_sqlx_error)?;
                row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
            }

            #[cfg(any(feature = "sqlite", test))]
            Executor::Sqlite(ex) => {
                let query_str = "SELECT id FROM books WHERE name = ?";
                let existing = sqlx::query(query_str)
                    .bind(data.name().as_str())
                    .fetch_optional(ex.conn())
                    .await
                    .map_err(sqlite::map_sqlx_error)?;
                if existing.is_some() {
                    return Err(DbError::AlreadyExists);
                }

                let (created_at_secs, created_at_nsecs) = unpack_timestamp(created_at)?;

                let query_str = "
                    INSERT INTO books (name, items, created_at_secs, created_at_nsecs)
                    VALUES (?, ?, ?, ?)";
                let done = sqlx::query(query_str)
                    .bind(data.name().as_str())
                    .bind(data.items().as_i16())
                    .bind(created_at_secs)
                    .bind(created_at_nsecs)
                    .execute(ex.conn())
                    .await
                    .map_err(sqlite::map_sqlx_error)?;
                done.last_insert_rowid()
            }

            #[allow(unused)]
            _ => unreachable!(),
        };

        Ok(Book::new(BookId::from_i64(id)?, data.clone(), created_at))
    }

    async fn delete_book(&mut self, id: BookId) -> DbResult<u64> {
        let done = match self {
            #[cfg(feature = "postgres")]
            Executor::Postgres(ex) => {
                let query_str = "DELETE FROM books WHERE id = $1";
                sqlx::query(query_str)
                    .bind(id.as_i64())
                    .execute(ex.conn())
                    .await
                    .map_err(postgres::map_sqlx_error)?
                    .rows_affected()
            }

            #[cfg(any(feature = "sqlite", test))]
            Executor::Sqlite(ex) => {
                let query_str = "DELETE FROM books WHERE id = ?";
                sqlx::query(query_str)
                    .bind(id.as_i64())
                    .execute(ex.conn())
                    .await
                    .map_err(sqlite::map_sqlx_error)?
                    .rows_affected()
            }

            #[allow(unused)]
            _ => unreachable!(),
        };
        Ok(done)
    }

    async fn update_book(
        &mut self,
        id: BookId,
        data: &BookData,
        updated_at: OffsetDateTime,
    ) -> DbResult<u64> {
        let done = match self {
            #[cfg(feature = "postgres")]
            Executor::Postgres(ex) => {
                let query_str = "UPDATE books SET name = $1, items = $2, updated_at = $3 WHERE id = $4";
                sqlx::query(query_str)
                    .bind(data.name().as_str())
                    .bind(data.items().as_i16())
                    .bind(updated_at)
                    .bind(id.as_i64())
                    .execute(ex.conn())
                    .await
                    .map_err(postgres::map_sqlx_error)?
                    .rows_affected()
            }

            #[cfg(any(feature = "sqlite", test))]
            Executor::Sqlite(ex) => {
                let (updated_at_secs, updated_at_nsecs) = unpack_timestamp(updated_at)?;

                let query_str = "
                    UPDATE books
                    SET name = ?, items = ?, updated_at_secs = ?, updated_at_nsecs = ?
                    WHERE id = ?";
                sqlx::query(query_str)
                    .bind(data.name().as_str())
                    .bind(data.items().as_i16())
                    .bind(updated_at_secs)
                    .bind(updated_at_nsecs)
                    .bind(id.as_i64())
                    .execute(ex.conn())
                    .await
                    .map_err(sqlite::map_sqlx_error)?
                    .rows_affected()
            }

            #[allow(unused)]
            _ => unreachable!(),
        };
        Ok(done)
    }
}
