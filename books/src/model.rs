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

//! High-level data types.

use bookshelf_core::model::{ModelError, ModelResult, validate_ascii_text};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Minimum length of a book name.
const BOOK_NAME_MIN_LENGTH: usize = 3;

/// Maximum length of a book name as specified in the schema.
const BOOK_NAME_MAX_LENGTH: usize = 60;

/// Maximum number of items of a single book.
const MAX_ITEMS: u8 = 130;

/// Identifier of a book.  We store this as an u64 but guarantee that it is usable in an i64
/// context because the database backends need it.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct BookId(u64);

impl BookId {
    /// Creates a book identifier from a `u64` with range validation.
    pub(crate) fn new(id: u64) -> ModelResult<Self> {
        match i64::try_from(id) {
            Ok(_) => Ok(Self(id)),
            Err(e) => Err(ModelError(format!("Book id cannot be represented: {}", e))),
        }
    }

    /// Creates a book identifier from an `i64` with range validation.
    pub(crate) fn from_i64(id: i64) -> ModelResult<Self> {
        match u64::try_from(id) {
            Ok(id) => Ok(Self(id)),
            Err(e) => Err(ModelError(format!("Book id cannot be represented: {}", e))),
        }
    }

    /// Returns the identifier as an `i64`.
    pub(crate) fn as_i64(&self) -> i64 {
        i64::try_from(self.0).expect("i64 compatibility validated at construction time")
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a book: between 3 and 60 printable ASCII characters.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct BookName(String);

impl BookName {
    /// Creates a new book name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        validate_ascii_text("book name", &s, BOOK_NAME_MIN_LENGTH, BOOK_NAME_MAX_LENGTH, true)?;
        Ok(Self(s))
    }

    /// Creates a new book name from an untrusted string `s`, without validation.  Useful for
    /// testing purposes only.
    #[cfg(test)]
    pub(crate) fn new_invalid<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
impl From<&'static str> for BookName {
    /// Creates a new book name from a hardcoded string, which must be valid.
    fn from(name: &'static str) -> Self {
        BookName::new(name).expect("Hardcoded book names must be valid")
    }
}

/// A deserialization visitor for a `BookName`.
struct BookNameVisitor;

impl Visitor<'_> for BookNameVisitor {
    type Value = BookName;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        BookName::new(v).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        BookName::new(v).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for BookName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_string(BookNameVisitor)
    }
}

/// Number of items of a book, between 0 and 130.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct ItemCount(u8);

impl ItemCount {
    /// Creates a new item count from an untrusted `u64`, making sure it is in range.
    pub(crate) fn new(count: u64) -> ModelResult<Self> {
        match u8::try_from(count) {
            Ok(count) if count <= MAX_ITEMS => Ok(Self(count)),
            _ => Err(ModelError(format!("Items must be between 0 and {}", MAX_ITEMS))),
        }
    }

    /// Creates a new item count from an `i64` as extracted from the database.
    pub(crate) fn from_i64(count: i64) -> ModelResult<Self> {
        match u64::try_from(count) {
            Ok(count) => Self::new(count),
            Err(_) => Err(ModelError(format!("Items must be between 0 and {}", MAX_ITEMS))),
        }
    }

    /// Returns the count as an `i16`, which is what the database stores.
    pub(crate) fn as_i16(&self) -> i16 {
        i16::from(self.0)
    }
}

/// A deserialization visitor for an `ItemCount`.
struct ItemCountVisitor;

impl Visitor<'_> for ItemCountVisitor {
    type Value = ItemCount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        ItemCount::new(v).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        ItemCount::from_i64(v).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for ItemCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_u64(ItemCountVisitor)
    }
}

/// The client-writable fields of a book.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct BookData {
    /// Name of the book.  Must be unique across all books.
    name: BookName,

    /// Number of items of the book.
    items: ItemCount,
}

/// A book as persisted in the database.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Book {
    /// Server-assigned identifier.
    id: BookId,

    /// Name of the book.
    name: BookName,

    /// Number of items of the book.
    items: ItemCount,

    /// Time when the book was created.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,

    /// Time when the book was last updated, or none if it was never updated.
    #[serde(with = "time::serde::rfc3339::option")]
    updated_at: Option<OffsetDateTime>,
}

impl Book {
    /// Creates a book that has never been updated.
    pub(crate) fn new(id: BookId, data: BookData, created_at: OffsetDateTime) -> Self {
        let BookData { name, items } = data;
        Self { id, name, items, created_at, updated_at: None }
    }

    /// Modifies a book to record its most recent update time.
    pub(crate) fn with_updated_at(mut self, updated_at: OffsetDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }
}
