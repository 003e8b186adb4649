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

//! Wire-level input types and their mapping to entity values.

use crate::model::{BookData, BookId, BookName, ItemCount};
use log::debug;
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

/// Input payload to create a new book.  The identifier is assigned by the server.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
#[serde(rename_all = "PascalCase")]
pub(crate) struct BookCreateIn {
    /// Name of the new book.
    pub(crate) name: BookName,

    /// Number of items of the new book.
    pub(crate) items: ItemCount,
}

impl From<BookCreateIn> for BookData {
    fn from(input: BookCreateIn) -> Self {
        BookData::new(input.name, input.items)
    }
}

/// Input payload to replace the contents of an existing book.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
#[serde(rename_all = "PascalCase")]
pub(crate) struct BookUpdateIn {
    /// Identifier of the book as sent by the client.  The identifier in the request path wins.
    #[serde(default)]
    pub(crate) id: Option<u64>,

    /// New name of the book.
    pub(crate) name: BookName,

    /// New number of items of the book.
    pub(crate) items: ItemCount,
}

impl BookUpdateIn {
    /// Converts the payload into the entity values to update the book identified by `path_id`.
    pub(crate) fn into_update(self, path_id: BookId) -> (BookId, BookData) {
        if let Some(id) = self.id.filter(|id| BookId::new(*id).ok() != Some(path_id)) {
            debug!("Ignoring id {} in payload to update book {}", id, path_id);
        }
        (path_id, BookData::new(self.name, self.items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_in_json() {
        let input: BookCreateIn =
            serde_json::from_value(serde_json::json!({"Name": "Dune", "Items": 3})).unwrap();
        assert_eq!(
            BookData::new(BookName::from("Dune"), ItemCount::new(3).unwrap()),
            BookData::from(input)
        );
    }

    #[test]
    fn test_create_in_json_invalid() {
        for (json, error) in [
            (serde_json::json!({"Name": "ab", "Items": 3}), "Book name must have"),
            (serde_json::json!({"Name": "Dune", "Items": 131}), "Items must be between"),
            (serde_json::json!({"Name": "Dune", "Items": -1}), "Items must be between"),
            (serde_json::json!({"Name": "Dune"}), "missing field `Items`"),
            (serde_json::json!({"name": "Dune", "Items": 3}), "missing field `Name`"),
        ] {
            let e = serde_json::from_value::<BookCreateIn>(json).unwrap_err();
            assert!(e.to_string().contains(error), "{} does not contain {}", e, error);
        }
    }

    #[test]
    fn test_update_in_path_id_wins() {
        let path_id = BookId::new(5).unwrap();
        let data = BookData::new(BookName::from("Dune"), ItemCount::new(3).unwrap());

        for json in [
            serde_json::json!({"Name": "Dune", "Items": 3}),
            serde_json::json!({"Id": 5, "Name": "Dune", "Items": 3}),
            serde_json::json!({"Id": 8, "Name": "Dune", "Items": 3}),
        ] {
            let input: BookUpdateIn = serde_json::from_value(json).unwrap();
            assert_eq!((path_id, data.clone()), input.into_update(path_id));
        }
    }
}
