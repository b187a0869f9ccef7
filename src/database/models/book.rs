use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored book row. `isbn` is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Create payload; every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Update payload. Absent fields keep their stored value.
///
/// `isbn` may be echoed back by clients but is never written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl From<NewBook> for Book {
    fn from(new: NewBook) -> Self {
        Self {
            isbn: new.isbn,
            amazon_url: new.amazon_url,
            author: new.author,
            language: new.language,
            pages: new.pages,
            publisher: new.publisher,
            title: new.title,
            year: new.year,
        }
    }
}

impl Book {
    /// Apply the fields present in `changes` over this record. `isbn` is left untouched.
    pub fn apply(&mut self, changes: BookUpdate) {
        if let Some(v) = changes.amazon_url {
            self.amazon_url = v;
        }
        if let Some(v) = changes.author {
            self.author = v;
        }
        if let Some(v) = changes.language {
            self.language = v;
        }
        if let Some(v) = changes.pages {
            self.pages = v;
        }
        if let Some(v) = changes.publisher {
            self.publisher = v;
        }
        if let Some(v) = changes.title {
            self.title = v;
        }
        if let Some(v) = changes.year {
            self.year = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hume() -> Book {
        Book {
            isbn: "123456789".to_string(),
            amazon_url: "http://a.co/xyz".to_string(),
            author: "David Hume".to_string(),
            language: "english".to_string(),
            pages: 350,
            publisher: "None".to_string(),
            title: "A Treatise on Human Nature".to_string(),
            year: 1748,
        }
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut book = hume();
        let changes: BookUpdate = serde_json::from_value(json!({ "year": 1739 })).unwrap();
        book.apply(changes);

        assert_eq!(book.year, 1739);
        assert_eq!(book.title, "A Treatise on Human Nature");
        assert_eq!(book.pages, 350);
    }

    #[test]
    fn apply_never_changes_isbn() {
        let mut book = hume();
        book.apply(BookUpdate {
            isbn: Some("000".to_string()),
            ..Default::default()
        });
        assert_eq!(book.isbn, "123456789");
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let value = serde_json::to_value(hume()).unwrap();
        assert_eq!(value["amazon_url"], "http://a.co/xyz");
        assert_eq!(value["pages"], 350);
        assert_eq!(value.as_object().unwrap().len(), 8);
    }
}
