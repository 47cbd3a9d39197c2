use serde::{Deserialize, Serialize};

/// One row of the glossary: a term across the four languages plus its context.
///
/// Serializes with the column names the front-end reads
/// (`isiZulu`, `English`, ..., `file_path`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CorpusEntry {
    #[serde(skip_serializing, default)]
    pub id: i64,
    #[serde(rename = "isiZulu")]
    #[sqlx(rename = "isiZulu")]
    pub isizulu: String,
    #[serde(rename = "English")]
    #[sqlx(rename = "English")]
    pub english: String,
    #[serde(rename = "isiXhosa")]
    #[sqlx(rename = "isiXhosa")]
    pub isixhosa: Option<String>,
    #[serde(rename = "siSwati")]
    #[sqlx(rename = "siSwati")]
    pub siswati: Option<String>,
    #[serde(rename = "Context")]
    #[sqlx(rename = "Context")]
    pub context: String,
    #[serde(rename = "Page")]
    #[sqlx(rename = "Page")]
    pub page: Option<String>,
    pub file_path: Option<String>,
}

impl CorpusEntry {
    /// The four searchable language columns, absent ones as ""
    pub fn language_columns(&self) -> [&str; 4] {
        [
            self.isizulu.as_str(),
            self.english.as_str(),
            self.isixhosa.as_deref().unwrap_or(""),
            self.siswati.as_deref().unwrap_or(""),
        ]
    }

    /// Case-insensitive substring test across the language columns.
    /// `needle` must already be lowercase.
    pub fn contains(&self, needle: &str) -> bool {
        self.language_columns()
            .iter()
            .any(|column| column.to_lowercase().contains(needle))
    }
}

/// A validated entry ready to be inserted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    pub isizulu: String,
    pub english: String,
    pub isixhosa: Option<String>,
    pub siswati: Option<String>,
    pub context: String,
    pub page: Option<String>,
    pub file_path: Option<String>,
}

/// Why a [`NewEntry`] could not be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRejection {
    MissingRequired,
}

impl EntryRejection {
    pub fn message(&self) -> &'static str {
        match self {
            EntryRejection::MissingRequired => "isiZulu, English and Context are required.",
        }
    }
}

impl NewEntry {
    /// Trim every field; required fields must be non-empty, empty optional
    /// fields become `None`.
    pub fn from_parts(
        isizulu: &str,
        english: &str,
        isixhosa: &str,
        siswati: &str,
        context: &str,
        page: &str,
    ) -> Result<Self, EntryRejection> {
        let isizulu = isizulu.trim();
        let english = english.trim();
        let context = context.trim();

        if isizulu.is_empty() || english.is_empty() || context.is_empty() {
            return Err(EntryRejection::MissingRequired);
        }

        Ok(Self {
            isizulu: isizulu.to_string(),
            english: english.to_string(),
            isixhosa: non_empty(isixhosa),
            siswati: non_empty(siswati),
            context: context.to_string(),
            page: non_empty(page),
            file_path: None,
        })
    }

    /// The entry recorded for an uploaded document
    pub fn uploaded_document(filename: &str, file_path: String) -> Self {
        Self {
            isizulu: "File Upload".to_string(),
            english: filename.to_string(),
            context: "Uploaded document".to_string(),
            file_path: Some(file_path),
            ..Default::default()
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Registered user. `password` holds the hex SHA-256 digest.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(isizulu: &str, english: &str, isixhosa: Option<&str>) -> CorpusEntry {
        CorpusEntry {
            id: 1,
            isizulu: isizulu.to_string(),
            english: english.to_string(),
            isixhosa: isixhosa.map(str::to_string),
            siswati: None,
            context: "Greeting used in the morning".to_string(),
            page: None,
            file_path: None,
        }
    }

    #[test]
    fn test_contains_is_substring_and_case_insensitive() {
        let e = entry("Sawubona", "Hello", Some("Molo"));
        assert!(e.contains("ubo"));
        assert!(e.contains("hello"));
        assert!(e.contains("molo"));
        // Context is not a search column
        assert!(!e.contains("morning"));
    }

    #[test]
    fn test_new_entry_requires_fields() {
        assert_eq!(
            NewEntry::from_parts("", "hello", "", "", "greeting", ""),
            Err(EntryRejection::MissingRequired)
        );
        assert_eq!(
            NewEntry::from_parts("sawubona", "   ", "", "", "greeting", ""),
            Err(EntryRejection::MissingRequired)
        );
        assert_eq!(
            NewEntry::from_parts("sawubona", "hello", "", "", "", ""),
            Err(EntryRejection::MissingRequired)
        );
    }

    #[test]
    fn test_new_entry_trims_and_drops_empty_optionals() {
        let e = NewEntry::from_parts(" sawubona ", "hello", " molo ", "  ", "greeting", "").unwrap();
        assert_eq!(e.isizulu, "sawubona");
        assert_eq!(e.isixhosa.as_deref(), Some("molo"));
        assert_eq!(e.siswati, None);
        assert_eq!(e.page, None);
    }

    #[test]
    fn test_entry_serializes_with_column_names() {
        let json = serde_json::to_value(entry("sawubona", "hello", None)).unwrap();
        assert_eq!(json["isiZulu"], "sawubona");
        assert_eq!(json["English"], "hello");
        assert!(json["isiXhosa"].is_null());
        assert!(json.get("id").is_none());
        assert!(json.get("file_path").is_some());
    }
}
