use std::fmt;

use serde::{Deserialize, Serialize};

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Store-assigned identifier, immutable after creation
    pub id: String,
    /// Display name, unique across the catalog
    pub name: String,
    /// Poster image URL
    pub img: String,
    /// Short synopsis
    pub summary: String,
}

impl Movie {
    /// Attach an identifier to a draft.
    pub fn from_draft(id: impl Into<String>, draft: MovieDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            img: draft.img,
            summary: draft.summary,
        }
    }

    /// Editable fields of this record, as a form would be seeded with them.
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            name: self.name.clone(),
            img: self.img.clone(),
            summary: self.summary.clone(),
        }
    }
}

/// Candidate field values for creating or replacing a movie.
///
/// All three fields are required on the wire, so a body that omits one is
/// rejected instead of silently blanking the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub name: String,
    pub img: String,
    pub summary: String,
}

impl MovieDraft {
    pub fn new(
        name: impl Into<String>,
        img: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            img: img.into(),
            summary: summary.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            img: self.img.trim().to_string(),
            summary: self.summary.trim().to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Img => &self.img,
            Field::Summary => &self.summary,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Img => &mut self.img,
            Field::Summary => &mut self.summary,
        };
        *slot = value.into();
    }
}

/// Editable movie fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Img,
    Summary,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Img, Field::Summary];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Img => "img",
            Field::Summary => "summary",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
