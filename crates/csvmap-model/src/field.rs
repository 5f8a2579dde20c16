//! Logical target fields and the label table that names them for the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the fixed target attributes a source column can be mapped onto.
///
/// The serialized form matches the keys the upload form has always used
/// (`firstName`, `linkedin_url`, ...), so mapping profiles stay compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    #[serde(rename = "firstName")]
    FirstName,
    #[serde(rename = "lastName")]
    LastName,
    #[serde(rename = "headline")]
    Headline,
    #[serde(rename = "linkedin_url")]
    LinkedinUrl,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "company_linkedin")]
    CompanyLinkedin,
    #[serde(rename = "website")]
    Website,
}

impl FieldKey {
    /// All logical fields in form order.
    pub const ALL: [FieldKey; 8] = [
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::Headline,
        FieldKey::LinkedinUrl,
        FieldKey::Email,
        FieldKey::Company,
        FieldKey::CompanyLinkedin,
        FieldKey::Website,
    ];

    /// Key as used in mapping profiles and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Headline => "headline",
            Self::LinkedinUrl => "linkedin_url",
            Self::Email => "email",
            Self::Company => "company",
            Self::CompanyLinkedin => "company_linkedin",
            Self::Website => "website",
        }
    }

    /// Human label shown next to the column picker.
    #[must_use]
    pub const fn form_label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Headline => "Headline",
            Self::LinkedinUrl => "LinkedIn URL",
            Self::Email => "Email",
            Self::Company => "Company",
            Self::CompanyLinkedin => "Company LinkedIn",
            Self::Website => "Website",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = ModelError;

    /// Accepts the profile key exactly, or ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownField(trimmed.to_string()))
    }
}

const STANDARD_LABELS: [(FieldKey, &str); 8] = [
    (FieldKey::FirstName, "First Name"),
    (FieldKey::LastName, "Last Name"),
    (FieldKey::Headline, "Headline"),
    (FieldKey::LinkedinUrl, "Person LinkedIn URL"),
    (FieldKey::Email, "Email"),
    (FieldKey::Company, "Company"),
    (FieldKey::CompanyLinkedin, "Company LinkedIn"),
    (FieldKey::Website, "Website"),
];

/// Static mapping from logical field to the literal output key the backend expects.
///
/// The table is fixed at build time. It is passed explicitly to the transform
/// and the payload builder instead of being read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLabelTable {
    entries: &'static [(FieldKey, &'static str)],
}

impl FieldLabelTable {
    /// The backend's label table.
    pub const STANDARD: FieldLabelTable = FieldLabelTable {
        entries: &STANDARD_LABELS,
    };

    /// Build a table over a static entry list.
    #[must_use]
    pub const fn new(entries: &'static [(FieldKey, &'static str)]) -> Self {
        Self { entries }
    }

    /// Output label for `key`. Keys missing from the table fall back to the raw key.
    #[must_use]
    pub fn label(&self, key: FieldKey) -> &'static str {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map_or(key.as_str(), |(_, label)| *label)
    }

    /// Every label in table order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(_, label)| (*label).to_string())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldLabelTable {
    fn default() -> Self {
        Self::STANDARD
    }
}
