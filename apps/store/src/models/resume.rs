use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::contact::ContactType;

/// A résumé with a stable identity.
///
/// Equality and hashing use `id` only. Ordering is by `full_name`, then `id`,
/// which agrees with equality on any collection whose ids are unique (every
/// storage backend guarantees that).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    id: String,
    full_name: String,
    #[serde(default)]
    contacts: BTreeMap<ContactType, String>,
}

impl Resume {
    /// Creates a résumé with a freshly generated id.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), full_name)
    }

    pub fn with_id(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Resume {
            id: id.into(),
            full_name: full_name.into(),
            contacts: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.full_name = full_name.into();
    }

    pub fn contact(&self, contact_type: ContactType) -> Option<&str> {
        self.contacts.get(&contact_type).map(String::as_str)
    }

    pub fn set_contact(&mut self, contact_type: ContactType, value: impl Into<String>) {
        self.contacts.insert(contact_type, value.into());
    }

    pub fn remove_contact(&mut self, contact_type: ContactType) -> Option<String> {
        self.contacts.remove(&contact_type)
    }

    pub fn contacts(&self) -> &BTreeMap<ContactType, String> {
        &self.contacts
    }

    /// Builder-style contact setter, handy for fixtures and seeding.
    pub fn with_contact(mut self, contact_type: ContactType, value: impl Into<String>) -> Self {
        self.set_contact(contact_type, value);
        self
    }

    /// Field-by-field comparison, unlike `==` which only looks at the id.
    pub fn same_content(&self, other: &Resume) -> bool {
        self.id == other.id && self.full_name == other.full_name && self.contacts == other.contacts
    }
}

impl PartialEq for Resume {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Resume {}

impl Hash for Resume {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Ord for Resume {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_name
            .cmp(&other.full_name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Resume {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Row shape of the `resume` table. Contacts live in a JSONB column.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: String,
    pub full_name: String,
    pub contacts: Json<BTreeMap<ContactType, String>>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            id: row.id,
            full_name: row.full_name,
            contacts: row.contacts.0,
        }
    }
}
