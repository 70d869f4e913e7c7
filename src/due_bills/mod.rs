//! Due bills - freeform notes about customers with pending payments.

mod store;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::record::Content;
use crate::Record;

pub use store::DueBillStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "dueBills")]
#[serde(rename_all = "camelCase")]
pub struct DueBill {
    pub id: String,
    /// Who owes.
    pub name: String,
    pub note: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDueBill {
    name: String,
    note: String,
}

impl NewDueBill {
    /// Trims both fields. The name is checked before the note.
    pub fn new(name: impl AsRef<str>, note: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_empty(name.as_ref(), ValidationError::EmptyName)?,
            note: non_empty(note.as_ref(), ValidationError::EmptyNote)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DueBillPatch {
    pub name: Option<String>,
    pub note: Option<String>,
}

impl DueBillPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: self
                .name
                .as_deref()
                .map(|name| non_empty(name, ValidationError::EmptyName))
                .transpose()?,
            note: self
                .note
                .as_deref()
                .map(|note| non_empty(note, ValidationError::EmptyNote))
                .transpose()?,
        })
    }
}

impl Content for DueBill {
    type Draft = NewDueBill;
    type Patch = DueBillPatch;

    fn from_draft(id: String, now: i64, draft: NewDueBill) -> Self {
        DueBill {
            id,
            name: draft.name,
            note: draft.note,
            created_at: now,
            updated_at: now,
        }
    }

    fn validate_patch(patch: DueBillPatch) -> Result<DueBillPatch, ValidationError> {
        patch.validate()
    }

    fn merge(&mut self, patch: DueBillPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(note) = patch.note {
            self.note = note;
        }
    }
}

fn non_empty(value: &str, err: ValidationError) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(err)
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_checked_first() {
        assert_eq!(NewDueBill::new(" ", " "), Err(ValidationError::EmptyName));
        assert_eq!(NewDueBill::new("Karim", "\n"), Err(ValidationError::EmptyNote));

        let bill = NewDueBill::new(" Karim ", " 2kg rice, pays Friday ").unwrap();
        assert_eq!(bill.name(), "Karim");
        assert_eq!(bill.note(), "2kg rice, pays Friday");
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let patch = DueBillPatch::default().note(" paid half ").validate().unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.note.as_deref(), Some("paid half"));

        let mut bill = DueBill::from_draft("7".into(), 1, NewDueBill::new("Karim", "owes 200").unwrap());
        bill.merge(patch);
        assert_eq!(bill.name, "Karim");
        assert_eq!(bill.note, "paid half");
    }

    #[test]
    fn stored_under_legacy_key() {
        assert_eq!(<DueBill as crate::Record>::COLLECTION, "dueBills");
        let bill: DueBill = serde_json::from_str(
            r#"{"id":"1","name":"Karim","note":"owes 200","createdAt":1,"updatedAt":2}"#,
        )
        .unwrap();
        assert_eq!(bill.updated_at, 2);
    }
}
