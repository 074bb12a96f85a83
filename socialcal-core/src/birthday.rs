//! Birthday records.
//!
//! Field names serialize in camelCase so the JSON matches what the
//! hosted datastores and the local file already hold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A friend's birthday pinned to a calendar cell.
///
/// `day_index` is not checked against the month's length; a record for
/// February 31 is representable and simply never matches a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Birthday {
    pub id: String,
    pub name: String,
    /// Social handle without a leading `@` or profile URL prefix
    pub handle: String,
    /// 0 = January .. 11 = December
    pub month_index: u32,
    /// 1-based day of month
    pub day_index: u32,
}

/// A birthday that has not been assigned an id yet (the payload of a create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBirthday {
    pub name: String,
    pub handle: String,
    pub month_index: u32,
    pub day_index: u32,
}

impl Birthday {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Profile picture lookup used next to the name.
    pub fn avatar_url(&self) -> String {
        format!("https://unavatar.io/twitter/{}", self.handle)
    }
}

impl NewBirthday {
    pub fn into_birthday(self, id: String) -> Birthday {
        Birthday {
            id,
            name: self.name,
            handle: self.handle,
            month_index: self.month_index,
            day_index: self.day_index,
        }
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (@{})", self.name, self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_camel_case_indices() {
        let birthday = NewBirthday {
            name: "Ada".into(),
            handle: "ada".into(),
            month_index: 11,
            day_index: 10,
        }
        .into_birthday("b1".into());

        let json = serde_json::to_value(&birthday).unwrap();
        assert_eq!(json["monthIndex"], 11);
        assert_eq!(json["dayIndex"], 10);
        assert_eq!(json["id"], "b1");
    }

    #[test]
    fn test_avatar_url_uses_handle() {
        let birthday = Birthday {
            id: "1".into(),
            name: "Grace".into(),
            handle: "grace".into(),
            month_index: 0,
            day_index: 1,
        };
        assert_eq!(birthday.avatar_url(), "https://unavatar.io/twitter/grace");
        assert_eq!(birthday.to_string(), "Grace (@grace)");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(Birthday::generate_id(), Birthday::generate_id());
    }
}
