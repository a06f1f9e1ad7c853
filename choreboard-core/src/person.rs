//! Family member types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ChoreBoardError, ChoreBoardResult};

/// A family member chores and calendar events can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    /// Display color as an `#rrggbb` hex string.
    pub color: String,
}

impl Person {
    /// Create a person with a fresh id, validating name and color.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> ChoreBoardResult<Self> {
        let name = name.into();
        let color = color.into();

        if name.trim().is_empty() {
            return Err(ChoreBoardError::Validation(
                "Person name must not be empty".into(),
            ));
        }
        if !is_rgb_hex(&color) {
            return Err(ChoreBoardError::Validation(format!(
                "Invalid color '{}'. Expected #rrggbb",
                color
            )));
        }

        Ok(Person {
            id: Uuid::new_v4().to_string(),
            name,
            color,
        })
    }
}

fn is_rgb_hex(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_person() {
        let person = Person::new("Eva", "#cc99ff").unwrap();
        assert_eq!(person.name, "Eva");
        assert!(!person.id.is_empty());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(Person::new("", "#cc99ff").is_err());
        assert!(Person::new("   ", "#cc99ff").is_err());
    }

    #[test]
    fn rejects_bad_colors() {
        assert!(Person::new("Eva", "cc99ff").is_err());
        assert!(Person::new("Eva", "#cc99f").is_err());
        assert!(Person::new("Eva", "#cc99fg").is_err());
        assert!(Person::new("Eva", "#cc99ff00").is_err());
    }
}
