//! Validation issue types.
//!
//! Each variant carries only the data its message needs. Messages are in
//! Finnish, the working language of the error report.

use std::fmt;

use serde::{Deserialize, Serialize};

use pow_transform::DateIssue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    /// Implausible or unparseable date
    Date(DateIssue),
    /// Re-rendered name does not match the source cell
    NameDiffers { interpreted: String },
    /// No marital status code for the value
    UnknownMaritalStatus { raw: String },
    /// Value is not a recognised mother tongue marker
    UnknownMotherTongue { raw: String },
}

impl Issue {
    pub fn message(&self) -> String {
        match self {
            Self::Date(issue) => issue.to_string(),
            Self::NameDiffers { interpreted } => {
                format!("Tulkittu nimi [{interpreted}] poikkeaa alkuperäisestä")
            }
            Self::UnknownMaritalStatus { raw } => format!("Tuntematon siviilisääty: {raw}"),
            Self::UnknownMotherTongue { raw } => format!("Tuntematon äidinkieli: {raw}"),
        }
    }
}

impl From<DateIssue> for Issue {
    fn from(issue: DateIssue) -> Self {
        Self::Date(issue)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
