use std::fmt::{Display, Formatter};
use std::str::FromStr;

use geoscope_core::AppError;
use serde::{Deserialize, Serialize};

/// Fixed four-tier role hierarchy of the operations console.
///
/// Ordering follows rank, so `Role::General > Role::Salesman`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Field-level tier scoped to exactly one taluka.
    Salesman,
    /// Taluka-level tier scoped inside one city context.
    HrGeneral,
    /// City-level tier scoped to a set of cities.
    SubGeneral,
    /// Unrestricted top tier.
    General,
}

impl Role {
    /// Returns the numeric rank used for delegation comparisons.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::General => 4,
            Self::SubGeneral => 3,
            Self::HrGeneral => 2,
            Self::Salesman => 1,
        }
    }

    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::SubGeneral => "sub_general",
            Self::HrGeneral => "hr_general",
            Self::Salesman => "salesman",
        }
    }

    /// Returns the human-facing label used by the user directory.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::SubGeneral => "Sub-General",
            Self::HrGeneral => "HR-General",
            Self::Salesman => "Salesman",
        }
    }

    /// Returns whether this tier needs a stored assignment to see anything.
    #[must_use]
    pub fn requires_assignment(self) -> bool {
        !matches!(self, Self::General)
    }

    /// Returns all roles from highest to lowest rank.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::General,
            Role::SubGeneral,
            Role::HrGeneral,
            Role::Salesman,
        ];

        ALL
    }

    /// Parses a transport value into a role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = AppError;

    /// Accepts storage values and directory labels regardless of case or separator,
    /// so `"HR-General"`, `"hr_general"` and `"HR General"` all parse.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let compact: String = value
            .trim()
            .chars()
            .filter(|character| !matches!(character, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match compact.as_str() {
            "general" => Ok(Self::General),
            "subgeneral" => Ok(Self::SubGeneral),
            "hrgeneral" => Ok(Self::HrGeneral),
            "salesman" => Ok(Self::Salesman),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}
