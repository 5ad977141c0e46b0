use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Role, UserId};

/// Geographic scope granted to one user for one role.
///
/// Cities and talukas are stored with catalog spelling. For an HR-General the first
/// city is the city context its talukas belong to; for a Salesman the first city, when
/// present, is the resolved owner of its single taluka.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    user_id: UserId,
    role: Role,
    assigned_cities: Vec<String>,
    assigned_talukas: Vec<String>,
    updated_at: DateTime<Utc>,
}

impl Assignment {
    /// Creates an assignment record.
    #[must_use]
    pub fn new(
        user_id: UserId,
        role: Role,
        assigned_cities: Vec<String>,
        assigned_talukas: Vec<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            role,
            assigned_cities,
            assigned_talukas,
            updated_at,
        }
    }

    /// Returns the assigned user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the role the scope was granted for.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the granted cities.
    #[must_use]
    pub fn assigned_cities(&self) -> &[String] {
        self.assigned_cities.as_slice()
    }

    /// Returns the granted talukas.
    #[must_use]
    pub fn assigned_talukas(&self) -> &[String] {
        self.assigned_talukas.as_slice()
    }

    /// Returns the first recorded city, used as city context below the Sub-General tier.
    #[must_use]
    pub fn city_context(&self) -> Option<&str> {
        self.assigned_cities.first().map(String::as_str)
    }

    /// Returns the single granted taluka when exactly one is recorded.
    #[must_use]
    pub fn single_taluka(&self) -> Option<&str> {
        match self.assigned_talukas.as_slice() {
            [taluka] => Some(taluka.as_str()),
            _ => None,
        }
    }

    /// Returns the last write timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
