use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when geographic scope is written for a subordinate.
    GeoAssignmentGranted,
    /// Emitted when a stored assignment is revoked.
    GeoAssignmentRevoked,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeoAssignmentGranted => "geo.assignment.granted",
            Self::GeoAssignmentRevoked => "geo.assignment.revoked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuditAction;

    #[test]
    fn storage_values_are_distinct() {
        assert_ne!(
            AuditAction::GeoAssignmentGranted.as_str(),
            AuditAction::GeoAssignmentRevoked.as_str()
        );
    }
}
