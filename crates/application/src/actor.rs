use geoscope_domain::{Role, UserId};

/// Authenticated caller resolved upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    user_id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor from upstream identity data.
    #[must_use]
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns the caller's user id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the caller's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the subject string recorded in audit events.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("{}:{}", self.role.as_str(), self.user_id)
    }
}
