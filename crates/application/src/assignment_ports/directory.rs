use async_trait::async_trait;
use geoscope_core::AppResult;
use geoscope_domain::{Role, UserId};

/// User projection returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    /// Stable user identifier.
    pub user_id: UserId,
    /// Display name.
    pub display_name: String,
    /// Contact email, when known.
    pub email: Option<String>,
    /// Role the directory lists the user under.
    pub role: Role,
}

/// Port resolving console users by role.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Lists users holding the role label.
    async fn get_users_by_role(&self, role: Role) -> AppResult<Vec<DirectoryUser>>;
}
