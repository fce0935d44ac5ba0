//! 用户资料类型定义

use serde::{Deserialize, Serialize};

/// Local user profile (持久化键 `user`)
///
/// Only stored and displayed; nothing in the core verifies the password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: None,
        }
    }
}

/// Profile edit; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    /// 应用更新到现有资料
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(ref username) = self.username {
            profile.username.clone_from(username);
        }
        if let Some(ref email) = self.email {
            profile.email.clone_from(email);
        }
        if let Some(ref password) = self.password {
            profile.password = Some(password.clone());
        }
    }
}
