//! 用户资料持久化抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::UserProfile;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn load(&self) -> CoreResult<Option<UserProfile>>;

    async fn save(&self, profile: &UserProfile) -> CoreResult<()>;
}
