//! 用户资料服务

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{UpdateProfileRequest, UserProfile};
use crate::validation::ValidationErrors;

pub struct ProfileService {
    ctx: Arc<ServiceContext>,
}

impl ProfileService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 获取资料（不存在则返回默认值）
    pub async fn get_profile(&self) -> CoreResult<UserProfile> {
        Ok(self
            .ctx
            .profile_repository
            .load()
            .await?
            .unwrap_or_default())
    }

    /// 更新资料
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> CoreResult<UserProfile> {
        let mut errors = ValidationErrors::default();
        if request.username.as_deref().is_some_and(|u| u.trim().is_empty()) {
            errors.add("username", "用户名不能为空");
        }
        if request
            .email
            .as_deref()
            .is_some_and(|e| !e.contains('@') || e.trim() != e)
        {
            errors.add("email", "请输入有效的邮箱地址");
        }
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        let mut profile = self.get_profile().await?;
        request.apply_to(&mut profile);
        self.ctx.profile_repository.save(&profile).await?;
        Ok(profile)
    }
}
