// ==========================================
// 学籍成绩管理系统 - 操作日志查询 API
// ==========================================
// 职责: 按操作人或操作类型查看审计记录（只读）
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::activity_log::{ActivityAction, ActivityLogEntry};
use crate::repository::{ActivityLogRepository, SqliteGateway, StorageGateway, UserRepository};

/// 默认返回条数
pub const DEFAULT_LOG_LIMIT: usize = 20;

pub struct ActivityLogApi<G: StorageGateway = SqliteGateway> {
    activity_log_repo: Arc<ActivityLogRepository<G>>,
    user_repo: Arc<UserRepository<G>>,
}

impl<G: StorageGateway> ActivityLogApi<G> {
    pub fn new(
        activity_log_repo: Arc<ActivityLogRepository<G>>,
        user_repo: Arc<UserRepository<G>>,
    ) -> Self {
        Self {
            activity_log_repo,
            user_repo,
        }
    }

    /// 最近的操作日志（时间倒序）
    ///
    /// # 参数
    /// - `user_id`: 只看该操作人
    /// - `action`: 只看该操作类型（如 `add_grade`）
    /// - `limit`: 最多返回条数
    ///
    /// # 返回
    /// - `Err(ValidationError)`: 同时给出两个过滤条件，或操作类型未知
    /// - `Err(NotFound)`: 操作人不存在
    pub fn recent(
        &self,
        user_id: Option<i64>,
        action: Option<&str>,
        limit: usize,
    ) -> ApiResult<Vec<ActivityLogEntry>> {
        match (user_id, action) {
            (Some(_), Some(_)) => Err(ApiError::ValidationError(
                "操作人与操作类型只能指定一个".to_string(),
            )),
            (Some(id), None) => {
                if !self.user_repo.exists(id)? {
                    return Err(ApiError::NotFound(format!("用户(id={})不存在", id)));
                }
                Ok(self.activity_log_repo.find_by_user(id, limit)?)
            }
            (None, Some(raw)) => {
                let action = ActivityAction::parse(raw.trim()).ok_or_else(|| {
                    ApiError::ValidationError(format!("未知操作类型: '{}'", raw))
                })?;
                Ok(self.activity_log_repo.find_by_action(action.as_str(), limit)?)
            }
            (None, None) => Ok(self.activity_log_repo.find_recent(limit)?),
        }
    }
}
