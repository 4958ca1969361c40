use crate::domain::activity_log::ActivityLogEntry;
use crate::repository::error::RepositoryResult;
use crate::repository::gateway::{SqliteGateway, StorageGateway};
use rusqlite::params;
use std::sync::Arc;

// ==========================================
// ActivityLogRepository - 操作日志仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
pub struct ActivityLogRepository<G: StorageGateway = SqliteGateway> {
    pub(super) gateway: Arc<G>,
}

impl<G: StorageGateway> ActivityLogRepository<G> {
    /// 创建新的操作日志仓储
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 追加操作日志
    ///
    /// # 参数
    /// - `entry`: 操作日志实体（timestamp 为 None 时由数据库填充当前时间）
    ///
    /// # 返回
    /// - `Ok(rows)`: 写入行数
    /// - `Err(...)`: 数据库错误（例如 user_id 不存在时的外键错误）
    pub fn append(&self, entry: &ActivityLogEntry) -> RepositoryResult<usize> {
        match entry.timestamp {
            Some(ts) => self.gateway.execute(
                "INSERT INTO activity_log (user_id, action, details, timestamp) VALUES (?1, ?2, ?3, ?4)",
                params![
                    entry.user_id,
                    entry.action,
                    entry.details,
                    ts.format("%Y-%m-%d %H:%M:%S").to_string(),
                ],
            ),
            None => self.gateway.execute(
                "INSERT INTO activity_log (user_id, action, details) VALUES (?1, ?2, ?3)",
                params![entry.user_id, entry.action, entry.details],
            ),
        }
    }
}
