use super::core::ActivityLogRepository;
use crate::domain::activity_log::ActivityLogEntry;
use crate::repository::error::RepositoryResult;
use crate::repository::gateway::StorageGateway;
use chrono::NaiveDateTime;
use rusqlite::{params, Row};

impl<G: StorageGateway> ActivityLogRepository<G> {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 最近的操作日志（按时间倒序）
    pub fn find_recent(&self, limit: usize) -> RepositoryResult<Vec<ActivityLogEntry>> {
        self.gateway.query(
            r#"
            SELECT id, user_id, action, details, timestamp
            FROM activity_log
            ORDER BY timestamp DESC, id DESC
            LIMIT ?1
            "#,
            params![limit as i64],
            map_row,
        )
    }

    /// 按操作人查询
    pub fn find_by_user(&self, user_id: i64, limit: usize) -> RepositoryResult<Vec<ActivityLogEntry>> {
        self.gateway.query(
            r#"
            SELECT id, user_id, action, details, timestamp
            FROM activity_log
            WHERE user_id = ?1
            ORDER BY timestamp DESC, id DESC
            LIMIT ?2
            "#,
            params![user_id, limit as i64],
            map_row,
        )
    }

    /// 按操作类型查询
    pub fn find_by_action(&self, action: &str, limit: usize) -> RepositoryResult<Vec<ActivityLogEntry>> {
        self.gateway.query(
            r#"
            SELECT id, user_id, action, details, timestamp
            FROM activity_log
            WHERE action = ?1
            ORDER BY timestamp DESC, id DESC
            LIMIT ?2
            "#,
            params![action, limit as i64],
            map_row,
        )
    }

    /// 日志总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let count: Option<i64> =
            self.gateway
                .query_one("SELECT COUNT(*) FROM activity_log", [], |row| row.get(0))?;
        Ok(count.unwrap_or(0))
    }
}

/// 映射数据库行到实体
fn map_row(row: &Row<'_>) -> rusqlite::Result<ActivityLogEntry> {
    let ts_str: Option<String> = row.get(4)?;
    let timestamp = ts_str
        .as_deref()
        .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok());

    Ok(ActivityLogEntry {
        id: row.get(0)?,
        user_id: row.get::<_, Option<i64>>(1)?.unwrap_or_default(),
        action: row.get(2)?,
        details: row.get(3)?,
        timestamp,
    })
}
