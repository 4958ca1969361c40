// ==========================================
// 学籍成绩管理系统 - 用户数据仓储
// ==========================================
// 对齐: users 表
// 用途: 审计操作人（activity_log.user_id）存在性校验
// ==========================================

use crate::repository::error::RepositoryResult;
use crate::repository::gateway::{SqliteGateway, StorageGateway};
use rusqlite::params;
use std::sync::Arc;

// ==========================================
// UserRepository - 用户仓储
// ==========================================
pub struct UserRepository<G: StorageGateway = SqliteGateway> {
    gateway: Arc<G>,
}

impl<G: StorageGateway> UserRepository<G> {
    /// 创建新的用户仓储
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// 用户 ID 是否存在
    pub fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let found: Option<i64> = self.gateway.query_one(
            "SELECT 1 FROM users WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_admin_exists() {
        let repo = UserRepository::new(Arc::new(SqliteGateway::open_in_memory().unwrap()));
        assert!(repo.exists(1).unwrap());
        assert!(!repo.exists(42).unwrap());
    }
}
