// ==========================================
// 学籍成绩管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::db::configure_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{json, Map, Value as JsonValue};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 统计分析
    pub const INCLUDE_ZERO_GPA: &str = "analytics.include_zero_gpa";

    // 导入
    pub const DEFAULT_ENROLLMENT_YEAR: &str = "import.default_enrollment_year";

    // 审计
    pub const DEFAULT_ACTOR_ID: &str = "audit.default_actor_id";

    /// 全部已知键
    pub const ALL: [&str; 3] = [INCLUDE_ZERO_GPA, DEFAULT_ENROLLMENT_YEAR, DEFAULT_ACTOR_ID];
}

// 默认值
const DEFAULT_INCLUDE_ZERO_GPA: bool = false;
const DEFAULT_ENROLLMENT_YEAR: i32 = 2024;
const DEFAULT_ACTOR_ID: i64 = 1;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取原始配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（存在则覆盖）
    pub fn set_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        info!(key, value, "配置已更新");
        Ok(())
    }

    /// 解析配置值；不存在或无法解析时使用默认值
    fn get_parsed_or<T: std::str::FromStr>(&self, key: &str, default: T) -> RepositoryResult<T> {
        Ok(self
            .get_value(key)?
            .and_then(|v| v.trim().parse::<T>().ok())
            .unwrap_or(default))
    }

    // ===== 统计分析配置 =====

    /// 学业状态/排名是否纳入 GPA 为 0 的学生（默认 false）
    pub fn get_include_zero_gpa(&self) -> RepositoryResult<bool> {
        self.get_parsed_or(config_keys::INCLUDE_ZERO_GPA, DEFAULT_INCLUDE_ZERO_GPA)
    }

    // ===== 导入配置 =====

    /// CSV 中入学年份为空时的缺省年份（默认 2024）
    pub fn get_default_enrollment_year(&self) -> RepositoryResult<i32> {
        self.get_parsed_or(config_keys::DEFAULT_ENROLLMENT_YEAR, DEFAULT_ENROLLMENT_YEAR)
    }

    // ===== 审计配置 =====

    /// 未指定操作人时的审计用户（默认 1，即 admin）
    pub fn get_default_actor_id(&self) -> RepositoryResult<i64> {
        self.get_parsed_or(config_keys::DEFAULT_ACTOR_ID, DEFAULT_ACTOR_ID)
    }

    /// 获取所有配置的快照（JSON格式，含未覆写键的默认值）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let mut map = Map::new();
        map.insert(
            config_keys::INCLUDE_ZERO_GPA.to_string(),
            json!(self.get_include_zero_gpa()?),
        );
        map.insert(
            config_keys::DEFAULT_ENROLLMENT_YEAR.to_string(),
            json!(self.get_default_enrollment_year()?),
        );
        map.insert(
            config_keys::DEFAULT_ACTOR_ID.to_string(),
            json!(self.get_default_actor_id()?),
        );

        // 未知键原样带出
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
        for row in rows {
            let (key, value) = row?;
            map.entry(key).or_insert(JsonValue::String(value));
        }

        serde_json::to_string(&JsonValue::Object(map))
            .map_err(|e| RepositoryError::Other(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_connection;

    fn manager() -> ConfigManager {
        let conn = open_in_memory_connection().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = manager();
        assert!(!config.get_include_zero_gpa().unwrap());
        assert_eq!(config.get_default_enrollment_year().unwrap(), 2024);
        assert_eq!(config.get_default_actor_id().unwrap(), 1);
    }

    #[test]
    fn test_set_and_override() {
        let config = manager();
        config.set_value(config_keys::INCLUDE_ZERO_GPA, "true").unwrap();
        config.set_value(config_keys::DEFAULT_ENROLLMENT_YEAR, "2021").unwrap();
        config.set_value(config_keys::DEFAULT_ENROLLMENT_YEAR, "2022").unwrap();

        assert!(config.get_include_zero_gpa().unwrap());
        assert_eq!(config.get_default_enrollment_year().unwrap(), 2022);
    }

    #[test]
    fn test_unparsable_value_falls_back() {
        let config = manager();
        config.set_value(config_keys::DEFAULT_ACTOR_ID, "abc").unwrap();
        assert_eq!(config.get_default_actor_id().unwrap(), 1);
    }

    #[test]
    fn test_snapshot() {
        let config = manager();
        config.set_value("ui.theme", "dark").unwrap();

        let snapshot: JsonValue = serde_json::from_str(&config.get_config_snapshot().unwrap()).unwrap();
        assert_eq!(snapshot[config_keys::INCLUDE_ZERO_GPA], json!(false));
        assert_eq!(snapshot[config_keys::DEFAULT_ENROLLMENT_YEAR], json!(2024));
        assert_eq!(snapshot["ui.theme"], json!("dark"));
    }
}
