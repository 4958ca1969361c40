// ==========================================
// 学籍成绩管理系统 - 存储网关
// ==========================================
// 职责: 执行参数化语句，返回行或执行变更
// 红线: 不含业务逻辑
// 红线: 每次调用独立提交（autocommit），调用之间不共享事务
// ==========================================

use crate::db::{init_schema, open_in_memory_connection, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, Params, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// StorageGateway - 存储网关接口
// ==========================================
// 仓储层只依赖此接口，测试可替换为带故障注入的实现
pub trait StorageGateway: Send + Sync {
    /// 执行查询并映射所有行
    ///
    /// # 参数
    /// - `sql`: 参数化语句
    /// - `params`: 参数
    /// - `map_row`: 行映射函数
    fn query<T, P, F>(&self, sql: &str, params: P, map_row: F) -> RepositoryResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>;

    /// 执行变更语句
    ///
    /// # 返回
    /// - `Ok(rows)`: 受影响行数
    fn execute<P: Params>(&self, sql: &str, params: P) -> RepositoryResult<usize>;

    /// 查询单行（无结果返回 None）
    fn query_one<T, P, F>(&self, sql: &str, params: P, map_row: F) -> RepositoryResult<Option<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        Ok(self.query(sql, params, map_row)?.into_iter().next())
    }
}

// ==========================================
// SqliteGateway - SQLite 实现
// ==========================================
#[derive(Clone)]
pub struct SqliteGateway {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteGateway {
    /// 从已有连接创建网关
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 打开数据库文件，应用 PRAGMA 并建表
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    /// 打开内存数据库（已建表）
    pub fn open_in_memory() -> RepositoryResult<Self> {
        let conn = open_in_memory_connection()
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    /// 共享底层连接（配置管理器等复用同一连接）
    pub fn shared_connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl StorageGateway for SqliteGateway {
    fn query<T, P, F>(&self, sql: &str, params: P, map_row: F) -> RepositoryResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn execute<P: Params>(&self, sql: &str, params: P) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(sql, params)?;
        Ok(affected)
    }
}
