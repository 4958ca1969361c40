// ==========================================
// 学籍成绩管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod activity_log_repo;
pub mod course_repo;
pub mod error;
pub mod gateway;
pub mod grade_repo;
pub mod report_repo;
pub mod student_repo;
pub mod user_repo;

// 重导出核心仓储
pub use activity_log_repo::ActivityLogRepository;
pub use course_repo::CourseRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use gateway::{SqliteGateway, StorageGateway};
pub use grade_repo::GradeRepository;
pub use report_repo::ReportRepository;
pub use student_repo::StudentRepository;
pub use user_repo::UserRepository;
