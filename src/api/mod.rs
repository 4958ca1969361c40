// ==========================================
// 学籍成绩管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供命令行外壳调用
// ==========================================

pub mod activity_log_api;
pub mod course_api;
pub mod error;
pub mod student_api;
pub mod validator;

// 重导出核心类型
pub use activity_log_api::ActivityLogApi;
pub use course_api::CourseApi;
pub use error::{ApiError, ApiResult};
pub use student_api::StudentApi;
