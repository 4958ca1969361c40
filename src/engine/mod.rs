// ==========================================
// 学籍成绩管理系统 - 引擎层
// ==========================================
// 职责: 成绩录入与 GPA 维护、统计分析
// 红线: Engine 不拼 SQL，数据访问全部经由 Repository
// ==========================================

pub mod analytics;
pub mod error;
pub mod grade_engine;

// 重导出核心引擎
pub use analytics::AnalyticsEngine;
pub use error::{EngineError, EngineResult};
pub use grade_engine::{GradeEngine, RecordedGrade};
