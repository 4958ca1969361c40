// ==========================================
// 学籍成绩管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、报表行
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod activity_log;
pub mod course;
pub mod grade;
pub mod report;
pub mod student;
pub mod types;

// 重导出核心类型
pub use activity_log::{ActivityAction, ActivityLogEntry};
pub use course::{Course, NewCourse};
pub use grade::CreditedGrade;
pub use report::{
    AcademicStatusRow, CourseStatisticsRow, FailingStudentRow, FullReportRow, GpaRankingRow,
};
pub use student::{NewStudent, Student, StudentUpdate, TranscriptEntry};
pub use types::{LetterGrade, Standing, StudentStatus, UserRole};
