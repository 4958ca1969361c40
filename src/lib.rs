// ==========================================
// 学籍成绩管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 单用户学籍、课程、成绩管理与统计分析
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 成绩与统计
pub mod engine;

// 导入导出层 - CSV
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{LetterGrade, Standing, StudentStatus, UserRole};

// 领域实体
pub use domain::{
    AcademicStatusRow, ActivityAction, ActivityLogEntry, Course, CourseStatisticsRow,
    FailingStudentRow, FullReportRow, GpaRankingRow, NewCourse, NewStudent, Student,
    StudentUpdate, TranscriptEntry,
};

// 引擎
pub use engine::{AnalyticsEngine, EngineError, GradeEngine, RecordedGrade};

// API
pub use api::{ApiError, ApiResult, CourseApi, StudentApi};

// 存储
pub use repository::{SqliteGateway, StorageGateway};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "学籍成绩管理系统";
