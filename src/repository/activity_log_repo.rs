// ==========================================
// 学籍成绩管理系统 - 操作日志数据仓储
// ==========================================
// 对齐: activity_log 表
// 红线: 只追加，不修改
// ==========================================

mod core;
mod queries;


pub use core::ActivityLogRepository;
