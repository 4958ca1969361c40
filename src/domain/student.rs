// ==========================================
// 学籍成绩管理系统 - 学生领域模型
// ==========================================
// 对齐: students 表
// 红线: gpa 只由成绩引擎写回，其余写入路径不触碰 gpa
// ==========================================

use crate::domain::types::StudentStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// Student - 学生
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    // ===== 主键 =====
    pub id: String, // 学号 (外部分配, ≥3 位字母数字)

    // ===== 基本信息 =====
    pub name: String,                 // 姓名
    pub email: Option<String>,        // 邮箱 (唯一, 可空)
    pub major: Option<String>,        // 专业
    pub enrollment_year: Option<i32>, // 入学年份

    // ===== 派生字段 =====
    pub gpa: f64, // 缓存 GPA (0.0 - 4.0)

    // ===== 状态 =====
    pub status: StudentStatus,
}

/// 新增学生的输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub major: Option<String>,
    pub enrollment_year: Option<i32>,
}

/// 修改学生的输入（不含 gpa）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentUpdate {
    pub name: String,
    pub email: Option<String>,
    pub major: Option<String>,
    pub status: StudentStatus,
}

/// 成绩单条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub course_name: String,
    pub semester: String,
    pub credits: i32,
    pub grade: f64,
    pub letter_grade: String,
    pub graded_at: String,
}
