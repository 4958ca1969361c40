// ==========================================
// 学籍成绩管理系统 - 课程领域模型
// ==========================================
// 对齐: courses 表
// max_capacity 仅作展示，不参与任何校验
// ==========================================

use serde::{Deserialize, Serialize};

/// 默认学分
pub const DEFAULT_CREDITS: i32 = 3;
/// 学分上下限（闭区间）
pub const MIN_CREDITS: i32 = 1;
pub const MAX_CREDITS: i32 = 6;
/// 默认容量
pub const DEFAULT_MAX_CAPACITY: i32 = 30;

// ==========================================
// Course - 课程
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,                 // 课程号
    pub name: String,               // 课程名
    pub semester: String,           // 学期 (自由文本)
    pub credits: i32,               // 学分 (1-6)
    pub instructor: Option<String>, // 任课教师
    pub max_capacity: i32,          // 容量
}

/// 新增课程的输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub id: String,
    pub name: String,
    pub semester: String,
    pub credits: i32,
    pub instructor: Option<String>,
}

impl NewCourse {
    /// 以默认学分创建
    pub fn new(id: &str, name: &str, semester: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            semester: semester.to_string(),
            credits: DEFAULT_CREDITS,
            instructor: None,
        }
    }

    pub fn with_credits(mut self, credits: i32) -> Self {
        self.credits = credits;
        self
    }

    pub fn with_instructor(mut self, instructor: &str) -> Self {
        self.instructor = Some(instructor.to_string());
        self
    }
}
