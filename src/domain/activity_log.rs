// ==========================================
// 学籍成绩管理系统 - 操作日志领域模型
// ==========================================
// 对齐: activity_log 表
// 红线: 只追加，不修改
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ActivityLogEntry - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: Option<i64>,                  // 自增ID (写入前为 None)
    pub user_id: i64,                     // 操作人
    pub action: String,                   // 操作类型标签
    pub details: Option<String>,          // 详细描述
    pub timestamp: Option<NaiveDateTime>, // 写入时间 (None 表示由数据库填充)
}

// ==========================================
// ActivityAction - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityAction {
    AddStudent,
    UpdateStudent,
    DeleteStudent,
    DeleteAllStudents,
    AddCourse,
    DeleteCourse,
    DeleteAllCourses,
    AddGrade,
    ImportStudents,
    ExportReport,
}

impl ActivityAction {
    /// 转换为字符串 (用于数据库存储)
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::AddStudent => "add_student",
            ActivityAction::UpdateStudent => "update_student",
            ActivityAction::DeleteStudent => "delete_student",
            ActivityAction::DeleteAllStudents => "delete_all_students",
            ActivityAction::AddCourse => "add_course",
            ActivityAction::DeleteCourse => "delete_course",
            ActivityAction::DeleteAllCourses => "delete_all_courses",
            ActivityAction::AddGrade => "add_grade",
            ActivityAction::ImportStudents => "import_students",
            ActivityAction::ExportReport => "export_report",
        }
    }

    /// 从字符串解析
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "add_student" => Some(ActivityAction::AddStudent),
            "update_student" => Some(ActivityAction::UpdateStudent),
            "delete_student" => Some(ActivityAction::DeleteStudent),
            "delete_all_students" => Some(ActivityAction::DeleteAllStudents),
            "add_course" => Some(ActivityAction::AddCourse),
            "delete_course" => Some(ActivityAction::DeleteCourse),
            "delete_all_courses" => Some(ActivityAction::DeleteAllCourses),
            "add_grade" => Some(ActivityAction::AddGrade),
            "import_students" => Some(ActivityAction::ImportStudents),
            "export_report" => Some(ActivityAction::ExportReport),
            _ => None,
        }
    }
}

impl ActivityLogEntry {
    /// 创建新的操作日志
    ///
    /// # 参数
    /// - `user_id`: 操作人
    /// - `action`: 操作类型
    /// - `details`: 描述文本
    pub fn new(user_id: i64, action: ActivityAction, details: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id,
            action: action.as_str().to_string(),
            details: Some(details.into()),
            timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_roundtrip_tags() {
        let all = [
            ActivityAction::AddStudent,
            ActivityAction::UpdateStudent,
            ActivityAction::DeleteStudent,
            ActivityAction::DeleteAllStudents,
            ActivityAction::AddCourse,
            ActivityAction::DeleteCourse,
            ActivityAction::DeleteAllCourses,
            ActivityAction::AddGrade,
            ActivityAction::ImportStudents,
            ActivityAction::ExportReport,
        ];
        for action in all {
            assert_eq!(ActivityAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(ActivityAction::parse("Recalc"), None);
    }

    #[test]
    fn test_new_entry() {
        let entry = ActivityLogEntry::new(1, ActivityAction::AddGrade, "Grade 91 for S001 in C101");
        assert_eq!(entry.action, "add_grade");
        assert!(entry.id.is_none());
    }
}
