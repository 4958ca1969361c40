// ==========================================
// 学籍成绩管理系统 - 报表行模型
// ==========================================
// 每种查询结果形状一个结构体，避免位置元组
// ==========================================

use serde::{Deserialize, Serialize};

/// 不及格名单行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailingStudentRow {
    pub student_name: String,
    pub student_id: String,
    pub email: Option<String>,
    pub course_name: String,
    pub grade: f64,
    pub letter_grade: String,
}

/// GPA 排名行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaRankingRow {
    pub name: String,
    pub id: String,
    pub gpa: f64,
    pub course_count: i64,
}

/// 学业状态行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicStatusRow {
    pub name: String,
    pub id: String,
    pub gpa: f64,
    pub course_count: i64,
    pub standing: String,
}

/// 课程统计行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseStatisticsRow {
    pub course_name: String,
    pub semester: String,
    pub enrolled_count: i64,
    pub avg_grade: f64,
    pub min_grade: f64,
    pub max_grade: f64,
}

/// 完整报表导出行（学生 × 成绩 × 课程）
///
/// serde 重命名与导出 CSV 表头一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullReportRow {
    #[serde(rename = "Student_ID")]
    pub student_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Major")]
    pub major: Option<String>,
    #[serde(rename = "GPA")]
    pub gpa: f64,
    #[serde(rename = "Course_ID")]
    pub course_id: String,
    #[serde(rename = "Course")]
    pub course_name: String,
    #[serde(rename = "Semester")]
    pub semester: String,
    #[serde(rename = "Grade")]
    pub grade: f64,
    #[serde(rename = "Letter")]
    pub letter_grade: String,
}
