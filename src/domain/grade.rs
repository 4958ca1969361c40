// ==========================================
// 学籍成绩管理系统 - 成绩领域模型
// ==========================================
// 对齐: grades 表
// 红线: (student_id, course_id) 唯一，重复录入即覆盖
// 红线: letter_grade 只由分数派生
// 成绩行经由报表、成绩单读出
// ==========================================

/// 计算 GPA 所需的成绩 + 学分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditedGrade {
    pub grade: f64,
    pub credits: i32,
}
