// ==========================================
// 学籍成绩管理系统 - 成绩数据仓储
// ==========================================
// 红线: (student_id, course_id) 唯一，写入即 upsert
// ==========================================

use crate::domain::grade::CreditedGrade;
use crate::repository::error::RepositoryResult;
use crate::repository::gateway::{SqliteGateway, StorageGateway};
use rusqlite::params;
use std::sync::Arc;

// ==========================================
// GradeRepository - 成绩仓储
// ==========================================
pub struct GradeRepository<G: StorageGateway = SqliteGateway> {
    gateway: Arc<G>,
}

impl<G: StorageGateway> GradeRepository<G> {
    /// 创建新的成绩仓储
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// 写入成绩（已存在则整行替换，graded_at 重置为当前时间）
    pub fn upsert(
        &self,
        student_id: &str,
        course_id: &str,
        grade: f64,
        letter_grade: &str,
    ) -> RepositoryResult<usize> {
        self.gateway.execute(
            "INSERT OR REPLACE INTO grades (student_id, course_id, grade, letter_grade) VALUES (?1, ?2, ?3, ?4)",
            params![student_id, course_id, grade, letter_grade],
        )
    }

    /// 学生的成绩及对应课程学分（GPA 计算输入）
    pub fn find_credited_grades(&self, student_id: &str) -> RepositoryResult<Vec<CreditedGrade>> {
        self.gateway.query(
            r#"
            SELECT g.grade, c.credits
            FROM grades g
            JOIN courses c ON c.id = g.course_id
            WHERE g.student_id = ?1
            "#,
            params![student_id],
            |row| {
                Ok(CreditedGrade {
                    grade: row.get(0)?,
                    credits: row.get(1)?,
                })
            },
        )
    }
}
