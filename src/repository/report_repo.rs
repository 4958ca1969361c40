// ==========================================
// 学籍成绩管理系统 - 报表读模型仓储
// ==========================================
// 职责: 多表关联的只读报表查询
// 红线: 每次调用都重新查询，不缓存
// ==========================================

use crate::domain::report::{
    CourseStatisticsRow, FailingStudentRow, FullReportRow, GpaRankingRow,
};
use crate::repository::error::RepositoryResult;
use crate::repository::gateway::{SqliteGateway, StorageGateway};
use rusqlite::{params, Row};
use std::sync::Arc;

// ==========================================
// ReportRepository - 报表仓储
// ==========================================
pub struct ReportRepository<G: StorageGateway = SqliteGateway> {
    gateway: Arc<G>,
}

impl<G: StorageGateway> ReportRepository<G> {
    /// 创建新的报表仓储
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// 成绩低于阈值（严格小于）的记录，按学生姓名、课程名排序
    pub fn find_grades_below(&self, threshold: f64) -> RepositoryResult<Vec<FailingStudentRow>> {
        self.gateway.query(
            r#"
            SELECT s.name, s.id, s.email, c.name, g.grade, g.letter_grade
            FROM grades g
            JOIN students s ON s.id = g.student_id
            JOIN courses c ON c.id = g.course_id
            WHERE g.grade < ?1
            ORDER BY s.name, c.name
            "#,
            params![threshold],
            |row| {
                Ok(FailingStudentRow {
                    student_name: row.get(0)?,
                    student_id: row.get(1)?,
                    email: row.get(2)?,
                    course_name: row.get(3)?,
                    grade: row.get(4)?,
                    letter_grade: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                })
            },
        )
    }

    /// GPA 排名（GPA 倒序）
    ///
    /// # 参数
    /// - `include_zero_gpa`: false 时只返回 gpa > 0 的学生
    ///
    /// # 说明
    /// 同分学生按姓名排列，仅为展示稳定，不作为对外约定
    pub fn find_gpa_rankings(&self, include_zero_gpa: bool) -> RepositoryResult<Vec<GpaRankingRow>> {
        let filter = if include_zero_gpa {
            "COALESCE(gpa, 0.0) >= 0"
        } else {
            "gpa > 0"
        };
        self.gateway.query(
            &format!(
                r#"
                SELECT name, id, COALESCE(gpa, 0.0),
                       (SELECT COUNT(*) FROM grades WHERE student_id = students.id) AS courses
                FROM students
                WHERE {}
                ORDER BY gpa DESC, name ASC
                "#,
                filter
            ),
            [],
            |row| {
                Ok(GpaRankingRow {
                    name: row.get(0)?,
                    id: row.get(1)?,
                    gpa: row.get(2)?,
                    course_count: row.get(3)?,
                })
            },
        )
    }

    /// 课程统计（仅含有成绩的课程，平均分倒序）
    pub fn find_course_statistics(&self) -> RepositoryResult<Vec<CourseStatisticsRow>> {
        self.gateway.query(
            r#"
            SELECT c.name, c.semester, COUNT(DISTINCT g.student_id) AS enrolled,
                   ROUND(AVG(g.grade), 2) AS avg_grade,
                   MIN(g.grade) AS min_grade,
                   MAX(g.grade) AS max_grade
            FROM grades g
            JOIN courses c ON c.id = g.course_id
            GROUP BY c.id
            ORDER BY avg_grade DESC
            "#,
            [],
            |row| {
                Ok(CourseStatisticsRow {
                    course_name: row.get(0)?,
                    semester: row.get(1)?,
                    enrolled_count: row.get(2)?,
                    avg_grade: row.get(3)?,
                    min_grade: row.get(4)?,
                    max_grade: row.get(5)?,
                })
            },
        )
    }

    /// 完整报表（学生 × 成绩 × 课程），按学生姓名、学期排序
    pub fn find_full_report(&self) -> RepositoryResult<Vec<FullReportRow>> {
        self.gateway.query(
            r#"
            SELECT s.id, s.name, s.email, s.major, COALESCE(s.gpa, 0.0),
                   c.id, c.name, c.semester, g.grade, g.letter_grade
            FROM grades g
            JOIN students s ON s.id = g.student_id
            JOIN courses c ON c.id = g.course_id
            ORDER BY s.name, c.semester
            "#,
            [],
            map_full_report_row,
        )
    }
}

fn map_full_report_row(row: &Row<'_>) -> rusqlite::Result<FullReportRow> {
    Ok(FullReportRow {
        student_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        major: row.get(3)?,
        gpa: row.get(4)?,
        course_id: row.get(5)?,
        course_name: row.get(6)?,
        semester: row.get(7)?,
        grade: row.get(8)?,
        letter_grade: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
    })
}
