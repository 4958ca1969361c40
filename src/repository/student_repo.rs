// ==========================================
// 学籍成绩管理系统 - 学生数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化
// ==========================================

use crate::domain::student::{NewStudent, Student, StudentUpdate, TranscriptEntry};
use crate::domain::types::StudentStatus;
use crate::repository::error::RepositoryResult;
use crate::repository::gateway::{SqliteGateway, StorageGateway};
use rusqlite::{params, Row};
use std::sync::Arc;

const STUDENT_COLUMNS: &str = "id, name, email, major, enrollment_year, gpa, status";

// ==========================================
// StudentRepository - 学生仓储
// ==========================================
pub struct StudentRepository<G: StorageGateway = SqliteGateway> {
    gateway: Arc<G>,
}

impl<G: StorageGateway> StudentRepository<G> {
    /// 创建新的学生仓储
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入学生（主键或邮箱冲突时返回唯一约束错误）
    pub fn insert(&self, student: &NewStudent) -> RepositoryResult<()> {
        self.gateway.execute(
            "INSERT INTO students (id, name, email, major, enrollment_year) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                student.id,
                student.name,
                student.email,
                student.major,
                student.enrollment_year,
            ],
        )?;
        Ok(())
    }

    /// 插入学生，主键已存在时忽略
    ///
    /// # 返回
    /// - `Ok(1)`: 新插入
    /// - `Ok(0)`: 已存在，被忽略
    pub fn insert_or_ignore(&self, student: &NewStudent) -> RepositoryResult<usize> {
        self.gateway.execute(
            "INSERT OR IGNORE INTO students (id, name, email, major, enrollment_year) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                student.id,
                student.name,
                student.email,
                student.major,
                student.enrollment_year,
            ],
        )
    }

    /// 更新学生基本信息（不触碰 gpa）
    pub fn update(&self, id: &str, update: &StudentUpdate) -> RepositoryResult<usize> {
        self.gateway.execute(
            "UPDATE students SET name = ?1, email = ?2, major = ?3, status = ?4 WHERE id = ?5",
            params![
                update.name,
                update.email,
                update.major,
                update.status.as_str(),
                id,
            ],
        )
    }

    /// 写回缓存 GPA
    pub fn update_gpa(&self, id: &str, gpa: f64) -> RepositoryResult<usize> {
        self.gateway
            .execute("UPDATE students SET gpa = ?1 WHERE id = ?2", params![gpa, id])
    }

    /// 全部学生 GPA 归零
    pub fn reset_all_gpa(&self) -> RepositoryResult<usize> {
        self.gateway.execute("UPDATE students SET gpa = 0.0", [])
    }

    /// 删除学生（成绩级联删除）
    pub fn delete(&self, id: &str) -> RepositoryResult<usize> {
        self.gateway
            .execute("DELETE FROM students WHERE id = ?1", params![id])
    }

    /// 删除全部学生
    pub fn delete_all(&self) -> RepositoryResult<usize> {
        self.gateway.execute("DELETE FROM students", [])
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按学号查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Student>> {
        self.gateway.query_one(
            &format!("SELECT {} FROM students WHERE id = ?1", STUDENT_COLUMNS),
            params![id],
            map_student,
        )
    }

    /// 学号是否存在
    pub fn exists(&self, id: &str) -> RepositoryResult<bool> {
        let found: Option<i64> = self.gateway.query_one(
            "SELECT 1 FROM students WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(found.is_some())
    }

    /// 学生总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let count: Option<i64> =
            self.gateway
                .query_one("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count.unwrap_or(0))
    }

    /// 全部学生（按姓名）
    pub fn find_all(&self) -> RepositoryResult<Vec<Student>> {
        self.gateway.query(
            &format!("SELECT {} FROM students ORDER BY name", STUDENT_COLUMNS),
            [],
            map_student,
        )
    }

    /// 模糊搜索（学号 / 姓名 / 专业）
    pub fn search(&self, query: &str) -> RepositoryResult<Vec<Student>> {
        let pattern = format!("%{}%", query);
        self.gateway.query(
            &format!(
                "SELECT {} FROM students WHERE id LIKE ?1 OR name LIKE ?1 OR major LIKE ?1 ORDER BY name",
                STUDENT_COLUMNS
            ),
            params![pattern],
            map_student,
        )
    }

    /// 成绩单（按学期倒序、课程名）
    pub fn find_transcript(&self, id: &str) -> RepositoryResult<Vec<TranscriptEntry>> {
        self.gateway.query(
            r#"
            SELECT c.name, c.semester, c.credits, g.grade, g.letter_grade, g.graded_at
            FROM grades g
            JOIN courses c ON c.id = g.course_id
            WHERE g.student_id = ?1
            ORDER BY c.semester DESC, c.name
            "#,
            params![id],
            |row| {
                Ok(TranscriptEntry {
                    course_name: row.get(0)?,
                    semester: row.get(1)?,
                    credits: row.get(2)?,
                    grade: row.get(3)?,
                    letter_grade: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    graded_at: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                })
            },
        )
    }
}

fn map_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        major: row.get(3)?,
        enrollment_year: row.get(4)?,
        gpa: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
        status: row
            .get::<_, Option<String>>(6)?
            .and_then(|s| StudentStatus::parse(&s))
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> StudentRepository {
        StudentRepository::new(Arc::new(SqliteGateway::open_in_memory().unwrap()))
    }

    fn new_student(id: &str, name: &str, email: Option<&str>) -> NewStudent {
        NewStudent {
            id: id.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
            major: Some("CS".to_string()),
            enrollment_year: Some(2023),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let repo = repo();
        repo.insert(&new_student("S001", "Alice", Some("alice@uni.edu"))).unwrap();

        let s = repo.find_by_id("S001").unwrap().unwrap();
        assert_eq!(s.name, "Alice");
        assert_eq!(s.gpa, 0.0);
        assert_eq!(s.status, StudentStatus::Active);
        assert!(repo.exists("S001").unwrap());
        assert!(!repo.exists("S999").unwrap());
    }

    #[test]
    fn test_insert_or_ignore_duplicate() {
        let repo = repo();
        assert_eq!(repo.insert_or_ignore(&new_student("S001", "Alice", None)).unwrap(), 1);
        assert_eq!(repo.insert_or_ignore(&new_student("S001", "Other", None)).unwrap(), 0);
        assert_eq!(repo.find_by_id("S001").unwrap().unwrap().name, "Alice");
    }

    #[test]
    fn test_search_and_order() {
        let repo = repo();
        repo.insert(&new_student("S002", "Bob", None)).unwrap();
        repo.insert(&new_student("S001", "Alice", None)).unwrap();

        let all = repo.find_all().unwrap();
        assert_eq!(all[0].name, "Alice");
        assert_eq!(repo.search("bo").unwrap().len(), 1);
        assert_eq!(repo.search("CS").unwrap().len(), 2);
        assert_eq!(repo.count().unwrap(), 2);
    }
}
