// ==========================================
// 学籍成绩管理系统 - 课程数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::course::{Course, NewCourse, DEFAULT_MAX_CAPACITY};
use crate::repository::error::RepositoryResult;
use crate::repository::gateway::{SqliteGateway, StorageGateway};
use rusqlite::{params, Row};
use std::sync::Arc;

const COURSE_COLUMNS: &str = "id, name, semester, credits, instructor, max_capacity";

// ==========================================
// CourseRepository - 课程仓储
// ==========================================
pub struct CourseRepository<G: StorageGateway = SqliteGateway> {
    gateway: Arc<G>,
}

impl<G: StorageGateway> CourseRepository<G> {
    /// 创建新的课程仓储
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// 插入课程
    pub fn insert(&self, course: &NewCourse) -> RepositoryResult<()> {
        self.gateway.execute(
            "INSERT INTO courses (id, name, semester, credits, instructor) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                course.id,
                course.name,
                course.semester,
                course.credits,
                course.instructor,
            ],
        )?;
        Ok(())
    }

    /// 删除课程（成绩级联删除）
    pub fn delete(&self, id: &str) -> RepositoryResult<usize> {
        self.gateway
            .execute("DELETE FROM courses WHERE id = ?1", params![id])
    }

    /// 删除全部课程
    pub fn delete_all(&self) -> RepositoryResult<usize> {
        self.gateway.execute("DELETE FROM courses", [])
    }

    /// 按课程号查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Course>> {
        self.gateway.query_one(
            &format!("SELECT {} FROM courses WHERE id = ?1", COURSE_COLUMNS),
            params![id],
            map_course,
        )
    }

    /// 课程号是否存在
    pub fn exists(&self, id: &str) -> RepositoryResult<bool> {
        let found: Option<i64> = self.gateway.query_one(
            "SELECT 1 FROM courses WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(found.is_some())
    }

    /// 课程总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let count: Option<i64> =
            self.gateway
                .query_one("SELECT COUNT(*) FROM courses", [], |row| row.get(0))?;
        Ok(count.unwrap_or(0))
    }

    /// 全部课程（按学期、课程名）
    pub fn find_all(&self) -> RepositoryResult<Vec<Course>> {
        self.gateway.query(
            &format!("SELECT {} FROM courses ORDER BY semester, name", COURSE_COLUMNS),
            [],
            map_course,
        )
    }

    /// 在该课程有成绩的学生学号
    pub fn find_graded_student_ids(&self, course_id: &str) -> RepositoryResult<Vec<String>> {
        self.gateway.query(
            "SELECT DISTINCT student_id FROM grades WHERE course_id = ?1 ORDER BY student_id",
            params![course_id],
            |row| row.get(0),
        )
    }
}

fn map_course(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        name: row.get(1)?,
        semester: row.get(2)?,
        credits: row.get(3)?,
        instructor: row.get(4)?,
        max_capacity: row
            .get::<_, Option<i32>>(5)?
            .unwrap_or(DEFAULT_MAX_CAPACITY),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> CourseRepository {
        CourseRepository::new(Arc::new(SqliteGateway::open_in_memory().unwrap()))
    }

    #[test]
    fn test_insert_defaults() {
        let repo = repo();
        repo.insert(&NewCourse::new("C101", "Algorithms", "Fall 2024")).unwrap();

        let c = repo.find_by_id("C101").unwrap().unwrap();
        assert_eq!(c.credits, 3);
        assert_eq!(c.max_capacity, 30);
        assert!(c.instructor.is_none());
    }

    #[test]
    fn test_find_all_ordered_by_semester_then_name() {
        let repo = repo();
        repo.insert(&NewCourse::new("C2", "Zoology", "2024A")).unwrap();
        repo.insert(&NewCourse::new("C3", "Art", "2024B")).unwrap();
        repo.insert(&NewCourse::new("C1", "Biology", "2024A")).unwrap();

        let ids: Vec<String> = repo.find_all().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["C1", "C2", "C3"]);
    }

    #[test]
    fn test_delete_missing_returns_zero() {
        let repo = repo();
        assert_eq!(repo.delete("NOPE").unwrap(), 0);
        assert_eq!(repo.count().unwrap(), 0);
    }
}
