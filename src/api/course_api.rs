// ==========================================
// 学籍成绩管理系统 - 课程 API
// ==========================================
// 职责: 课程增删查
// 红线: 删除课程后重算受影响学生的 GPA；全部删除后 GPA 归零
// ==========================================

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{blank_to_none, validate_credits, validate_required};
use crate::domain::activity_log::{ActivityAction, ActivityLogEntry};
use crate::domain::course::{Course, NewCourse};
use crate::engine::GradeEngine;
use crate::repository::{
    ActivityLogRepository, CourseRepository, SqliteGateway, StorageGateway, StudentRepository,
};

// ==========================================
// CourseApi - 课程 API
// ==========================================
pub struct CourseApi<G: StorageGateway = SqliteGateway> {
    course_repo: Arc<CourseRepository<G>>,
    student_repo: Arc<StudentRepository<G>>,
    activity_log_repo: Arc<ActivityLogRepository<G>>,
    grade_engine: Arc<GradeEngine<G>>,
}

impl<G: StorageGateway> CourseApi<G> {
    /// 创建新的CourseApi实例
    pub fn new(
        course_repo: Arc<CourseRepository<G>>,
        student_repo: Arc<StudentRepository<G>>,
        activity_log_repo: Arc<ActivityLogRepository<G>>,
        grade_engine: Arc<GradeEngine<G>>,
    ) -> Self {
        Self {
            course_repo,
            student_repo,
            activity_log_repo,
            grade_engine,
        }
    }

    /// 新增课程
    ///
    /// # 返回
    /// - `Err(ValidationError)`: 课程号/课程名/学期为空，或学分不在 1..=6
    /// - `Err(Conflict)`: 课程号已存在
    pub fn add(&self, course: &NewCourse, actor_id: i64) -> ApiResult<()> {
        validate_required("课程号", &course.id)?;
        validate_required("课程名", &course.name)?;
        validate_required("学期", &course.semester)?;
        validate_credits(course.credits)?;

        let normalized = NewCourse {
            id: course.id.trim().to_string(),
            name: course.name.trim().to_string(),
            semester: course.semester.trim().to_string(),
            credits: course.credits,
            instructor: blank_to_none(course.instructor.as_deref()),
        };
        self.course_repo.insert(&normalized)?;

        self.log(
            actor_id,
            ActivityAction::AddCourse,
            format!("Added: {} ({})", normalized.name, normalized.id),
        )?;
        info!(course_id = %normalized.id, "课程已新增");
        Ok(())
    }

    /// 删除课程
    ///
    /// 成绩随课程级联删除，之后逐个重算原先在该课程有成绩的学生。
    /// 已无任何成绩的学生 GPA 保持原值。
    ///
    /// # 返回
    /// - `Ok(name)`: 被删除课程的名称
    pub fn delete(&self, id: &str, actor_id: i64) -> ApiResult<String> {
        let course = self.get(id)?;
        let affected = self.course_repo.find_graded_student_ids(id)?;

        self.course_repo.delete(id)?;
        for student_id in &affected {
            if self.grade_engine.recalculate_gpa(student_id)?.is_none() {
                warn!(student_id = %student_id, "学生已无成绩，GPA 保持原值");
            }
        }

        self.log(
            actor_id,
            ActivityAction::DeleteCourse,
            format!("Deleted: {} ({})", course.name, id),
        )?;
        info!(course_id = %id, affected_students = affected.len(), "课程已删除");
        Ok(course.name)
    }

    /// 删除全部课程，所有学生 GPA 归零
    ///
    /// # 返回
    /// - `Ok(count)`: 删除前的课程数
    pub fn delete_all(&self, actor_id: i64) -> ApiResult<usize> {
        let count = self.course_repo.count()?;
        self.course_repo.delete_all()?;
        self.student_repo.reset_all_gpa()?;

        self.log(
            actor_id,
            ActivityAction::DeleteAllCourses,
            format!("Deleted all {} courses", count),
        )?;
        info!(count, "全部课程已删除");
        Ok(count as usize)
    }

    /// 按课程号查询
    pub fn get(&self, id: &str) -> ApiResult<Course> {
        self.course_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("课程(id={})不存在", id)))
    }

    /// 全部课程（按学期、课程名）
    pub fn list_all(&self) -> ApiResult<Vec<Course>> {
        Ok(self.course_repo.find_all()?)
    }

    fn log(&self, actor_id: i64, action: ActivityAction, details: String) -> ApiResult<()> {
        self.activity_log_repo
            .append(&ActivityLogEntry::new(actor_id, action, details))?;
        Ok(())
    }
}
