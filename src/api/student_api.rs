// ==========================================
// 学籍成绩管理系统 - 学生 API
// ==========================================
// 职责: 学生增删改查、检索、成绩单
// 红线: 写操作成功后追加审计日志；gpa 只由成绩引擎维护
// ==========================================

use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{blank_to_none, normalize_email, validate_required, validate_student_id};
use crate::domain::activity_log::{ActivityAction, ActivityLogEntry};
use crate::domain::student::{NewStudent, Student, StudentUpdate, TranscriptEntry};
use crate::repository::{ActivityLogRepository, SqliteGateway, StorageGateway, StudentRepository};

// ==========================================
// StudentApi - 学生 API
// ==========================================
pub struct StudentApi<G: StorageGateway = SqliteGateway> {
    student_repo: Arc<StudentRepository<G>>,
    activity_log_repo: Arc<ActivityLogRepository<G>>,
}

impl<G: StorageGateway> StudentApi<G> {
    /// 创建新的StudentApi实例
    pub fn new(
        student_repo: Arc<StudentRepository<G>>,
        activity_log_repo: Arc<ActivityLogRepository<G>>,
    ) -> Self {
        Self {
            student_repo,
            activity_log_repo,
        }
    }

    // ==========================================
    // 写操作
    // ==========================================

    /// 新增学生
    ///
    /// # 参数
    /// - `student`: 学号、姓名、邮箱（可空）、专业、入学年份
    /// - `actor_id`: 操作人
    ///
    /// # 返回
    /// - `Err(ValidationError)`: 学号/姓名/邮箱不合法
    /// - `Err(Conflict)`: 学号或邮箱已存在
    pub fn add(&self, student: &NewStudent, actor_id: i64) -> ApiResult<()> {
        validate_student_id(&student.id)?;
        validate_required("学生姓名", &student.name)?;

        let normalized = NewStudent {
            id: student.id.clone(),
            name: student.name.trim().to_string(),
            email: normalize_email(student.email.as_deref())?,
            major: blank_to_none(student.major.as_deref()),
            enrollment_year: student.enrollment_year,
        };
        self.student_repo.insert(&normalized)?;

        self.log(
            actor_id,
            ActivityAction::AddStudent,
            format!("Added: {} ({})", normalized.name, normalized.id),
        )?;
        info!(student_id = %normalized.id, "学生已新增");
        Ok(())
    }

    /// 修改学生基本信息
    ///
    /// # 返回
    /// - `Err(NotFound)`: 学号不存在
    pub fn update(&self, id: &str, update: &StudentUpdate, actor_id: i64) -> ApiResult<()> {
        validate_required("学生姓名", &update.name)?;

        let normalized = StudentUpdate {
            name: update.name.trim().to_string(),
            email: normalize_email(update.email.as_deref())?,
            major: blank_to_none(update.major.as_deref()),
            status: update.status,
        };
        let updated = self.student_repo.update(id, &normalized)?;
        if updated == 0 {
            return Err(ApiError::NotFound(format!("学生(id={})不存在", id)));
        }

        self.log(actor_id, ActivityAction::UpdateStudent, format!("Updated: {}", id))?;
        info!(student_id = %id, "学生已修改");
        Ok(())
    }

    /// 删除学生（成绩级联删除）
    ///
    /// # 返回
    /// - `Ok(name)`: 被删除学生的姓名
    pub fn delete(&self, id: &str, actor_id: i64) -> ApiResult<String> {
        let student = self.get(id)?;
        self.student_repo.delete(id)?;

        self.log(
            actor_id,
            ActivityAction::DeleteStudent,
            format!("Deleted: {} ({})", student.name, id),
        )?;
        info!(student_id = %id, "学生已删除");
        Ok(student.name)
    }

    /// 删除全部学生
    ///
    /// # 返回
    /// - `Ok(count)`: 删除前的学生数
    pub fn delete_all(&self, actor_id: i64) -> ApiResult<usize> {
        let count = self.student_repo.count()?;
        self.student_repo.delete_all()?;

        self.log(
            actor_id,
            ActivityAction::DeleteAllStudents,
            format!("Deleted all {} students", count),
        )?;
        info!(count, "全部学生已删除");
        Ok(count as usize)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 按学号查询
    pub fn get(&self, id: &str) -> ApiResult<Student> {
        self.student_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("学生(id={})不存在", id)))
    }

    /// 全部学生（按姓名）
    pub fn list_all(&self) -> ApiResult<Vec<Student>> {
        Ok(self.student_repo.find_all()?)
    }

    /// 按学号、姓名、专业模糊检索
    pub fn search(&self, query: &str) -> ApiResult<Vec<Student>> {
        Ok(self.student_repo.search(query.trim())?)
    }

    /// 成绩单（学期倒序，同学期按课程名）
    pub fn transcript(&self, id: &str) -> ApiResult<Vec<TranscriptEntry>> {
        if !self.student_repo.exists(id)? {
            return Err(ApiError::NotFound(format!("学生(id={})不存在", id)));
        }
        Ok(self.student_repo.find_transcript(id)?)
    }

    fn log(&self, actor_id: i64, action: ActivityAction, details: String) -> ApiResult<()> {
        self.activity_log_repo
            .append(&ActivityLogEntry::new(actor_id, action, details))?;
        Ok(())
    }
}
