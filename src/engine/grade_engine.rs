// ==========================================
// 学籍成绩管理系统 - 成绩引擎
// ==========================================
// 职责: 录入/覆盖成绩，维护学生 GPA 缓存，生成不及格名单
// 输入: 学号 + 课程号 + 百分制成绩
// 输出: grades 行 + students.gpa + activity_log 审计
// 红线: 成绩写入、GPA 回写、审计追加是三次独立提交，不在同一事务内
// ==========================================

use crate::domain::activity_log::{ActivityAction, ActivityLogEntry};
use crate::domain::report::FailingStudentRow;
use crate::domain::types::{gpa_points_for, letter_for, round2, LetterGrade, PASSING_GRADE};
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::{
    ActivityLogRepository, CourseRepository, GradeRepository, ReportRepository, SqliteGateway,
    StorageGateway, StudentRepository, UserRepository,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// RecordedGrade - 录入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedGrade {
    pub student_id: String,
    pub course_id: String,
    pub grade: f64,
    pub letter_grade: LetterGrade,
    pub gpa: Option<f64>, // 重算后的 GPA
}

// ==========================================
// GradeEngine - 成绩引擎
// ==========================================
pub struct GradeEngine<G: StorageGateway = SqliteGateway> {
    student_repo: StudentRepository<G>,
    course_repo: CourseRepository<G>,
    grade_repo: GradeRepository<G>,
    report_repo: ReportRepository<G>,
    user_repo: UserRepository<G>,
    activity_log_repo: ActivityLogRepository<G>,
}

impl<G: StorageGateway> GradeEngine<G> {
    /// 构造函数
    ///
    /// # 参数
    /// - `gateway`: 共享存储网关
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            student_repo: StudentRepository::new(gateway.clone()),
            course_repo: CourseRepository::new(gateway.clone()),
            grade_repo: GradeRepository::new(gateway.clone()),
            report_repo: ReportRepository::new(gateway.clone()),
            user_repo: UserRepository::new(gateway.clone()),
            activity_log_repo: ActivityLogRepository::new(gateway),
        }
    }

    // ==========================================
    // 成绩录入
    // ==========================================

    /// 录入成绩（同一学生同一课程再次录入则覆盖）
    ///
    /// # 参数
    /// - `student_id`: 学号
    /// - `course_id`: 课程号
    /// - `grade`: 百分制成绩，必须为 [0, 100] 内的有限数
    /// - `actor_id`: 操作人（写入审计日志）
    ///
    /// # 返回
    /// - `Ok(RecordedGrade)`: 等级与重算后的 GPA
    /// - `Err(Validation)`: 成绩非法
    /// - `Err(NotFound)`: 操作人、学生或课程不存在（此时不写入任何数据）
    /// - `Err(Repository)`: 任一步存储失败；此前已提交的步骤不会回滚
    #[instrument(skip(self))]
    pub fn record_grade(
        &self,
        student_id: &str,
        course_id: &str,
        grade: f64,
        actor_id: i64,
    ) -> EngineResult<RecordedGrade> {
        if !grade.is_finite() || !(0.0..=100.0).contains(&grade) {
            return Err(EngineError::Validation(format!(
                "成绩必须在 0 到 100 之间: {}",
                grade
            )));
        }
        // 审计外键在最后一步才生效，操作人须先于写入校验
        if !self.user_repo.exists(actor_id)? {
            return Err(EngineError::not_found("用户", &actor_id.to_string()));
        }
        if !self.student_repo.exists(student_id)? {
            return Err(EngineError::not_found("学生", student_id));
        }
        if !self.course_repo.exists(course_id)? {
            return Err(EngineError::not_found("课程", course_id));
        }

        let letter = letter_for(grade);
        self.grade_repo
            .upsert(student_id, course_id, grade, letter.as_str())?;

        let gpa = self.recalculate_gpa(student_id)?;

        self.activity_log_repo.append(&ActivityLogEntry::new(
            actor_id,
            ActivityAction::AddGrade,
            format!("Grade {} for {} in {}", grade, student_id, course_id),
        ))?;

        info!(grade, letter = letter.as_str(), ?gpa, "成绩已录入");

        Ok(RecordedGrade {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            grade,
            letter_grade: letter,
            gpa,
        })
    }

    /// 录入成绩（文本输入）
    ///
    /// 文本无法解析为数字时返回 `Validation`
    pub fn record_grade_str(
        &self,
        student_id: &str,
        course_id: &str,
        raw_grade: &str,
        actor_id: i64,
    ) -> EngineResult<RecordedGrade> {
        let grade: f64 = raw_grade
            .trim()
            .parse()
            .map_err(|_| EngineError::Validation(format!("成绩不是有效数字: {}", raw_grade)))?;
        self.record_grade(student_id, course_id, grade, actor_id)
    }

    // ==========================================
    // GPA 重算
    // ==========================================

    /// 重算学生 GPA 并回写
    ///
    /// GPA = Σ(绩点 × 学分) / Σ(学分)，保留两位小数
    ///
    /// # 返回
    /// - `Ok(Some(gpa))`: 已回写
    /// - `Ok(None)`: 学生没有任何成绩，GPA 保持不变
    pub fn recalculate_gpa(&self, student_id: &str) -> EngineResult<Option<f64>> {
        let credited = self.grade_repo.find_credited_grades(student_id)?;
        if credited.is_empty() {
            debug!(student_id, "无成绩记录，GPA 保持不变");
            return Ok(None);
        }

        let (weighted, credits) = credited.iter().fold((0.0_f64, 0_i64), |(w, c), g| {
            (
                w + gpa_points_for(g.grade) * f64::from(g.credits),
                c + i64::from(g.credits),
            )
        });
        if credits == 0 {
            return Ok(None);
        }

        let gpa = round2(weighted / credits as f64);
        self.student_repo.update_gpa(student_id, gpa)?;
        debug!(student_id, gpa, courses = credited.len(), "GPA 已重算");
        Ok(Some(gpa))
    }

    // ==========================================
    // 不及格名单
    // ==========================================

    /// 所有低于及格线的成绩（按学生姓名、课程名排序）
    pub fn list_failing_students(&self) -> EngineResult<Vec<FailingStudentRow>> {
        let rows = self.report_repo.find_grades_below(PASSING_GRADE)?;
        debug!(count = rows.len(), "不及格名单已生成");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::error::{RepositoryError, RepositoryResult};
    use rusqlite::{params, Params, Row};

    fn seed(gateway: &SqliteGateway) {
        gateway
            .execute(
                "INSERT INTO students (id, name, email) VALUES ('S001', 'Alice', 'alice@uni.edu')",
                [],
            )
            .unwrap();
        gateway
            .execute("INSERT INTO students (id, name) VALUES ('S002', 'Bob')", [])
            .unwrap();
        for (id, name, credits) in [("C101", "Algorithms", 3), ("C102", "Databases", 4)] {
            gateway
                .execute(
                    "INSERT INTO courses (id, name, semester, credits) VALUES (?1, ?2, 'Fall 2024', ?3)",
                    params![id, name, credits],
                )
                .unwrap();
        }
    }

    fn setup() -> (Arc<SqliteGateway>, GradeEngine) {
        let gateway = Arc::new(SqliteGateway::open_in_memory().unwrap());
        seed(&gateway);
        (gateway.clone(), GradeEngine::new(gateway))
    }

    fn stored_gpa(gateway: &SqliteGateway, id: &str) -> f64 {
        gateway
            .query_one("SELECT gpa FROM students WHERE id = ?1", params![id], |r| r.get(0))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_weighted_gpa() {
        let (gw, engine) = setup();

        engine.record_grade("S001", "C101", 93.0, 1).unwrap();
        let result = engine.record_grade("S001", "C102", 75.0, 1).unwrap();

        // (4*3 + 2*4) / 7 = 2.857...
        assert_eq!(result.gpa, Some(2.86));
        assert_eq!(stored_gpa(&gw, "S001"), 2.86);
    }

    #[test]
    fn test_upsert_keeps_single_row() {
        let (gw, engine) = setup();

        engine.record_grade("S001", "C101", 55.0, 1).unwrap();
        let result = engine.record_grade("S001", "C101", 91.0, 1).unwrap();

        assert_eq!(result.letter_grade, LetterGrade::A);
        let rows: Vec<(f64, String)> = gw
            .query(
                "SELECT grade, letter_grade FROM grades WHERE student_id = 'S001'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(rows, vec![(91.0, "A".to_string())]);
        assert_eq!(stored_gpa(&gw, "S001"), 4.0);
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let (gw, engine) = setup();
        engine.record_grade("S001", "C101", 82.0, 1).unwrap();
        engine.record_grade("S001", "C102", 64.0, 1).unwrap();

        let first = engine.recalculate_gpa("S001").unwrap();
        let second = engine.recalculate_gpa("S001").unwrap();
        assert_eq!(first, second);
        assert_eq!(stored_gpa(&gw, "S001"), first.unwrap());
    }

    #[test]
    fn test_recalculate_without_grades_leaves_gpa() {
        let (gw, engine) = setup();
        gw.execute("UPDATE students SET gpa = 3.1 WHERE id = 'S002'", [])
            .unwrap();

        assert_eq!(engine.recalculate_gpa("S002").unwrap(), None);
        assert_eq!(stored_gpa(&gw, "S002"), 3.1);
    }

    #[test]
    fn test_invalid_grade_rejected() {
        let (gw, engine) = setup();

        for bad in [-0.1, 100.5, f64::NAN, f64::INFINITY] {
            let err = engine.record_grade("S001", "C101", bad, 1).unwrap_err();
            assert!(matches!(err, EngineError::Validation(_)));
        }
        let err = engine.record_grade_str("S001", "C101", "abc", 1).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let count: Option<i64> = gw
            .query_one("SELECT COUNT(*) FROM grades", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, Some(0));
    }

    #[test]
    fn test_record_grade_str_parses_trimmed_text() {
        let (_gw, engine) = setup();
        let result = engine.record_grade_str("S001", "C101", " 88.5 ", 1).unwrap();
        assert_eq!(result.grade, 88.5);
        assert_eq!(result.letter_grade, LetterGrade::B);
    }

    #[test]
    fn test_missing_student_or_course() {
        let (_gw, engine) = setup();

        let err = engine.record_grade("S999", "C101", 80.0, 1).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { ref id, .. } if id == "S999"));

        let err = engine.record_grade("S001", "C999", 80.0, 1).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { ref id, .. } if id == "C999"));
    }

    #[test]
    fn test_unknown_actor_rejected_before_any_write() {
        let (gw, engine) = setup();

        let err = engine.record_grade("S001", "C101", 91.0, 42).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { ref id, .. } if id == "42"));

        let grades: Option<i64> = gw
            .query_one("SELECT COUNT(*) FROM grades", [], |r| r.get(0))
            .unwrap();
        assert_eq!(grades, Some(0));
        assert_eq!(stored_gpa(&gw, "S001"), 0.0);
    }

    #[test]
    fn test_exact_tie_gpa_rounds_to_even() {
        let (gw, engine) = setup();
        gw.execute(
            "INSERT INTO courses (id, name, semester, credits) VALUES ('C103', 'Networks', 'Fall 2024', 5)",
            [],
        )
        .unwrap();

        engine.record_grade("S001", "C101", 95.0, 1).unwrap();
        let result = engine.record_grade("S001", "C103", 65.0, 1).unwrap();

        // (4*3 + 1*5) / 8 = 2.125
        assert_eq!(result.gpa, Some(2.12));
        assert_eq!(stored_gpa(&gw, "S001"), 2.12);
    }

    #[test]
    fn test_audit_entry_written() {
        let (gw, engine) = setup();
        engine.record_grade("S001", "C101", 91.0, 1).unwrap();

        let details: Option<String> = gw
            .query_one(
                "SELECT details FROM activity_log WHERE action = 'add_grade'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(details.as_deref(), Some("Grade 91 for S001 in C101"));
    }

    #[test]
    fn test_failing_list_boundaries() {
        let (_gw, engine) = setup();
        assert!(engine.list_failing_students().unwrap().is_empty());

        engine.record_grade("S001", "C101", 60.0, 1).unwrap();
        engine.record_grade("S002", "C101", 59.9, 1).unwrap();
        engine.record_grade("S002", "C102", 12.0, 1).unwrap();

        let rows = engine.list_failing_students().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.student_id == "S002"));
        assert_eq!(rows[0].course_name, "Algorithms");
        assert_eq!(rows[0].grade, 59.9);
        assert_eq!(rows[0].letter_grade, "F");
        assert_eq!(rows[1].course_name, "Databases");
    }

    // ==========================================
    // 故障注入: 审计写入失败
    // ==========================================

    struct AuditFailingGateway {
        inner: SqliteGateway,
    }

    impl StorageGateway for AuditFailingGateway {
        fn query<T, P, F>(&self, sql: &str, params: P, map_row: F) -> RepositoryResult<Vec<T>>
        where
            P: Params,
            F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
        {
            self.inner.query(sql, params, map_row)
        }

        fn execute<P: Params>(&self, sql: &str, params: P) -> RepositoryResult<usize> {
            if sql.contains("activity_log") {
                return Err(RepositoryError::DatabaseQueryError("disk I/O error".to_string()));
            }
            self.inner.execute(sql, params)
        }
    }

    #[test]
    fn test_audit_failure_leaves_grade_and_gpa_committed() {
        let inner = SqliteGateway::open_in_memory().unwrap();
        seed(&inner);
        let engine = GradeEngine::new(Arc::new(AuditFailingGateway { inner: inner.clone() }));

        let err = engine.record_grade("S001", "C101", 91.0, 1).unwrap_err();
        assert!(matches!(err, EngineError::Repository(_)));

        let grade: Option<f64> = inner
            .query_one(
                "SELECT grade FROM grades WHERE student_id = 'S001' AND course_id = 'C101'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(grade, Some(91.0));
        assert_eq!(stored_gpa(&inner, "S001"), 4.0);

        let audits: Option<i64> = inner
            .query_one("SELECT COUNT(*) FROM activity_log", [], |r| r.get(0))
            .unwrap();
        assert_eq!(audits, Some(0));
    }
}
