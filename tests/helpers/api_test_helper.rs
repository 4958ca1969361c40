// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::Arc;
use tempfile::NamedTempFile;

use academic_records::api::{ApiError, CourseApi, StudentApi};
use academic_records::engine::{AnalyticsEngine, GradeEngine};
use academic_records::importer::{ReportExporter, StudentCsvImporter};
use academic_records::repository::{
    ActivityLogRepository, CourseRepository, ReportRepository, SqliteGateway, StorageGateway,
    StudentRepository,
};

use super::test_data_builder::{CourseBuilder, StudentBuilder};

/// 测试使用的操作人（默认管理员）
pub const ACTOR: i64 = 1;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub db_path: String,
    pub gateway: Arc<SqliteGateway>,
    pub student_api: Arc<StudentApi>,
    pub course_api: Arc<CourseApi>,
    pub grade_engine: Arc<GradeEngine>,
    pub importer: Arc<StudentCsvImporter>,
    pub exporter: Arc<ReportExporter>,

    // Repository层（用于测试数据准备与断言）
    pub student_repo: Arc<StudentRepository>,
    pub activity_log_repo: Arc<ActivityLogRepository>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的测试环境（临时文件数据库）
    pub fn new() -> Result<Self, String> {
        academic_records::logging::init_test();

        let (temp_file, db_path) =
            test_helpers::create_test_db().map_err(|e| format!("创建测试数据库失败: {}", e))?;
        let gateway = test_helpers::open_test_gateway(&db_path)
            .map_err(|e| format!("打开测试数据库失败: {}", e))?;

        let student_repo = Arc::new(StudentRepository::new(gateway.clone()));
        let course_repo = Arc::new(CourseRepository::new(gateway.clone()));
        let report_repo = Arc::new(ReportRepository::new(gateway.clone()));
        let activity_log_repo = Arc::new(ActivityLogRepository::new(gateway.clone()));

        let grade_engine = Arc::new(GradeEngine::new(gateway.clone()));

        let student_api = Arc::new(StudentApi::new(student_repo.clone(), activity_log_repo.clone()));
        let course_api = Arc::new(CourseApi::new(
            course_repo,
            student_repo.clone(),
            activity_log_repo.clone(),
            grade_engine.clone(),
        ));
        let importer = Arc::new(StudentCsvImporter::new(
            student_repo.clone(),
            activity_log_repo.clone(),
        ));
        let exporter = Arc::new(ReportExporter::new(report_repo, activity_log_repo.clone()));

        Ok(Self {
            db_path,
            gateway,
            student_api,
            course_api,
            grade_engine,
            importer,
            exporter,
            student_repo,
            activity_log_repo,
            _temp_file: temp_file,
        })
    }

    /// 统计分析引擎
    pub fn analytics(&self, include_zero_gpa: bool) -> AnalyticsEngine {
        AnalyticsEngine::new(self.gateway.clone()).with_include_zero_gpa(include_zero_gpa)
    }

    /// 准备学生
    pub fn prepare_student(&self, id: &str, name: &str) -> Result<(), String> {
        self.student_api
            .add(&StudentBuilder::new(id, name).build(), ACTOR)
            .map_err(|e| format!("插入学生失败: {}", e))
    }

    /// 准备课程
    pub fn prepare_course(&self, id: &str, name: &str, credits: i32) -> Result<(), String> {
        self.course_api
            .add(&CourseBuilder::new(id, name).credits(credits).build(), ACTOR)
            .map_err(|e| format!("插入课程失败: {}", e))
    }

    /// 读取学生缓存 GPA
    pub fn gpa_of(&self, student_id: &str) -> f64 {
        self.student_repo
            .find_by_id(student_id)
            .ok()
            .flatten()
            .map(|s| s.gpa)
            .unwrap_or(f64::NAN)
    }

    /// 成绩总行数
    pub fn grade_count(&self) -> i64 {
        self.gateway
            .query_one("SELECT COUNT(*) FROM grades", [], |r| r.get(0))
            .ok()
            .flatten()
            .unwrap_or(-1)
    }
}

// ==========================================
// 错误类型断言
// ==========================================

/// 验证是否为输入校验错误
pub fn assert_validation_error(result: Result<impl std::fmt::Debug, ApiError>) {
    match result {
        Err(ApiError::ValidationError(_)) => {}
        Ok(val) => panic!("预期ValidationError错误，但操作成功: {:?}", val),
        Err(e) => panic!("预期ValidationError错误，但得到: {:?}", e),
    }
}

/// 验证是否为资源不存在错误
pub fn assert_not_found(result: Result<impl std::fmt::Debug, ApiError>) {
    match result {
        Err(ApiError::NotFound(_)) => {}
        Ok(val) => panic!("预期NotFound错误，但操作成功: {:?}", val),
        Err(e) => panic!("预期NotFound错误，但得到: {:?}", e),
    }
}

/// 验证是否为唯一键冲突
pub fn assert_conflict(result: Result<impl std::fmt::Debug, ApiError>) {
    match result {
        Err(ApiError::Conflict(_)) => {}
        Ok(val) => panic!("预期Conflict错误，但操作成功: {:?}", val),
        Err(e) => panic!("预期Conflict错误，但得到: {:?}", e),
    }
}

// ==========================================
// 操作日志验证辅助函数
// ==========================================

/// 验证操作日志是否已记录
///
/// # 说明
/// 检查指定 action 的日志条数至少为 expected_count
pub fn assert_action_logged(
    env: &ApiTestEnv,
    action: &str,
    expected_count: usize,
) -> Result<(), String> {
    let logs = env
        .activity_log_repo
        .find_by_action(action, 100)
        .map_err(|e| format!("查询操作日志失败: {}", e))?;

    if logs.len() < expected_count {
        return Err(format!(
            "预期至少{}条{}类型的操作日志，实际找到{}条",
            expected_count,
            action,
            logs.len()
        ));
    }
    Ok(())
}

/// 写入临时 CSV
pub fn write_csv(content: &str) -> NamedTempFile {
    test_helpers::write_temp_csv(content).expect("无法写入临时 CSV")
}
