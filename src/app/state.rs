// ==========================================
// 学籍成绩管理系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 红线: 所有仓储、引擎、配置共享同一个连接
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{ActivityLogApi, ApiError, ApiResult, CourseApi, StudentApi};
use crate::config::ConfigManager;
use crate::engine::{AnalyticsEngine, GradeEngine};
use crate::importer::{ReportExporter, StudentCsvImporter};
use crate::repository::{
    ActivityLogRepository, CourseRepository, ReportRepository, SqliteGateway, StudentRepository,
    UserRepository,
};

/// 覆盖默认数据库路径的环境变量
pub const DB_PATH_ENV: &str = "ACADEMIC_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 存储网关（共享连接）
    pub gateway: Arc<SqliteGateway>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 学生API
    pub student_api: Arc<StudentApi>,

    /// 课程API
    pub course_api: Arc<CourseApi>,

    /// 成绩引擎
    pub grade_engine: Arc<GradeEngine>,

    /// 统计分析引擎（include_zero_gpa 取自配置）
    pub analytics_engine: Arc<AnalyticsEngine>,

    /// 学生导入
    pub student_importer: Arc<StudentCsvImporter>,

    /// 报表导出
    pub report_exporter: Arc<ReportExporter>,

    /// 操作日志查询
    pub activity_log_api: Arc<ActivityLogApi>,

    /// 操作日志仓储（用于审计追踪）
    pub activity_log_repo: Arc<ActivityLogRepository>,

    /// 用户仓储（校验操作人）
    pub user_repo: Arc<UserRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在则创建）
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开连接、统一 PRAGMA、幂等建表
    /// 2. 初始化所有Repository与Engine
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);
        let gateway = Arc::new(SqliteGateway::open(&db_path)?);
        Self::from_gateway(db_path, gateway)
    }

    /// 基于已打开的网关装配
    pub fn from_gateway(db_path: String, gateway: Arc<SqliteGateway>) -> ApiResult<Self> {
        let config_manager = Arc::new(ConfigManager::from_connection(gateway.shared_connection())?);

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let student_repo = Arc::new(StudentRepository::new(gateway.clone()));
        let course_repo = Arc::new(CourseRepository::new(gateway.clone()));
        let report_repo = Arc::new(ReportRepository::new(gateway.clone()));
        let activity_log_repo = Arc::new(ActivityLogRepository::new(gateway.clone()));
        let user_repo = Arc::new(UserRepository::new(gateway.clone()));

        // ==========================================
        // 初始化Engine层
        // ==========================================
        let grade_engine = Arc::new(GradeEngine::new(gateway.clone()));
        let analytics_engine = Arc::new(
            AnalyticsEngine::new(gateway.clone())
                .with_include_zero_gpa(config_manager.get_include_zero_gpa()?),
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let student_api = Arc::new(StudentApi::new(student_repo.clone(), activity_log_repo.clone()));
        let course_api = Arc::new(CourseApi::new(
            course_repo,
            student_repo.clone(),
            activity_log_repo.clone(),
            grade_engine.clone(),
        ));
        let student_importer = Arc::new(
            StudentCsvImporter::new(student_repo, activity_log_repo.clone())
                .with_default_enrollment_year(config_manager.get_default_enrollment_year()?),
        );
        let report_exporter = Arc::new(ReportExporter::new(report_repo, activity_log_repo.clone()));
        let activity_log_api = Arc::new(ActivityLogApi::new(activity_log_repo.clone(), user_repo.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            gateway,
            config_manager,
            student_api,
            course_api,
            grade_engine,
            analytics_engine,
            student_importer,
            report_exporter,
            activity_log_api,
            activity_log_repo,
            user_repo,
        })
    }

    /// 未指定操作人时使用的审计用户
    pub fn default_actor_id(&self) -> ApiResult<i64> {
        self.config_manager
            .get_default_actor_id()
            .map_err(ApiError::from)
    }

    /// 确定本次调用的操作人并校验其存在
    ///
    /// 未指定时取配置 audit.default_actor_id。须在分发任何写操作前调用，
    /// 否则写入会先落库、到审计一步才因外键失败。
    ///
    /// # 返回
    /// - `Err(NotFound)`: users 表中没有该用户
    pub fn resolve_actor(&self, requested: Option<i64>) -> ApiResult<i64> {
        let actor_id = match requested {
            Some(id) => id,
            None => self.default_actor_id()?,
        };
        if !self.user_repo.exists(actor_id)? {
            tracing::warn!(actor_id, "操作人不存在，拒绝执行");
            return Err(ApiError::NotFound(format!("用户(id={})不存在", actor_id)));
        }
        Ok(actor_id)
    }
}

/// 获取默认数据库路径
///
/// 优先级：
/// 1. 环境变量 ACADEMIC_DB_PATH
/// 2. <用户数据目录>/academic-records/academic.db
/// 3. 当前目录 academic.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("academic.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("academic-records");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("academic.db");
        }
    }
    path.to_string_lossy().to_string()
}
