// ==========================================
// 学籍成绩管理系统 - 学生 CSV 导入
// ==========================================
// 表头: id,name,email,major,enrollment_year
// 红线: 学号已存在的行静默跳过，不报错也不计入导入数
// 红线: 坏行跳过并计数，不中断整个导入
// ==========================================

use crate::api::validator::{blank_to_none, normalize_email, validate_student_id};
use crate::domain::activity_log::{ActivityAction, ActivityLogEntry};
use crate::domain::student::NewStudent;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::CsvParser;
use crate::repository::{ActivityLogRepository, SqliteGateway, StorageGateway, StudentRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 必需表头
pub const STUDENT_CSV_HEADERS: [&str; 2] = ["id", "name"];

/// 入学年份缺省值
pub const DEFAULT_ENROLLMENT_YEAR: i32 = 2024;

// ==========================================
// ImportSummary - 导入结果
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,   // 新增行数
    pub duplicates: usize, // 已存在而跳过的行数
    pub skipped: usize,    // 数据不合法而跳过的行数
}

// ==========================================
// StudentCsvImporter
// ==========================================
pub struct StudentCsvImporter<G: StorageGateway = SqliteGateway> {
    student_repo: Arc<StudentRepository<G>>,
    activity_log_repo: Arc<ActivityLogRepository<G>>,
    default_enrollment_year: i32,
}

impl<G: StorageGateway> StudentCsvImporter<G> {
    pub fn new(
        student_repo: Arc<StudentRepository<G>>,
        activity_log_repo: Arc<ActivityLogRepository<G>>,
    ) -> Self {
        Self {
            student_repo,
            activity_log_repo,
            default_enrollment_year: DEFAULT_ENROLLMENT_YEAR,
        }
    }

    /// 设置 enrollment_year 为空时使用的年份
    pub fn with_default_enrollment_year(mut self, year: i32) -> Self {
        self.default_enrollment_year = year;
        self
    }

    /// 导入学生
    ///
    /// # 参数
    /// - `path`: CSV 文件
    /// - `actor_id`: 操作人
    ///
    /// # 返回
    /// - `Ok(summary)`: 各类行数
    /// - `Err(...)`: 文件级错误（不存在、格式、表头），或审计写入失败
    pub fn import(&self, path: &Path, actor_id: i64) -> ImportResult<ImportSummary> {
        let records = CsvParser.parse(path, &STUDENT_CSV_HEADERS)?;
        let mut summary = ImportSummary::default();

        for (line, row) in &records {
            let student = match self.to_new_student(row) {
                Ok(s) => s,
                Err(reason) => {
                    warn!(line, %reason, "跳过无效行");
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.student_repo.insert_or_ignore(&student) {
                Ok(0) => summary.duplicates += 1,
                Ok(_) => summary.imported += 1,
                Err(e) => {
                    warn!(line, student_id = %student.id, error = %e, "写入失败，跳过");
                    summary.skipped += 1;
                }
            }
        }

        self.activity_log_repo.append(&ActivityLogEntry::new(
            actor_id,
            ActivityAction::ImportStudents,
            format!("Imported {} students", summary.imported),
        ))?;
        info!(
            path = %path.display(),
            imported = summary.imported,
            duplicates = summary.duplicates,
            skipped = summary.skipped,
            "学生导入完成"
        );
        Ok(summary)
    }

    /// 单行转换；失败时返回跳过原因
    fn to_new_student(&self, row: &HashMap<String, String>) -> Result<NewStudent, String> {
        let field = |name: &str| row.get(name).map(String::as_str).unwrap_or("");

        let id = field("id");
        validate_student_id(id).map_err(|e| e.to_string())?;

        let name = field("name");
        if name.is_empty() {
            return Err("姓名为空".to_string());
        }

        let email = normalize_email(Some(field("email"))).map_err(|e| e.to_string())?;

        let enrollment_year = match field("enrollment_year") {
            "" => self.default_enrollment_year,
            raw => raw
                .parse::<i32>()
                .map_err(|_| format!("入学年份不是整数: '{}'", raw))?,
        };

        Ok(NewStudent {
            id: id.to_string(),
            name: name.to_string(),
            email,
            major: blank_to_none(Some(field("major"))),
            enrollment_year: Some(enrollment_year),
        })
    }
}
