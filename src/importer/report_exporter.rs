// ==========================================
// 学籍成绩管理系统 - 完整报表导出
// ==========================================
// 表头: Student_ID,Name,Email,Major,GPA,Course_ID,Course,Semester,Grade,Letter
// 顺序: 学生姓名，再按学期
// ==========================================

use crate::domain::activity_log::{ActivityAction, ActivityLogEntry};
use crate::importer::error::ImportResult;
use crate::repository::{ActivityLogRepository, ReportRepository, SqliteGateway, StorageGateway};
use csv::WriterBuilder;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// 导出表头（无数据时也写出）
pub const FULL_REPORT_HEADERS: [&str; 10] = [
    "Student_ID", "Name", "Email", "Major", "GPA", "Course_ID", "Course", "Semester", "Grade",
    "Letter",
];

pub struct ReportExporter<G: StorageGateway = SqliteGateway> {
    report_repo: Arc<ReportRepository<G>>,
    activity_log_repo: Arc<ActivityLogRepository<G>>,
}

impl<G: StorageGateway> ReportExporter<G> {
    pub fn new(
        report_repo: Arc<ReportRepository<G>>,
        activity_log_repo: Arc<ActivityLogRepository<G>>,
    ) -> Self {
        Self {
            report_repo,
            activity_log_repo,
        }
    }

    /// 导出完整报表（覆盖已有文件）
    ///
    /// # 返回
    /// - `Ok(rows)`: 写出的数据行数（不含表头）
    pub fn export_full_report(&self, path: &Path, actor_id: i64) -> ImportResult<usize> {
        let rows = self.report_repo.find_full_report()?;

        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(FULL_REPORT_HEADERS)?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        self.activity_log_repo.append(&ActivityLogEntry::new(
            actor_id,
            ActivityAction::ExportReport,
            format!("Exported to {}", path.display()),
        ))?;
        info!(path = %path.display(), rows = rows.len(), "报表已导出");
        Ok(rows.len())
    }
}
