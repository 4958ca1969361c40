// ==========================================
// 学籍成绩管理系统 - 统计分析引擎
// ==========================================
// 职责: GPA 排名、学业状态分级、课程成绩统计
// 输入: students.gpa 缓存 + grades
// 输出: 报表行（每次调用实时计算）
// ==========================================

use crate::domain::report::{AcademicStatusRow, CourseStatisticsRow, GpaRankingRow};
use crate::domain::types::Standing;
use crate::engine::error::EngineResult;
use crate::repository::{ReportRepository, SqliteGateway, StorageGateway};
use std::sync::Arc;
use tracing::debug;

// ==========================================
// AnalyticsEngine - 统计分析引擎
// ==========================================
pub struct AnalyticsEngine<G: StorageGateway = SqliteGateway> {
    report_repo: ReportRepository<G>,
    include_zero_gpa: bool, // 是否纳入 GPA 为 0 的学生
}

impl<G: StorageGateway> AnalyticsEngine<G> {
    /// 构造函数（默认不纳入 GPA 为 0 的学生）
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            report_repo: ReportRepository::new(gateway),
            include_zero_gpa: false,
        }
    }

    pub fn with_include_zero_gpa(mut self, include_zero_gpa: bool) -> Self {
        self.include_zero_gpa = include_zero_gpa;
        self
    }

    pub fn include_zero_gpa(&self) -> bool {
        self.include_zero_gpa
    }

    /// GPA 排名（GPA 降序，同分按姓名升序）
    pub fn gpa_rankings(&self) -> EngineResult<Vec<GpaRankingRow>> {
        let rows = self.report_repo.find_gpa_rankings(self.include_zero_gpa)?;
        debug!(count = rows.len(), include_zero_gpa = self.include_zero_gpa, "GPA 排名");
        Ok(rows)
    }

    /// 学业状态（排名 + 分级标签）
    ///
    /// # 分级
    /// - ≥3.5: Dean's List
    /// - ≥2.0: Good Standing
    /// - ≥1.0: Warning
    /// - 其余: Academic Probation
    pub fn academic_status(&self) -> EngineResult<Vec<AcademicStatusRow>> {
        let rows = self
            .gpa_rankings()?
            .into_iter()
            .map(|r| AcademicStatusRow {
                standing: Standing::classify(r.gpa).label().to_string(),
                name: r.name,
                id: r.id,
                gpa: r.gpa,
                course_count: r.course_count,
            })
            .collect();
        Ok(rows)
    }

    /// 课程成绩统计（只含已有成绩的课程，按平均分降序）
    pub fn course_statistics(&self) -> EngineResult<Vec<CourseStatisticsRow>> {
        let rows = self.report_repo.find_course_statistics()?;
        debug!(count = rows.len(), "课程统计");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GradeEngine;
    use rusqlite::params;

    fn setup() -> (Arc<SqliteGateway>, GradeEngine) {
        let gateway = Arc::new(SqliteGateway::open_in_memory().unwrap());
        for (id, name) in [("S001", "Alice"), ("S002", "Bob"), ("S003", "Carol"), ("S004", "Dave")] {
            gateway
                .execute(
                    "INSERT INTO students (id, name) VALUES (?1, ?2)",
                    params![id, name],
                )
                .unwrap();
        }
        for (id, name) in [("C101", "Algorithms"), ("C102", "Databases"), ("C103", "Compilers")] {
            gateway
                .execute(
                    "INSERT INTO courses (id, name, semester) VALUES (?1, ?2, 'Fall 2024')",
                    params![id, name],
                )
                .unwrap();
        }
        (gateway.clone(), GradeEngine::new(gateway))
    }

    #[test]
    fn test_rankings_exclude_zero_gpa() {
        let (gw, grades) = setup();
        grades.record_grade("S001", "C101", 95.0, 1).unwrap();
        grades.record_grade("S002", "C101", 85.0, 1).unwrap();
        grades.record_grade("S003", "C101", 40.0, 1).unwrap(); // F -> gpa 0

        let engine = AnalyticsEngine::new(gw.clone());
        let rankings = engine.gpa_rankings().unwrap();
        let ids: Vec<&str> = rankings.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["S001", "S002"]);
        assert_eq!(rankings[0].course_count, 1);

        let status = engine.academic_status().unwrap();
        assert_eq!(status.len(), 2);
        assert!(status.iter().all(|r| r.id != "S003" && r.id != "S004"));
    }

    #[test]
    fn test_include_zero_gpa_switch() {
        let (gw, grades) = setup();
        grades.record_grade("S001", "C101", 95.0, 1).unwrap();

        let engine = AnalyticsEngine::new(gw).with_include_zero_gpa(true);
        let status = engine.academic_status().unwrap();
        assert_eq!(status.len(), 4);
        assert_eq!(status[0].id, "S001");
        assert!(status[1..].iter().all(|r| r.standing == "Academic Probation"));
    }

    #[test]
    fn test_standing_labels() {
        let (gw, grades) = setup();
        grades.record_grade("S001", "C101", 90.0, 1).unwrap(); // 4.0
        grades.record_grade("S002", "C101", 70.0, 1).unwrap(); // 2.0
        grades.record_grade("S003", "C101", 60.0, 1).unwrap(); // 1.0

        let status = AnalyticsEngine::new(gw).academic_status().unwrap();
        let labels: Vec<&str> = status.iter().map(|r| r.standing.as_str()).collect();
        assert_eq!(labels, vec!["Dean's List", "Good Standing", "Warning"]);
    }

    #[test]
    fn test_course_statistics() {
        let (gw, grades) = setup();
        grades.record_grade("S001", "C101", 90.0, 1).unwrap();
        grades.record_grade("S002", "C101", 81.0, 1).unwrap();
        grades.record_grade("S003", "C101", 70.0, 1).unwrap();
        grades.record_grade("S001", "C102", 99.0, 1).unwrap();

        let stats = AnalyticsEngine::new(gw).course_statistics().unwrap();
        assert_eq!(stats.len(), 2); // C103 无成绩
        assert_eq!(stats[0].course_name, "Databases");
        assert_eq!(stats[1].course_name, "Algorithms");
        assert_eq!(stats[1].enrolled_count, 3);
        assert_eq!(stats[1].avg_grade, 80.33);
        assert_eq!(stats[1].min_grade, 70.0);
        assert_eq!(stats[1].max_grade, 90.0);
    }
}
