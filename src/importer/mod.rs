// ==========================================
// 学籍成绩管理系统 - 导入导出层
// ==========================================
// 职责: 学生 CSV 批量导入、完整报表 CSV 导出
// ==========================================

pub mod error;
pub mod file_parser;
pub mod report_exporter;
pub mod student_csv_importer;

pub use error::{ImportError, ImportResult};
pub use file_parser::CsvParser;
pub use report_exporter::{ReportExporter, FULL_REPORT_HEADERS};
pub use student_csv_importer::{ImportSummary, StudentCsvImporter};
