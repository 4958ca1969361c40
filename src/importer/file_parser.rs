// ==========================================
// 学籍成绩管理系统 - CSV 文件解析
// ==========================================
// 输出: 每行一个 表头 -> 值 映射（已去除首尾空白）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 一行原始记录: (文件内行号, 表头 -> 值)
pub type RawRecord = (usize, HashMap<String, String>);

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 为原始记录
    ///
    /// # 参数
    /// - `file_path`: .csv 文件路径
    /// - `required_headers`: 必须出现的表头
    ///
    /// # 返回
    /// - `Ok(records)`: 非空白行（行号从 2 开始，第 1 行为表头）
    /// - `Err(...)`: 文件不存在、扩展名不对、表头缺字段或 CSV 结构损坏
    pub fn parse(&self, file_path: &Path, required_headers: &[&str]) -> ImportResult<Vec<RawRecord>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }
        match file_path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => {}
            other => {
                return Err(ImportError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();
        for required in required_headers {
            if !headers.iter().any(|h| h == required) {
                return Err(ImportError::MissingColumn((*required).to_string()));
            }
        }

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_map: HashMap<String, String> = record
                .iter()
                .enumerate()
                .filter_map(|(col, value)| {
                    headers
                        .get(col)
                        .map(|h| (h.clone(), value.trim().to_string()))
                })
                .collect();

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }
            records.push((idx + 2, row_map));
        }

        Ok(records)
    }
}
