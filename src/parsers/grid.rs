//! # 计数网格解析器
//!
//! 解析仪器导出的分隔符文本计数图。
//!
//! ## 格式说明
//! ```text
//! 12;15;11;9        # 第 1 行（y = 0）
//! 14;220;231;10     # 第 2 行（y = 1）
//! ...
//! ```
//! - 无表头，每行一行网格，默认分隔符为 `;`
//! - 无法解析的单元按 0 处理
//! - 行尾多余的分隔符会被忽略
//! - 各行列数必须一致
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/grid.rs`
//! - 使用 `csv` 库读取

use crate::error::{Result, XrfError};
use crate::models::Grid;

use std::io::Read;
use std::path::Path;

/// 默认分隔符
pub const DEFAULT_DELIMITER: u8 = b';';

/// 解析网格文件
pub fn parse_grid_file(path: &Path, delimiter: u8) -> Result<Grid> {
    let file = std::fs::File::open(path).map_err(|e| XrfError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_grid_reader(file, delimiter).map_err(|e| match e {
        XrfError::InvalidGrid(reason) => XrfError::ParseError {
            format: "grid".to_string(),
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// 从字符串内容解析网格
pub fn parse_grid_content(content: &str, delimiter: u8) -> Result<Grid> {
    parse_grid_reader(content.as_bytes(), delimiter)
}

fn parse_grid_reader<R: Read>(reader: R, delimiter: u8) -> Result<Grid> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<f64>> = Vec::new();

    for record in rdr.records() {
        let record = record?;

        let mut fields: Vec<&str> = record.iter().collect();
        if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        rows.push(
            fields
                .iter()
                .map(|s| s.parse::<f64>().unwrap_or(0.0))
                .collect(),
        );
    }

    if rows.is_empty() {
        return Err(XrfError::InvalidGrid("no data rows".to_string()));
    }

    Grid::from_rows(rows)
}
