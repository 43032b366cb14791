//! # 标定结果导出
//!
//! 将每个样本的统计与估计负载量导出为 CSV。
//!
//! ## 列
//! index, label, class, shape, cells, mean_count, known_loading, estimated_loading
//!
//! 缺失值（空区域、无负载量、数据不足）写为空字段。
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs` 调用
//! - 使用 `session.rs` 的 SessionReport
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, XrfError};
use crate::session::SessionReport;

use std::io::Write;
use std::path::Path;

const HEADER: [&str; 8] = [
    "index",
    "label",
    "class",
    "shape",
    "cells",
    "mean_count",
    "known_loading",
    "estimated_loading",
];

fn optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_default()
}

/// 将表头与所有样本行写入 CSV writer（不负责 flush）
pub fn write_results<W: Write>(report: &SessionReport, wtr: &mut csv::Writer<W>) -> Result<()> {
    wtr.write_record(HEADER)?;

    for row in &report.samples {
        wtr.write_record([
            (row.index + 1).to_string(),
            row.display_name(),
            row.classification.to_string(),
            row.shape.to_string(),
            row.cells.to_string(),
            optional(row.mean_count, 4),
            optional(row.known_loading, 4),
            optional(row.estimated_loading, 4),
        ])?;
    }

    Ok(())
}

/// 导出结果为 CSV 文件
pub fn to_csv(report: &SessionReport, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path).map_err(|e| XrfError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    let mut wtr = csv::Writer::from_writer(file);
    write_results(report, &mut wtr)?;

    wtr.flush().map_err(|e| XrfError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
