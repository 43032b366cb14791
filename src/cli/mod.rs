//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `measure`: 单个区域的覆盖单元数与平均计数
//! - `calibrate`: 按区域布局拟合标定曲线并估计未知样本负载量（支持批量）
//! - `heatmap`: 计数热图与区域叠加
//! - `preview`: 自动检测预览（归一化 + 高斯模糊）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: measure, calibrate, render

pub mod calibrate;
pub mod measure;
pub mod render;

use clap::{Parser, Subcommand};

/// xrfcal - XRF 区域采样与标定工具
#[derive(Parser)]
#[command(name = "xrfcal")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Region sampling and count-to-loading calibration for XRF count maps", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Measure covered cells and mean counts of a single region
    Measure(measure::MeasureArgs),

    /// Fit a calibration from reference regions and estimate unknown loadings
    Calibrate(calibrate::CalibrateArgs),

    /// Render a count heatmap with region overlays
    Heatmap(render::HeatmapArgs),

    /// Write normalized and gaussian-blurred preview images for auto-detection
    Preview(render::PreviewArgs),
}

/// 解析分隔符：单个 ASCII 字符，或 `tab` / `semicolon` / `comma` / `space`
pub fn parse_delimiter(input: &str) -> Result<u8, String> {
    match input.to_lowercase().as_str() {
        "tab" | "\\t" => return Ok(b'\t'),
        "semicolon" => return Ok(b';'),
        "comma" => return Ok(b','),
        "space" => return Ok(b' '),
        _ => {}
    }

    match input.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!(
            "Invalid delimiter '{}'. Use a single ASCII character or tab, semicolon, comma, space",
            input
        )),
    }
}

/// 解析逗号分隔的数值列表
pub(crate) fn parse_numbers(input: &str, what: &str) -> Result<Vec<f64>, String> {
    input
        .split(',')
        .map(|s| {
            let s = s.trim();
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("Invalid number '{}' in {} '{}'", s, what, input))
        })
        .collect()
}
