//! # heatmap / preview 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/heatmap.rs` 与 `commands/preview.rs`

use super::parse_delimiter;
use crate::render::Colormap;

use clap::Args;
use std::path::PathBuf;

/// heatmap 子命令参数
#[derive(Args, Debug)]
pub struct HeatmapArgs {
    /// Count grid file
    pub grid: PathBuf,

    /// Region layout CSV to overlay
    #[arg(short, long)]
    pub regions: Option<PathBuf>,

    /// Output image (PNG or SVG by extension)
    #[arg(short, long, default_value = "heatmap.png")]
    pub output: PathBuf,

    /// Colormap
    #[arg(long, value_enum, default_value = "cool")]
    pub colormap: Colormap,

    /// Pixels per grid cell
    #[arg(long, default_value_t = 8)]
    pub cell_size: u32,

    /// Do not label regions with their index
    #[arg(long, default_value_t = false)]
    pub no_labels: bool,

    /// Grid field delimiter
    #[arg(short, long, env = "XRFCAL_DELIMITER", default_value = ";", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

/// preview 子命令参数
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Count grid file
    pub grid: PathBuf,

    /// Output directory for normalized.png and gaussian.png
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Gaussian kernel size (odd)
    #[arg(long, default_value_t = 5)]
    pub kernel: usize,

    /// Gaussian standard deviation in cells
    #[arg(long, default_value_t = 1.0)]
    pub sigma: f64,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Grid field delimiter
    #[arg(short, long, env = "XRFCAL_DELIMITER", default_value = ";", value_parser = parse_delimiter)]
    pub delimiter: u8,
}
