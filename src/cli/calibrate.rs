//! # calibrate 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/calibrate.rs`

use super::parse_delimiter;

use clap::Args;
use std::path::PathBuf;

/// calibrate 子命令参数
#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Input: count grid file or directory of grid files
    pub input: PathBuf,

    /// Region layout CSV (label,shape,x,y,w,h,r,rotation,class,loading)
    #[arg(short, long)]
    pub regions: PathBuf,

    /// Output: result CSV (single mode) or directory (batch mode)
    #[arg(short, long, default_value = "calibration.csv")]
    pub output: PathBuf,

    /// Write a calibration plot (PNG or SVG by extension; batch mode writes one per grid)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Plot width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 700)]
    pub height: u32,

    /// Grid field delimiter
    #[arg(short, long, env = "XRFCAL_DELIMITER", default_value = ";", value_parser = parse_delimiter)]
    pub delimiter: u8,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for grid files (batch mode, e.g., "*.csv,*.txt")
    #[arg(long, default_value = "*.csv,*.txt")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, env = "XRFCAL_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
