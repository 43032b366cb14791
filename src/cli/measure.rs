//! # measure 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/measure.rs`

use super::{parse_delimiter, parse_numbers};
use crate::models::ShapeDescriptor;

use clap::{ArgGroup, Args};
use std::path::PathBuf;

/// 解析圆：`cx,cy,r`
pub fn parse_circle(input: &str) -> Result<ShapeDescriptor, String> {
    match parse_numbers(input, "circle")?.as_slice() {
        &[cx, cy, r] => Ok(ShapeDescriptor::circle(cx, cy, r)),
        _ => Err(format!("Invalid circle '{}'. Expected cx,cy,r", input)),
    }
}

/// 解析矩形：`x,y,w,h` 或 `x,y,w,h,deg`
pub fn parse_rect(input: &str) -> Result<ShapeDescriptor, String> {
    match parse_numbers(input, "rectangle")?.as_slice() {
        &[x, y, w, h] => Ok(ShapeDescriptor::rect(x, y, w, h)),
        &[x, y, w, h, deg] => Ok(ShapeDescriptor::rotated_rect(x, y, w, h, deg)),
        _ => Err(format!("Invalid rectangle '{}'. Expected x,y,w,h[,deg]", input)),
    }
}

/// measure 子命令参数
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("shape").required(true).args(["circle", "rect"])))]
pub struct MeasureArgs {
    /// Count grid file (delimited text, one row per line)
    pub grid: PathBuf,

    /// Circle region: center and radius in cells (e.g., "12,8,3")
    #[arg(long, value_parser = parse_circle, allow_hyphen_values = true)]
    pub circle: Option<ShapeDescriptor>,

    /// Rectangle region: anchor corner, size and optional rotation in degrees (e.g., "4,4,-3,2,15")
    #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
    pub rect: Option<ShapeDescriptor>,

    /// Grid field delimiter
    #[arg(short, long, env = "XRFCAL_DELIMITER", default_value = ";", value_parser = parse_delimiter)]
    pub delimiter: u8,
}
