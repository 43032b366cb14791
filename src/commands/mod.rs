//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `session.rs`, `utils/`
//! - 子模块: measure, calibrate, heatmap, preview

pub mod calibrate;
pub mod heatmap;
pub mod measure;
pub mod preview;

use crate::cli::Commands;
use crate::error::{Result, XrfError};
use crate::models::Grid;
use crate::parsers::{self, RegionLayout};
use crate::utils::output;

use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Measure(args) => measure::execute(args),
        Commands::Calibrate(args) => calibrate::execute(args),
        Commands::Heatmap(args) => heatmap::execute(args),
        Commands::Preview(args) => preview::execute(args),
    }
}

/// 读取网格并打印尺寸
fn load_grid(path: &Path, delimiter: u8) -> Result<Grid> {
    if !path.is_file() {
        return Err(XrfError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let grid = parsers::parse_grid_file(path, delimiter)?;
    output::print_success(&format!(
        "Loaded grid '{}' ({} x {})",
        path.display(),
        grid.width(),
        grid.height()
    ));
    Ok(grid)
}

/// 读取区域布局并打印警告
fn load_layout(path: &Path) -> Result<RegionLayout> {
    if !path.is_file() {
        return Err(XrfError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let layout = parsers::parse_regions_file(path)?;
    for warning in &layout.warnings {
        output::print_warning(warning);
    }
    let references = layout.samples.iter().filter(|s| s.is_reference()).count();
    output::print_info(&format!(
        "Loaded {} regions ({} reference, {} unknown)",
        layout.samples.len(),
        references,
        layout.samples.len() - references
    ));
    Ok(layout)
}

/// 按扩展名判断是否输出 SVG
fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("out/map.SVG")));
        assert!(!is_svg(Path::new("map.png")));
        assert!(!is_svg(Path::new("map")));
    }

    #[test]
    fn test_load_grid_missing_file() {
        let result = load_grid(Path::new("/nonexistent/map.csv"), b';');
        assert!(matches!(result, Err(XrfError::FileNotFound { .. })));
    }
}
