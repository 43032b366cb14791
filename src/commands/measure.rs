//! # measure 命令实现
//!
//! 提交单个形状并报告覆盖单元数与平均计数。
//!
//! ## 依赖关系
//! - 使用 `cli/measure.rs` 定义的 MeasureArgs
//! - 使用 `sampling/` 计算统计

use super::load_grid;
use crate::cli::measure::MeasureArgs;
use crate::error::{Result, XrfError};
use crate::sampling::{Classification, RegionSample};
use crate::utils::output;

/// 执行 measure 命令
pub fn execute(args: MeasureArgs) -> Result<()> {
    output::print_header("Region Measurement");

    let draft = args
        .circle
        .or(args.rect)
        .ok_or_else(|| XrfError::InvalidArgument("either --circle or --rect is required".into()))?;

    let grid = load_grid(&args.grid, args.delimiter)?;
    let mut sample = RegionSample::commit(draft, Classification::Unknown);
    let stats = sample.stats(&grid);

    output::print_info(&format!("Region: {}", sample.shape()));
    if *sample.shape() != draft {
        output::print_info(&format!("Normalized from: {}", draft));
    }
    output::print_info(&format!("Covered cells: {}", stats.cells));

    match stats.mean {
        Some(mean) => output::print_success(&format!("Mean count: {:.4}", mean)),
        None => output::print_warning("Mean count: not calculated"),
    }

    Ok(())
}
