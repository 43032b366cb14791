//! # heatmap 命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/render.rs` 定义的 HeatmapArgs
//! - 使用 `render/heatmap.rs` 绘图

use super::{is_svg, load_grid, load_layout};
use crate::cli::render::HeatmapArgs;
use crate::error::Result;
use crate::render::{self, HeatmapOptions};
use crate::utils::output;

/// 执行 heatmap 命令
pub fn execute(args: HeatmapArgs) -> Result<()> {
    output::print_header("Count Heatmap");

    let grid = load_grid(&args.grid, args.delimiter)?;
    let samples = match &args.regions {
        Some(path) => load_layout(path)?.samples,
        None => Vec::new(),
    };

    if let Some((min, max)) = grid.value_range() {
        output::print_info(&format!("Value range: {:.2} - {:.2}", min, max));
    } else {
        output::print_warning("Grid has no finite values");
    }

    let options = HeatmapOptions {
        colormap: args.colormap,
        cell_size: args.cell_size,
        labels: !args.no_labels,
        use_svg: is_svg(&args.output),
    };
    output::print_info(&format!(
        "Colormap: {}, {} px per cell",
        options.colormap, options.cell_size
    ));

    render::generate_heatmap(&grid, &samples, &args.output, &options)?;
    output::print_saved("Heatmap", &args.output);

    Ok(())
}
