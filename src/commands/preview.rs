//! # preview 命令实现
//!
//! 写出自动检测的预处理图像：`normalized.png` 与 `gaussian.png`。
//!
//! ## 依赖关系
//! - 使用 `cli/render.rs` 定义的 PreviewArgs
//! - 使用 `detect/` 进行归一化与模糊
//! - 使用 `utils/progress.rs` 显示 spinner

use super::load_grid;
use crate::cli::render::PreviewArgs;
use crate::detect;
use crate::error::{Result, XrfError};
use crate::utils::{output, progress};

use std::fs;

/// 执行 preview 命令
pub fn execute(args: PreviewArgs) -> Result<()> {
    output::print_header("Auto-detection Preview");

    let normalized_path = args.output.join("normalized.png");
    let gaussian_path = args.output.join("gaussian.png");

    if !args.overwrite {
        if let Some(existing) = [&normalized_path, &gaussian_path]
            .into_iter()
            .find(|p| p.exists())
        {
            output::print_warning(&format!(
                "Output exists, use --overwrite to replace: {}",
                existing.display()
            ));
            return Ok(());
        }
    }

    let grid = load_grid(&args.grid, args.delimiter)?;

    fs::create_dir_all(&args.output).map_err(|e| XrfError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let spinner = progress::create_spinner("Filtering grid");
    let filtered = detect::normalize_min_max(&grid).and_then(|normalized| {
        let blurred = detect::gaussian_blur(&normalized, args.kernel, args.sigma)?;
        Ok((normalized, blurred))
    });
    spinner.finish_and_clear();
    let (normalized, blurred) = filtered?;

    output::print_info(&format!(
        "Gaussian kernel {} x {}, sigma = {:.2}",
        args.kernel, args.kernel, args.sigma
    ));

    detect::write_grayscale_png(&normalized, &normalized_path)?;
    output::print_saved("Normalized", &normalized_path);

    detect::write_grayscale_png(&blurred, &gaussian_path)?;
    output::print_saved("Gaussian", &gaussian_path);

    Ok(())
}
