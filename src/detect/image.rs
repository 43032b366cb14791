//! # 灰度图像输出
//!
//! ## 依赖关系
//! - 被 `commands/preview.rs` 调用
//! - 使用 `plotters` 的 BitMapBackend

use crate::error::{Result, XrfError};
use crate::models::Grid;

use plotters::prelude::*;
use std::path::Path;

fn render_err<E: std::fmt::Debug>(e: E) -> XrfError {
    XrfError::RenderError(format!("{:?}", e))
}

/// [0, 1] 的值转换为 8 位灰度；超出范围截断，非有限值为黑
pub fn gray_level(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// 把取值在 [0, 1] 的网格写成灰度 PNG（一个单元一个像素）
pub fn write_grayscale_png(grid: &Grid, output_path: &Path) -> Result<()> {
    let (width, height) = grid.dimensions();
    let mut backend = BitMapBackend::new(output_path, (width as u32, height as u32));

    for (y, row) in grid.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let g = gray_level(v);
            backend
                .draw_pixel((x as i32, y as i32), RGBColor(g, g, g).to_backend_color())
                .map_err(render_err)?;
        }
    }

    backend.present().map_err(render_err)?;
    Ok(())
}
