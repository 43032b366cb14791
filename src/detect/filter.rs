//! # 网格滤波
//!
//! ## 依赖关系
//! - 被 `detect/mod.rs` 导出
//! - 使用 `models/grid.rs`

use crate::error::{Result, XrfError};
use crate::models::Grid;

/// 最小-最大归一化到 [0, 1]
///
/// 非有限值写为 0；所有有限值相同时整张图为 0。
pub fn normalize_min_max(grid: &Grid) -> Result<Grid> {
    let (min, max) = grid.value_range().unwrap_or((0.0, 0.0));
    let span = max - min;

    let values = grid
        .values()
        .iter()
        .map(|&v| {
            if !v.is_finite() || span <= 0.0 {
                0.0
            } else {
                (v - min) / span
            }
        })
        .collect();

    Grid::new(grid.width(), grid.height(), values)
}

/// 一维高斯核，权重 exp(-(i-c)²/2σ²)，归一化使总和为 1
pub fn gaussian_kernel(size: usize, sigma: f64) -> Result<Vec<f64>> {
    if size == 0 || size % 2 == 0 {
        return Err(XrfError::InvalidArgument(format!(
            "kernel size must be a positive odd number, got {}",
            size
        )));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(XrfError::InvalidArgument(format!(
            "sigma must be positive, got {}",
            sigma
        )));
    }

    let center = (size / 2) as f64;
    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let d = i as f64 - center;
            (-d * d / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();

    Ok(weights.into_iter().map(|w| w / total).collect())
}

/// 可分离高斯模糊：先水平再垂直
pub fn gaussian_blur(grid: &Grid, size: usize, sigma: f64) -> Result<Grid> {
    let kernel = gaussian_kernel(size, sigma)?;
    let (width, height) = grid.dimensions();

    let horizontal = convolve(grid.values(), width, height, &kernel, true);
    let blurred = convolve(&horizontal, width, height, &kernel, false);

    Grid::new(width, height, blurred)
}

/// 沿一个方向卷积，越界的采样点视为 0
fn convolve(
    values: &[f64],
    width: usize,
    height: usize,
    kernel: &[f64],
    horizontal: bool,
) -> Vec<f64> {
    let half = (kernel.len() / 2) as i64;
    let mut out = vec![0.0; values.len()];

    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let offset = k as i64 - half;
                let (sx, sy) = if horizontal {
                    (x as i64 + offset, y as i64)
                } else {
                    (x as i64, y as i64 + offset)
                };
                if sx < 0 || sy < 0 || sx >= width as i64 || sy >= height as i64 {
                    continue;
                }
                let v = values[sy as usize * width + sx as usize];
                if v.is_finite() {
                    acc += weight * v;
                }
            }
            out[y * width + x] = acc;
        }
    }

    out
}
