//! # 自动检测预览
//!
//! 为区域自动检测准备的预处理图像：
//! 1. 最小-最大归一化到 [0, 1]
//! 2. 可分离高斯模糊（边界外按 0 处理）
//!
//! 结果写成灰度 PNG，每个网格单元对应一个像素。
//!
//! ## 依赖关系
//! - 被 `commands/preview.rs` 调用
//! - 使用 `models/grid.rs`
//! - 使用 `plotters` 的 BitMapBackend 写 PNG

pub mod filter;
pub mod image;

pub use filter::{gaussian_blur, gaussian_kernel, normalize_min_max};
pub use image::write_grayscale_png;
