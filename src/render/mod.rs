//! # 渲染模块
//!
//! 计数网格热图与颜色映射。
//!
//! ## 依赖关系
//! - 被 `commands/heatmap.rs` 使用
//! - 使用 `plotters` 绘图
//! - 子模块: colormap, heatmap

pub mod colormap;
pub mod heatmap;

pub use colormap::{gradient_lerp, lerp_color, Colormap};
pub use heatmap::{generate_heatmap, HeatmapOptions};
