//! # 解析器模块
//!
//! 读取计数网格与区域布局文件。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 与 `sampling/`
//! - 子模块: grid, regions

pub mod grid;
pub mod regions;

pub use grid::{parse_grid_content, parse_grid_file, DEFAULT_DELIMITER};
pub use regions::{parse_regions_content, parse_regions_file, RegionLayout};
