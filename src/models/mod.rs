//! # 数据模型模块
//!
//! 定义计数网格与区域形状。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `sampling/`, `render/`, `detect/` 使用
//! - 子模块: grid, shape

pub mod grid;
pub mod shape;

pub use grid::Grid;
pub use shape::{ShapeDescriptor, ShapeKind};
