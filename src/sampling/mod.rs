//! # 区域采样模块
//!
//! 形状掩膜、区域统计与带缓存的区域样本。
//!
//! ## 子模块
//! - `mask`: 形状掩膜（惰性谓词）
//! - `stats`: 掩膜覆盖区域的平均计数
//! - `region`: 区域样本及其版本化缓存
//!
//! ## 依赖关系
//! - 被 `session.rs`, `parsers/regions.rs`, `render/` 使用
//! - 使用 `models/`

pub mod mask;
pub mod region;
pub mod stats;

pub use mask::ShapeMask;
pub use region::{Classification, RegionSample};
pub use stats::{mean_count, region_stats, RegionStats};
