//! # 标定模块
//!
//! 从参考样本拟合计数 → 负载量的线性标定，并估计未知样本。
//!
//! ## 子模块
//! - `fit`: 普通最小二乘拟合
//! - `estimate`: 负载量估计
//! - `plot`: 标定曲线图
//! - `export`: 结果导出
//!
//! ## 依赖关系
//! - 被 `session.rs`, `commands/calibrate.rs` 使用

pub mod estimate;
pub mod export;
pub mod fit;
pub mod plot;

pub use estimate::estimate_loading;
pub use fit::{fit_calibration, Calibration, CalibrationCurve};
