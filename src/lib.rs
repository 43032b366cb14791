//! # xrfcal - XRF 区域采样与标定工具
//!
//! 在 XRF 计数网格上定义圆形或（可旋转的）矩形区域，
//! 由已知负载量的参考区域拟合"计数 → 负载量"的线性标定曲线，
//! 并估计未知样本区域的负载量。
//!
//! ## 子命令
//! - `measure`   - 单个区域的覆盖单元数与平均计数
//! - `calibrate` - 标定与负载量估计（单文件或批量目录）
//! - `heatmap`   - 计数热图与区域叠加
//! - `preview`   - 自动检测预览（归一化 + 高斯模糊）
//!
//! ## 依赖关系
//! ```text
//! lib.rs (main.rs 仅为命令行入口)
//!   ├── cli/          (命令行参数定义)
//!   ├── commands/     (命令执行逻辑)
//!   │     ├── parsers/     (网格与区域布局解析)
//!   │     ├── session.rs   (样本集合、标定与报告)
//!   │     ├── sampling/    (形状掩膜、区域统计与缓存)
//!   │     ├── calibration/ (最小二乘拟合、估计、导出、绘图)
//!   │     ├── render/      (热图)
//!   │     ├── detect/      (预览滤波)
//!   │     └── models/      (网格与形状)
//!   ├── batch/        (批量并行处理)
//!   ├── utils/        (输出与进度条)
//!   └── error.rs      (错误处理)
//! ```

pub mod batch;
pub mod calibration;
pub mod cli;
pub mod commands;
pub mod detect;
pub mod error;
pub mod models;
pub mod parsers;
pub mod render;
pub mod sampling;
pub mod session;
pub mod utils;

pub use calibration::{Calibration, CalibrationCurve};
pub use error::{Result, XrfError};
pub use models::{Grid, ShapeDescriptor, ShapeKind};
pub use sampling::{Classification, RegionSample};
pub use session::{Session, SessionReport};
