//! # XRF 计数网格
//!
//! 不可变的二维计数数组（行优先，原点在左上角）。
//!
//! 每个网格在构造时获得进程内唯一的 `id`，区域样本的缓存以
//! `(形状版本, 网格 id)` 为键，切换网格即自动失效。
//!
//! ## 依赖关系
//! - 被 `parsers/grid.rs` 构造
//! - 被 `sampling/`, `session.rs`, `render/`, `detect/` 读取

use crate::error::{Result, XrfError};

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRID_ID: AtomicU64 = AtomicU64::new(1);

/// XRF 计数网格
#[derive(Debug, Clone)]
pub struct Grid {
    id: u64,
    width: usize,
    height: usize,
    /// 行优先存储，长度 = width * height
    values: Vec<f64>,
}

impl Grid {
    /// 从行优先的扁平数组创建网格
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(XrfError::InvalidGrid(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            XrfError::InvalidGrid(format!("dimensions {}x{} overflow", width, height))
        })?;
        if values.len() != expected {
            return Err(XrfError::InvalidGrid(format!(
                "expected {} values for {}x{}, got {}",
                expected,
                width,
                height,
                values.len()
            )));
        }

        Ok(Self {
            id: NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            values,
        })
    }

    /// 从行列表创建网格（所有行长度必须一致）
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(XrfError::InvalidGrid(format!(
                "row {} has {} columns, expected {}",
                idx + 1,
                row.len(),
                width
            )));
        }

        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// 创建常数网格
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self> {
        Self::new(width, height, vec![value; width.saturating_mul(height)])
    }

    /// 网格标识
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// 带边界检查的取值；网格外的坐标返回 None
    pub fn get(&self, x: i64, y: i64) -> Option<f64> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(y * self.width + x).copied()
    }

    /// 行优先的原始数据
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 按行迭代
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.width)
    }

    /// 有限值的 (最小值, 最大值)；全部非有限时返回 None
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
