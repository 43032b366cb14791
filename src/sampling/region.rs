//! # 区域样本
//!
//! 一个区域样本 = 形状 + 分类（参考/未知）+ 可选的已知负载量 + 平均计数缓存。
//!
//! ## 缓存约定
//! 每次形状变更都会递增 `shape_version`。缓存以 `(shape_version, grid_id)`
//! 为键，只有与当前形状版本和所查询网格都一致时才会命中；
//! 因此形状变更或换用其他网格后的下一次读取一定会重新计算。
//!
//! ## 分类约定
//! `Unknown` 样本的已知负载量恒为 None，由 `with_classification` 保证。
//!
//! ## 依赖关系
//! - 被 `session.rs`, `parsers/regions.rs` 使用
//! - 使用 `sampling/stats.rs` 计算统计

use crate::models::{Grid, ShapeDescriptor, ShapeKind};
use crate::sampling::stats::{region_stats, RegionStats};

use serde::{Deserialize, Serialize};

/// 样本分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// 已知负载量的参考样本，参与标定
    #[serde(alias = "ref")]
    Reference,
    /// 待估计负载量的样本
    #[serde(alias = "sample")]
    Unknown,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Reference => write!(f, "reference"),
            Classification::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    shape_version: u64,
    grid_id: u64,
}

#[derive(Debug, Clone, Default)]
struct StatsCache {
    stats: RegionStats,
    key: Option<CacheKey>,
}

/// 区域样本
#[derive(Debug, Clone)]
pub struct RegionSample {
    label: Option<String>,
    shape: ShapeDescriptor,
    classification: Classification,
    known_loading: Option<f64>,
    shape_version: u64,
    cache: StatsCache,
}

impl RegionSample {
    /// 从已提交的形状创建样本（不做规范化）
    pub fn new(shape: ShapeDescriptor, classification: Classification) -> Self {
        Self {
            label: None,
            shape,
            classification,
            known_loading: None,
            shape_version: 0,
            cache: StatsCache::default(),
        }
    }

    /// 将绘制中的临时形状提交为样本
    ///
    /// 这是唯一执行规范化（负宽高翻转）的地方。
    pub fn commit(draft: ShapeDescriptor, classification: Classification) -> Self {
        Self::new(draft.normalized(), classification)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn shape(&self) -> &ShapeDescriptor {
        &self.shape
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn known_loading(&self) -> Option<f64> {
        self.known_loading
    }

    pub fn shape_version(&self) -> u64 {
        self.shape_version
    }

    pub fn is_reference(&self) -> bool {
        self.classification == Classification::Reference
    }

    /// 替换形状并使缓存失效
    pub fn set_shape(&mut self, shape: ShapeDescriptor) {
        self.shape = shape;
        self.shape_version += 1;
    }

    /// 平移（拖动）
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.set_shape(self.shape.translated(dx, dy));
    }

    /// 切换圆/矩形
    pub fn convert_shape(&mut self, kind: ShapeKind) {
        if self.shape.kind() != kind {
            self.set_shape(self.shape.converted_to(kind));
        }
    }

    /// 分类转换：转为 Unknown 时清除已知负载量
    ///
    /// 转为 Reference 时负载量保持 None，需要另行设置。
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        if classification == Classification::Unknown {
            self.known_loading = None;
        }
        self
    }

    /// 设置已知负载量（µg/cm²）；Unknown 样本忽略此调用
    pub fn with_known_loading(mut self, loading: Option<f64>) -> Self {
        self.set_known_loading(loading);
        self
    }

    pub fn set_known_loading(&mut self, loading: Option<f64>) {
        if self.is_reference() {
            self.known_loading = loading;
        }
    }

    /// 当前缓存是否对应当前形状与给定网格
    pub fn is_cache_valid(&self, grid: &Grid) -> bool {
        self.cache.key == Some(self.cache_key(grid))
    }

    /// 强制失效
    pub fn invalidate(&mut self) {
        self.cache.key = None;
    }

    /// 区域统计（命中缓存时不重新扫描）
    pub fn stats(&mut self, grid: &Grid) -> RegionStats {
        if !self.is_cache_valid(grid) {
            self.cache = StatsCache {
                stats: region_stats(&self.shape, grid),
                key: Some(self.cache_key(grid)),
            };
        }
        self.cache.stats
    }

    /// 平均计数
    pub fn mean_count(&mut self, grid: &Grid) -> Option<f64> {
        self.stats(grid).mean
    }

    /// 标定点 (平均计数, 已知负载量)
    ///
    /// 仅对有负载量且平均计数有效的参考样本返回 Some。
    pub fn calibration_point(&mut self, grid: &Grid) -> Option<(f64, f64)> {
        if !self.is_reference() {
            return None;
        }
        let loading = self.known_loading?;
        let count = self.mean_count(grid)?;
        Some((count, loading))
    }

    fn cache_key(&self, grid: &Grid) -> CacheKey {
        CacheKey {
            shape_version: self.shape_version,
            grid_id: grid.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_grid() -> Grid {
        // value = x + 10 * y
        let rows = (0..6)
            .map(|y| (0..6).map(|x| (x + 10 * y) as f64).collect())
            .collect();
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_commit_normalizes_drawn_rectangle() {
        let draft = ShapeDescriptor::rect(5.0, 1.0, -3.0, 2.0);
        let sample = RegionSample::commit(draft, Classification::Unknown);
        assert_eq!(*sample.shape(), ShapeDescriptor::rect(2.0, 1.0, 3.0, 2.0));
    }

    #[test]
    fn test_set_shape_does_not_normalize() {
        let mut sample =
            RegionSample::new(ShapeDescriptor::rect(0.0, 0.0, 1.0, 1.0), Classification::Unknown);
        let dragging = ShapeDescriptor::rect(4.0, 4.0, -2.0, -2.0);
        sample.set_shape(dragging);
        assert_eq!(*sample.shape(), dragging);
    }

    #[test]
    fn test_cache_hit_until_shape_changes() {
        let grid = gradient_grid();
        let mut sample = RegionSample::new(
            ShapeDescriptor::rect(0.0, 0.0, 1.0, 1.0),
            Classification::Unknown,
        );

        assert!(!sample.is_cache_valid(&grid));
        let first = sample.mean_count(&grid);
        assert!(sample.is_cache_valid(&grid));
        let second = sample.mean_count(&grid);
        assert_eq!(first, second);
        assert_eq!(first, Some((0.0 + 1.0 + 10.0 + 11.0) / 4.0));

        sample.translate(2.0, 2.0);
        assert!(!sample.is_cache_valid(&grid));
        let moved = sample.mean_count(&grid);
        assert_eq!(moved, Some((22.0 + 23.0 + 32.0 + 33.0) / 4.0));
        assert_ne!(first, moved);
        assert_eq!(sample.shape_version(), 1);
    }

    #[test]
    fn test_cache_is_keyed_on_grid() {
        let a = Grid::filled(4, 4, 1.0).unwrap();
        let b = Grid::filled(4, 4, 3.0).unwrap();
        let mut sample =
            RegionSample::new(ShapeDescriptor::circle(1.0, 1.0, 1.0), Classification::Unknown);

        assert_eq!(sample.mean_count(&a), Some(1.0));
        assert!(!sample.is_cache_valid(&b));
        assert_eq!(sample.mean_count(&b), Some(3.0));
        assert!(!sample.is_cache_valid(&a));
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let grid = gradient_grid();
        let mut sample =
            RegionSample::new(ShapeDescriptor::circle(2.0, 2.0, 0.0), Classification::Unknown);
        assert_eq!(sample.mean_count(&grid), Some(22.0));
        sample.invalidate();
        assert!(!sample.is_cache_valid(&grid));
        assert_eq!(sample.stats(&grid).cells, 1);
    }

    #[test]
    fn test_empty_region_mean_is_absent() {
        let grid = gradient_grid();
        let mut sample = RegionSample::new(
            ShapeDescriptor::circle(-20.0, -20.0, 2.0),
            Classification::Unknown,
        );
        assert_eq!(sample.mean_count(&grid), None);
        assert!(sample.is_cache_valid(&grid));
    }

    #[test]
    fn test_unknown_clears_loading() {
        let shape = ShapeDescriptor::circle(1.0, 1.0, 1.0);
        let sample = RegionSample::new(shape, Classification::Reference)
            .with_known_loading(Some(12.5));
        assert_eq!(sample.known_loading(), Some(12.5));

        let unknown = sample.with_classification(Classification::Unknown);
        assert_eq!(unknown.known_loading(), None);

        let back = unknown.with_classification(Classification::Reference);
        assert!(back.is_reference());
        assert_eq!(back.known_loading(), None);
    }

    #[test]
    fn test_loading_on_unknown_is_ignored() {
        let shape = ShapeDescriptor::circle(1.0, 1.0, 1.0);
        let sample =
            RegionSample::new(shape, Classification::Unknown).with_known_loading(Some(3.0));
        assert_eq!(sample.known_loading(), None);
    }

    #[test]
    fn test_reclassify_keeps_cache() {
        let grid = gradient_grid();
        let mut sample =
            RegionSample::new(ShapeDescriptor::circle(1.0, 1.0, 1.0), Classification::Unknown);
        sample.mean_count(&grid);
        let sample = sample.with_classification(Classification::Reference);
        assert!(sample.is_cache_valid(&grid));
    }

    #[test]
    fn test_calibration_point_requirements() {
        let grid = Grid::filled(5, 5, 4.0).unwrap();
        let shape = ShapeDescriptor::circle(2.0, 2.0, 1.0);

        let mut pending = RegionSample::new(shape, Classification::Reference);
        assert_eq!(pending.calibration_point(&grid), None);

        let mut ready = pending.clone().with_known_loading(Some(20.0));
        assert_eq!(ready.calibration_point(&grid), Some((4.0, 20.0)));

        let mut unknown = RegionSample::new(shape, Classification::Unknown);
        assert_eq!(unknown.calibration_point(&grid), None);

        let mut outside = RegionSample::new(
            ShapeDescriptor::circle(50.0, 50.0, 1.0),
            Classification::Reference,
        )
        .with_known_loading(Some(20.0));
        assert_eq!(outside.calibration_point(&grid), None);
    }

    #[test]
    fn test_convert_shape_bumps_version() {
        let mut sample =
            RegionSample::new(ShapeDescriptor::circle(1.0, 1.0, 2.0), Classification::Unknown);
        sample.convert_shape(ShapeKind::Circle);
        assert_eq!(sample.shape_version(), 0);
        sample.convert_shape(ShapeKind::Rect);
        assert_eq!(sample.shape_version(), 1);
        assert_eq!(*sample.shape(), ShapeDescriptor::rect(1.0, 1.0, 2.0, 2.0));
    }
}
