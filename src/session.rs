//! # 分析会话
//!
//! 持有一张网格和有序的区域样本列表，负责：
//! - 样本的增删与变更
//! - 并行计算所有样本的统计（每个样本只写自己的缓存）
//! - 从参考样本收集标定点并拟合
//! - 生成每个样本的报告（平均计数、估计负载量）
//!
//! 会话本身不触发任何重绘，调用方决定何时重新查询。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `sampling/`, `calibration/`, `models/`
//! - 使用 `rayon` 并行计算

use crate::calibration::{estimate_loading, fit_calibration, Calibration};
use crate::models::{Grid, ShapeDescriptor};
use crate::sampling::{Classification, RegionSample};

use rayon::prelude::*;

/// 单个样本的报告
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    /// 从 0 开始的序号
    pub index: usize,
    pub label: Option<String>,
    pub classification: Classification,
    pub shape: ShapeDescriptor,
    /// 覆盖的网格单元数
    pub cells: usize,
    pub mean_count: Option<f64>,
    pub known_loading: Option<f64>,
    pub estimated_loading: Option<f64>,
}

impl SampleReport {
    /// 显示名：标签或 "Reference 1" / "Sample 2"
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => match self.classification {
                Classification::Reference => format!("Reference {}", self.index + 1),
                Classification::Unknown => format!("Sample {}", self.index + 1),
            },
        }
    }
}

/// 会话报告
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub calibration: Calibration,
    pub samples: Vec<SampleReport>,
}

impl SessionReport {
    pub fn references(&self) -> impl Iterator<Item = &SampleReport> {
        self.samples
            .iter()
            .filter(|s| s.classification == Classification::Reference)
    }

    pub fn unknowns(&self) -> impl Iterator<Item = &SampleReport> {
        self.samples
            .iter()
            .filter(|s| s.classification == Classification::Unknown)
    }
}

/// 分析会话
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    samples: Vec<RegionSample>,
}

impl Session {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            samples: Vec::new(),
        }
    }

    pub fn with_samples(grid: Grid, samples: Vec<RegionSample>) -> Self {
        Self { grid, samples }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn samples(&self) -> &[RegionSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 添加样本，返回其序号
    pub fn add(&mut self, sample: RegionSample) -> usize {
        self.samples.push(sample);
        self.samples.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<RegionSample> {
        (index < self.samples.len()).then(|| self.samples.remove(index))
    }

    pub fn sample_mut(&mut self, index: usize) -> Option<&mut RegionSample> {
        self.samples.get_mut(index)
    }

    /// 更换分类（Unknown 会清除已知负载量）
    pub fn reclassify(&mut self, index: usize, classification: Classification) -> bool {
        let Some(slot) = self.samples.get_mut(index) else {
            return false;
        };
        *slot = slot.clone().with_classification(classification);
        true
    }

    pub fn set_known_loading(&mut self, index: usize, loading: Option<f64>) -> bool {
        match self.samples.get_mut(index) {
            Some(sample) => {
                sample.set_known_loading(loading);
                true
            }
            None => false,
        }
    }

    /// 更换网格；样本缓存以网格 id 为键，自动失效
    pub fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// 并行计算所有样本的统计
    pub fn refresh(&mut self) {
        let grid = &self.grid;
        self.samples.par_iter_mut().for_each(|sample| {
            sample.stats(grid);
        });
    }

    /// 所有可用的标定点 (平均计数, 已知负载量)
    pub fn reference_pairs(&mut self) -> Vec<(f64, f64)> {
        let grid = &self.grid;
        self.samples
            .iter_mut()
            .filter_map(|sample| sample.calibration_point(grid))
            .collect()
    }

    /// 由当前参考集拟合标定曲线
    pub fn calibration(&mut self) -> Calibration {
        fit_calibration(&self.reference_pairs())
    }

    /// 生成完整报告
    pub fn report(&mut self) -> SessionReport {
        self.refresh();
        let calibration = self.calibration();
        let curve = calibration.curve().copied();
        let grid = &self.grid;

        let samples = self
            .samples
            .iter_mut()
            .enumerate()
            .map(|(index, sample)| {
                let stats = sample.stats(grid);
                SampleReport {
                    index,
                    label: sample.label().map(str::to_string),
                    classification: sample.classification(),
                    shape: *sample.shape(),
                    cells: stats.cells,
                    mean_count: stats.mean,
                    known_loading: sample.known_loading(),
                    estimated_loading: estimate_loading(curve.as_ref(), stats.mean),
                }
            })
            .collect();

        SessionReport {
            calibration,
            samples,
        }
    }
}
