//! # 区域统计
//!
//! 在掩膜覆盖的网格单元上累加计数并求平均。
//!
//! - 网格访问全部经过边界检查，超出网格的单元直接跳过
//! - 覆盖单元数为 0 时平均值为 None（正常状态，不是错误）
//! - 网格中的 NaN/Infinity 使平均值为 None
//!
//! ## 依赖关系
//! - 被 `sampling/region.rs` 调用
//! - 使用 `sampling/mask.rs`, `models/grid.rs`

use crate::models::{Grid, ShapeDescriptor};
use crate::sampling::ShapeMask;

/// 单个区域的统计结果
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionStats {
    /// 覆盖的网格单元数
    pub cells: usize,
    /// 平均计数
    pub mean: Option<f64>,
}

/// 计算形状在网格上的统计
pub fn region_stats(shape: &ShapeDescriptor, grid: &Grid) -> RegionStats {
    let mask = ShapeMask::new(*shape, grid.width(), grid.height());

    let mut sum = 0.0;
    let mut cells = 0usize;

    for (x, y) in mask.cells() {
        let Some(value) = grid.get(x as i64, y as i64) else {
            continue;
        };
        sum += value;
        cells += 1;
    }

    let mean = if cells > 0 {
        Some(sum / cells as f64).filter(|m| m.is_finite())
    } else {
        None
    };

    RegionStats { cells, mean }
}

/// 形状覆盖区域的平均计数
pub fn mean_count(shape: &ShapeDescriptor, grid: &Grid) -> Option<f64> {
    region_stats(shape, grid).mean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_grid_mean() {
        let shapes = [
            ShapeDescriptor::circle(10.0, 7.0, 4.5),
            ShapeDescriptor::rect(2.0, 3.0, 5.0, 6.0),
            ShapeDescriptor::rotated_rect(8.0, 2.0, 6.0, 4.0, 37.0),
            ShapeDescriptor::circle(0.0, 0.0, 3.0),
        ];

        // 可精确表示的值：累加无舍入，平均值严格相等
        for value in [10.0, 0.25] {
            let grid = Grid::filled(20, 15, value).unwrap();
            for shape in &shapes {
                let stats = region_stats(shape, &grid);
                assert!(stats.cells > 0);
                assert_eq!(stats.mean, Some(value), "{}", shape);
            }
        }

        let grid = Grid::filled(20, 15, 7.3).unwrap();
        for shape in &shapes {
            let mean = mean_count(shape, &grid).unwrap();
            assert!((mean - 7.3).abs() < 1e-12, "{}: {}", shape, mean);
        }
    }

    #[test]
    fn test_circle_scenario() {
        let grid = Grid::filled(5, 5, 10.0).unwrap();
        let stats = region_stats(&ShapeDescriptor::circle(2.0, 2.0, 1.0), &grid);
        assert_eq!(stats.cells, 5);
        assert_eq!(stats.mean, Some(10.0));
    }

    #[test]
    fn test_rect_scenario() {
        let grid = Grid::filled(5, 5, 10.0).unwrap();
        // 边界包含：x, y ∈ {0, 1, 2}
        let stats = region_stats(&ShapeDescriptor::rect(0.0, 0.0, 2.0, 2.0), &grid);
        assert_eq!(stats.cells, 9);
        assert_eq!(stats.mean, Some(10.0));

        let unit = region_stats(&ShapeDescriptor::rect(0.0, 0.0, 1.0, 1.0), &grid);
        assert_eq!(unit.cells, 4);
        assert_eq!(unit.mean, Some(10.0));
    }

    #[test]
    fn test_mean_weights_only_covered_cells() {
        let grid = Grid::from_rows(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap();
        let mean = mean_count(&ShapeDescriptor::rect(1.0, 1.0, 1.0, 1.0), &grid);
        assert_eq!(mean, Some((5.0 + 6.0 + 8.0 + 9.0) / 4.0));
    }

    #[test]
    fn test_region_past_edge_uses_in_bounds_cells() {
        let grid = Grid::from_rows(vec![vec![2.0, 4.0], vec![6.0, 8.0]]).unwrap();
        let stats = region_stats(&ShapeDescriptor::rect(1.0, 1.0, 10.0, 10.0), &grid);
        assert_eq!(stats.cells, 1);
        assert_eq!(stats.mean, Some(8.0));

        let outside = region_stats(&ShapeDescriptor::rect(-10.0, -10.0, 3.0, 3.0), &grid);
        assert_eq!(outside, RegionStats { cells: 0, mean: None });
    }

    #[test]
    fn test_non_finite_values_give_absent_mean() {
        let grid = Grid::new(3, 1, vec![1.0, f64::NAN, 1.0]).unwrap();
        assert_eq!(mean_count(&ShapeDescriptor::rect(0.0, 0.0, 2.0, 0.0), &grid), None);
        assert_eq!(
            mean_count(&ShapeDescriptor::rect(2.0, 0.0, 0.0, 0.0), &grid),
            Some(1.0)
        );
    }
}
