//! # 形状掩膜
//!
//! 给定形状与网格尺寸，判断每个整数单元 (x, y) 是否落在形状内。
//!
//! ## 判定规则
//! - 圆：`(x-cx)² + (y-cy)² ≤ r²`，边界包含
//! - 矩形：平移到锚点后旋转 -θ 得到局部坐标 (xr, yr)，
//!   `0 ≤ xr ≤ w` 且 `0 ≤ yr ≤ h`，边界包含
//!
//! 掩膜是惰性谓词，只扫描形状包围盒与网格的交集，不分配 W×H 数组。
//!
//! ## 依赖关系
//! - 被 `sampling/region.rs` 和 `render/heatmap.rs` 使用
//! - 使用 `models/shape.rs`

use crate::models::ShapeDescriptor;

use std::ops::RangeInclusive;

/// 形状掩膜（惰性）
#[derive(Debug, Clone, Copy)]
pub struct ShapeMask {
    shape: ShapeDescriptor,
    width: usize,
    height: usize,
}

impl ShapeMask {
    pub fn new(shape: ShapeDescriptor, width: usize, height: usize) -> Self {
        Self {
            shape,
            width,
            height,
        }
    }

    pub fn shape(&self) -> &ShapeDescriptor {
        &self.shape
    }

    /// 单元 (x, y) 是否被覆盖；网格外的单元一律为 false
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && contains_point(&self.shape, x as f64, y as f64)
    }

    /// 迭代所有被覆盖的单元（行优先）
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (xs, ys) = self.scan_window();
        ys.flat_map(move |y| xs.clone().map(move |x| (x, y)))
            .filter(move |&(x, y)| contains_point(&self.shape, x as f64, y as f64))
    }

    /// 被覆盖单元数
    pub fn count(&self) -> usize {
        self.cells().count()
    }

    /// 包围盒与网格的交集（含端点）；为空时返回空区间
    fn scan_window(&self) -> (RangeInclusive<usize>, RangeInclusive<usize>) {
        let empty = (1..=0, 1..=0);
        if self.width == 0 || self.height == 0 || !self.shape.is_finite() {
            return empty;
        }

        let (min_x, min_y, max_x, max_y) = bounding_box(&self.shape);

        // 多扩一格，浮点误差交给精确判定处理
        let x0 = (min_x.floor() - 1.0).max(0.0);
        let y0 = (min_y.floor() - 1.0).max(0.0);
        let x1 = (max_x.ceil() + 1.0).min((self.width - 1) as f64);
        let y1 = (max_y.ceil() + 1.0).min((self.height - 1) as f64);

        if x1 < x0 || y1 < y0 {
            return empty;
        }

        (x0 as usize..=x1 as usize, y0 as usize..=y1 as usize)
    }
}

/// 点是否落在形状内（精确判定）
pub fn contains_point(shape: &ShapeDescriptor, px: f64, py: f64) -> bool {
    match *shape {
        ShapeDescriptor::Circle { cx, cy, r } => {
            let dx = px - cx;
            let dy = py - cy;
            dx * dx + dy * dy <= r * r
        }
        ShapeDescriptor::Rectangle {
            x,
            y,
            w,
            h,
            rotation_deg,
        } => {
            let dx = px - x;
            let dy = py - y;

            if rotation_deg == 0.0 {
                return (0.0..=w).contains(&dx) && (0.0..=h).contains(&dy);
            }

            let theta = rotation_deg.to_radians();
            let (sin, cos) = (-theta).sin_cos();
            let xr = dx * cos - dy * sin;
            let yr = dx * sin + dy * cos;

            (0.0..=w).contains(&xr) && (0.0..=h).contains(&yr)
        }
    }
}

/// 形状在网格坐标下的包围盒 (min_x, min_y, max_x, max_y)
pub fn bounding_box(shape: &ShapeDescriptor) -> (f64, f64, f64, f64) {
    match *shape {
        ShapeDescriptor::Circle { cx, cy, r } => {
            let r = r.abs();
            (cx - r, cy - r, cx + r, cy + r)
        }
        ShapeDescriptor::Rectangle {
            x,
            y,
            w,
            h,
            rotation_deg,
        } => {
            // 局部坐标的四个角旋转 +θ 回到网格坐标
            let (sin, cos) = rotation_deg.to_radians().sin_cos();
            let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];

            corners.iter().fold(
                (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
                |(lx, ly, hx, hy), &(cx, cy)| {
                    let gx = x + cx * cos - cy * sin;
                    let gy = y + cx * sin + cy * cos;
                    (lx.min(gx), ly.min(gy), hx.max(gx), hy.max(gy))
                },
            )
        }
    }
}
