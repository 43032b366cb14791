//! # 区域形状描述
//!
//! 圆形与（可旋转的）矩形两种区域形状，坐标单位为网格单元。
//!
//! 矩形的 `(x, y)` 是未旋转时的锚点角，旋转围绕该角进行（而非中心）。
//! 交互绘制过程中矩形的宽高可能为负，只在提交时规范化一次。
//!
//! ## 依赖关系
//! - 被 `sampling/`, `parsers/regions.rs`, `render/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 形状类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    #[serde(alias = "rectangle")]
    Rect,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Rect => write!(f, "rect"),
        }
    }
}

/// 区域形状
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeDescriptor {
    /// 圆心 (cx, cy)，半径 r
    Circle { cx: f64, cy: f64, r: f64 },
    /// 锚点角 (x, y)，宽高 (w, h)，绕锚点旋转 rotation_deg 度
    Rectangle {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        rotation_deg: f64,
    },
}

impl ShapeDescriptor {
    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        ShapeDescriptor::Circle { cx, cy, r }
    }

    /// 轴对齐矩形
    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::rotated_rect(x, y, w, h, 0.0)
    }

    pub fn rotated_rect(x: f64, y: f64, w: f64, h: f64, rotation_deg: f64) -> Self {
        ShapeDescriptor::Rectangle {
            x,
            y,
            w,
            h,
            rotation_deg,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeDescriptor::Circle { .. } => ShapeKind::Circle,
            ShapeDescriptor::Rectangle { .. } => ShapeKind::Rect,
        }
    }

    /// 提交时的规范化：负宽高翻转到正方向（x += w, w = |w|，h/y 同理），
    /// 负半径取绝对值
    pub fn normalized(self) -> Self {
        match self {
            ShapeDescriptor::Circle { cx, cy, r } => ShapeDescriptor::Circle {
                cx,
                cy,
                r: r.abs(),
            },
            ShapeDescriptor::Rectangle {
                mut x,
                mut y,
                mut w,
                mut h,
                rotation_deg,
            } => {
                if w < 0.0 {
                    x += w;
                    w = w.abs();
                }
                if h < 0.0 {
                    y += h;
                    h = h.abs();
                }
                ShapeDescriptor::Rectangle {
                    x,
                    y,
                    w,
                    h,
                    rotation_deg,
                }
            }
        }
    }

    /// 平移（拖动）
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        match self {
            ShapeDescriptor::Circle { cx, cy, r } => ShapeDescriptor::Circle {
                cx: cx + dx,
                cy: cy + dy,
                r,
            },
            ShapeDescriptor::Rectangle {
                x,
                y,
                w,
                h,
                rotation_deg,
            } => ShapeDescriptor::Rectangle {
                x: x + dx,
                y: y + dy,
                w,
                h,
                rotation_deg,
            },
        }
    }

    /// 切换形状类别，保留锚点
    ///
    /// 圆 → 矩形：w = h = r；矩形 → 圆：r = √(w² + h²)。
    pub fn converted_to(self, kind: ShapeKind) -> Self {
        match (self, kind) {
            (ShapeDescriptor::Circle { cx, cy, r }, ShapeKind::Rect) => {
                ShapeDescriptor::rect(cx, cy, r, r)
            }
            (ShapeDescriptor::Rectangle { x, y, w, h, .. }, ShapeKind::Circle) => {
                ShapeDescriptor::circle(x, y, w.hypot(h))
            }
            (same, _) => same,
        }
    }

    /// 几何参数是否全部为有限值
    pub fn is_finite(&self) -> bool {
        match *self {
            ShapeDescriptor::Circle { cx, cy, r } => {
                cx.is_finite() && cy.is_finite() && r.is_finite()
            }
            ShapeDescriptor::Rectangle {
                x,
                y,
                w,
                h,
                rotation_deg,
            } => {
                x.is_finite()
                    && y.is_finite()
                    && w.is_finite()
                    && h.is_finite()
                    && rotation_deg.is_finite()
            }
        }
    }
}

impl std::fmt::Display for ShapeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ShapeDescriptor::Circle { cx, cy, r } => {
                write!(f, "circle ({:.1}, {:.1}) r={:.2}", cx, cy, r)
            }
            ShapeDescriptor::Rectangle {
                x,
                y,
                w,
                h,
                rotation_deg,
            } => {
                write!(f, "rect ({:.1}, {:.1}) {:.1}x{:.1}", x, y, w, h)?;
                if rotation_deg != 0.0 {
                    write!(f, " @{:.1}°", rotation_deg)?;
                }
                Ok(())
            }
        }
    }
}
