//! # 颜色映射
//!
//! 在若干色标之间线性插值，把 [0, 1] 的比例映射到颜色。
//!
//! ## 依赖关系
//! - 被 `render/heatmap.rs` 使用
//! - 使用 `plotters` 的 RGBColor

use clap::ValueEnum;
use plotters::style::RGBColor;

/// 可选的颜色映射
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Cyan to magenta
    #[default]
    Cool,
    /// Black, red, yellow, white
    Hot,
    /// Black to white
    Gray,
}

const COOL: [RGBColor; 2] = [RGBColor(0, 255, 255), RGBColor(255, 0, 255)];
const HOT: [RGBColor; 4] = [
    RGBColor(0, 0, 0),
    RGBColor(230, 0, 0),
    RGBColor(255, 210, 0),
    RGBColor(255, 255, 255),
];
const GRAY: [RGBColor; 2] = [RGBColor(0, 0, 0), RGBColor(255, 255, 255)];

impl Colormap {
    pub fn stops(&self) -> &'static [RGBColor] {
        match self {
            Colormap::Cool => &COOL,
            Colormap::Hot => &HOT,
            Colormap::Gray => &GRAY,
        }
    }

    /// 比例 t（截断到 [0, 1]）对应的颜色
    pub fn color_at(&self, t: f64) -> RGBColor {
        gradient_lerp(self.stops(), t)
    }
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Cool => write!(f, "cool"),
            Colormap::Hot => write!(f, "hot"),
            Colormap::Gray => write!(f, "gray"),
        }
    }
}

fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// 两个颜色之间的线性插值
pub fn lerp_color(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let t = clamp_unit(t);
    RGBColor(
        lerp_channel(a.0, b.0, t),
        lerp_channel(a.1, b.1, t),
        lerp_channel(a.2, b.2, t),
    )
}

/// 在等间距色标之间插值
pub fn gradient_lerp(stops: &[RGBColor], t: f64) -> RGBColor {
    match stops {
        [] => RGBColor(0, 0, 0),
        [only] => *only,
        _ => {
            let t = clamp_unit(t);
            let segments = (stops.len() - 1) as f64;
            let scaled = t * segments;
            let i = (scaled.floor() as usize).min(stops.len() - 2);
            lerp_color(stops[i], stops[i + 1], scaled - i as f64)
        }
    }
}
