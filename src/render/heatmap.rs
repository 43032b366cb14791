//! # 计数热图
//!
//! 把网格按颜色映射绘制成图像，并叠加区域样本：
//! 参考样本覆盖的单元染为绿色，未知样本染为红色，
//! 每个区域标注从 1 开始的序号。
//!
//! ## 依赖关系
//! - 被 `commands/heatmap.rs` 调用
//! - 使用 `models/grid.rs`, `sampling/mask.rs`
//! - 使用 `plotters` 渲染 (PNG/SVG)

use super::colormap::Colormap;
use crate::error::{Result, XrfError};
use crate::models::Grid;
use crate::sampling::{Classification, RegionSample, ShapeMask};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

fn render_err<E: std::fmt::Debug>(e: E) -> XrfError {
    XrfError::RenderError(format!("{:?}", e))
}

/// 热图选项
#[derive(Debug, Clone, Copy)]
pub struct HeatmapOptions {
    pub colormap: Colormap,
    /// 每个网格单元的像素边长
    pub cell_size: u32,
    /// 是否标注区域序号
    pub labels: bool,
    pub use_svg: bool,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            colormap: Colormap::Cool,
            cell_size: 8,
            labels: true,
            use_svg: false,
        }
    }
}

/// 数值在 [min, max] 中的比例；区间为空或数值非有限时为 0
pub fn value_ratio(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if !value.is_finite() || !span.is_finite() || span <= 0.0 {
        return 0.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// 每个单元的颜色（行优先）
pub fn cell_colors(grid: &Grid, colormap: Colormap) -> Vec<RGBColor> {
    let (min, max) = grid.value_range().unwrap_or((0.0, 0.0));
    grid.values()
        .iter()
        .map(|&v| colormap.color_at(value_ratio(v, min, max)))
        .collect()
}

fn overlay_color(classification: Classification) -> RGBColor {
    match classification {
        Classification::Reference => RGBColor(0, 170, 60),
        Classification::Unknown => RGBColor(220, 30, 30),
    }
}

/// 生成热图（PNG 或 SVG）
pub fn generate_heatmap(
    grid: &Grid,
    samples: &[RegionSample],
    output_path: &Path,
    options: &HeatmapOptions,
) -> Result<()> {
    if options.cell_size == 0 {
        return Err(XrfError::InvalidArgument(
            "cell size must be at least 1 pixel".to_string(),
        ));
    }

    let scale = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(options.cell_size))
            .ok_or_else(|| {
                XrfError::InvalidArgument(format!(
                    "canvas too large: {}x{} cells at {} px per cell",
                    grid.width(),
                    grid.height(),
                    options.cell_size
                ))
            })
    };
    let size = (scale(grid.width())?, scale(grid.height())?);

    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_heatmap(&root, grid, samples, options)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_heatmap(&root, grid, samples, options)?;
        root.present().map_err(render_err)?;
    }
    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    grid: &Grid,
    samples: &[RegionSample],
    options: &HeatmapOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let cell = options.cell_size as i32;
    let square = |x: usize, y: usize| {
        let (px, py) = (x as i32 * cell, y as i32 * cell);
        [(px, py), (px + cell, py + cell)]
    };

    root.fill(&WHITE).map_err(render_err)?;

    let width = grid.width();
    for (i, color) in cell_colors(grid, options.colormap).into_iter().enumerate() {
        let corners = square(i % width, i / width);
        root.draw(&Rectangle::new(corners, color.filled()))
            .map_err(render_err)?;
    }

    for (index, sample) in samples.iter().enumerate() {
        let mask = ShapeMask::new(*sample.shape(), grid.width(), grid.height());
        let tint = overlay_color(sample.classification()).mix(0.45);

        let mut count = 0usize;
        let (mut sum_x, mut sum_y) = (0usize, 0usize);
        for (x, y) in mask.cells() {
            root.draw(&Rectangle::new(square(x, y), tint.filled()))
                .map_err(render_err)?;
            count += 1;
            sum_x += x;
            sum_y += y;
        }

        // 区域完全在网格外时不标注
        if !options.labels || count == 0 {
            continue;
        }

        let cx = ((sum_x as f64 / count as f64 + 0.5) * cell as f64) as i32;
        let cy = ((sum_y as f64 / count as f64 + 0.5) * cell as f64) as i32;
        let font_size = (cell * 2).clamp(10, 24);
        root.draw(&Text::new(
            (index + 1).to_string(),
            (cx, cy),
            ("sans-serif", font_size)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))
        .map_err(render_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShapeDescriptor;

    #[test]
    fn test_value_ratio() {
        assert_eq!(value_ratio(5.0, 0.0, 10.0), 0.5);
        assert_eq!(value_ratio(0.0, 0.0, 10.0), 0.0);
        assert_eq!(value_ratio(10.0, 0.0, 10.0), 1.0);
        assert_eq!(value_ratio(3.0, 3.0, 3.0), 0.0);
        assert_eq!(value_ratio(f64::NAN, 0.0, 10.0), 0.0);
    }

    #[test]
    fn test_cell_colors_span_colormap() {
        let grid = Grid::from_rows(vec![vec![0.0, 5.0, 10.0]]).unwrap();
        let colors = cell_colors(&grid, Colormap::Gray);
        assert_eq!(
            colors,
            vec![
                RGBColor(0, 0, 0),
                RGBColor(128, 128, 128),
                RGBColor(255, 255, 255)
            ]
        );
    }

    #[test]
    fn test_cell_colors_ignore_non_finite() {
        let grid = Grid::from_rows(vec![vec![2.0, f64::NAN, 4.0]]).unwrap();
        let colors = cell_colors(&grid, Colormap::Gray);
        assert_eq!(colors[1], RGBColor(0, 0, 0));
        assert_eq!(colors[2], RGBColor(255, 255, 255));
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let grid = Grid::filled(2, 2, 1.0).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let options = HeatmapOptions {
            cell_size: 0,
            ..Default::default()
        };
        let result = generate_heatmap(&grid, &[], &dir.path().join("map.svg"), &options);
        assert!(matches!(result, Err(XrfError::InvalidArgument(_))));
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        // 2 * u32::MAX 溢出 u32
        let grid = Grid::filled(2, 1, 0.0).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        let options = HeatmapOptions {
            cell_size: u32::MAX,
            ..Default::default()
        };
        let result = generate_heatmap(&grid, &[], &path, &options);
        assert!(matches!(result, Err(XrfError::InvalidArgument(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_generate_svg_heatmap() {
        let grid = Grid::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let samples = vec![
            RegionSample::new(
                ShapeDescriptor::circle(1.0, 1.0, 1.0),
                Classification::Reference,
            ),
            RegionSample::new(
                ShapeDescriptor::rect(20.0, 20.0, 1.0, 1.0),
                Classification::Unknown,
            ),
        ];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        let options = HeatmapOptions {
            labels: false,
            use_svg: true,
            ..Default::default()
        };
        generate_heatmap(&grid, &samples, &path, &options).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<rect"));
    }
}
