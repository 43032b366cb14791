//! # 标定曲线图
//!
//! 使用 `plotters` 绘制参考点、拟合直线以及未知样本的估计值。
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs` 调用
//! - 使用 `session.rs` 的 SessionReport
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, XrfError};
use crate::session::SessionReport;

use plotters::prelude::*;
use std::path::Path;

fn render_err<E: std::fmt::Debug>(e: E) -> XrfError {
    XrfError::RenderError(format!("{:?}", e))
}

/// 生成标定曲线图（PNG 或 SVG）
pub fn generate_calibration_plot(
    report: &SessionReport,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_calibration_chart(&root, report, title)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_calibration_chart(&root, report, title)?;
        root.present().map_err(render_err)?;
    }
    Ok(())
}

/// 坐标范围：覆盖所有点，留 10% 边距
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let span = if hi > lo { hi - lo } else { hi.abs().max(1.0) };
    ((lo - 0.1 * span).min(0.0), hi + 0.1 * span)
}

fn draw_calibration_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    report: &SessionReport,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(render_err)?;

    let references: Vec<(f64, f64)> = report
        .references()
        .filter_map(|s| Some((s.mean_count?, s.known_loading?)))
        .collect();
    let estimates: Vec<(f64, f64)> = report
        .unknowns()
        .filter_map(|s| Some((s.mean_count?, s.estimated_loading?)))
        .collect();

    let (x_min, x_max) = axis_range(references.iter().chain(&estimates).map(|p| p.0));
    let (y_min, y_max) = axis_range(references.iter().chain(&estimates).map(|p| p.1));

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Mean counts")
        .y_desc("Loading (µg/cm²)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(render_err)?;

    let fit_color = RGBColor(0, 102, 204);
    let reference_color = RGBColor(0, 150, 60);
    let unknown_color = RGBColor(200, 30, 30);

    if let Some(curve) = report.calibration.curve() {
        chart
            .draw_series(LineSeries::new(
                [x_min, x_max].map(|x| (x, curve.estimate(x))),
                fit_color.stroke_width(2),
            ))
            .map_err(render_err)?;
    }

    chart
        .draw_series(
            references
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, reference_color.filled())),
        )
        .map_err(render_err)?;

    chart
        .draw_series(
            estimates
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, unknown_color.stroke_width(2))),
        )
        .map_err(render_err)?;

    // 标定状态
    let status = report.calibration.to_string();
    root.draw(&Text::new(
        status,
        (40, 50),
        ("sans-serif", 14).into_font().color(&BLACK),
    ))
    .map_err(render_err)?;

    Ok(())
}
