//! # calibrate 命令实现
//!
//! 将区域布局套用到计数网格上，拟合标定曲线并估计未知样本的负载量。
//!
//! ## 功能
//! - 支持单文件和批量目录处理（同一布局套用到每张网格）
//! - 并行计算（rayon）
//! - 导出结果 CSV，可选标定曲线图 (PNG/SVG)
//!
//! ## 依赖关系
//! - 使用 `cli/calibrate.rs` 定义的 CalibrateArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `session.rs` 与 `calibration/`

use super::{is_svg, load_grid, load_layout};
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::calibration::{export, plot};
use crate::cli::calibrate::CalibrateArgs;
use crate::error::{Result, XrfError};
use crate::parsers;
use crate::sampling::RegionSample;
use crate::session::{Session, SessionReport};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabled::{Table, Tabled};

/// 执行 calibrate 命令
pub fn execute(args: CalibrateArgs) -> Result<()> {
    output::print_header("XRF Calibration");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(XrfError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &CalibrateArgs) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let layout = load_layout(&args.regions)?;
    let grid = load_grid(&args.input, args.delimiter)?;

    let mut session = Session::with_samples(grid, layout.samples);
    let report = session.report();

    print_sample_table(&report);
    output::print_calibration(&report.calibration);

    export::to_csv(&report, &args.output)?;
    output::print_saved("Results", &args.output);

    if let Some(plot_path) = &args.plot {
        let title = title_for(&args.input);
        plot::generate_calibration_plot(
            &report,
            plot_path,
            &title,
            args.width,
            args.height,
            is_svg(plot_path),
        )?;
        output::print_saved("Calibration plot", plot_path);
    }

    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &CalibrateArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let layout = load_layout(&args.regions)?;

    let collector = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive);

    let files = collector.collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} grid files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| XrfError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = Arc::new(BatchCalibrationConfig {
        output_dir: args.output.clone(),
        samples: layout.samples,
        delimiter: args.delimiter,
        plot_ext: args.plot.as_deref().map(|p| {
            if is_svg(p) {
                "svg"
            } else {
                "png"
            }
        }),
        width: args.width,
        height: args.height,
        overwrite: args.overwrite,
    });

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Running with {} parallel jobs", runner.jobs()));
    let result = runner.run(files, |file| process_batch_file(file, &config))?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 批量处理配置
struct BatchCalibrationConfig {
    output_dir: PathBuf,
    /// 每张网格复用的区域布局
    samples: Vec<RegionSample>,
    delimiter: u8,
    plot_ext: Option<&'static str>,
    width: u32,
    height: u32,
    overwrite: bool,
}

/// 批量输出文件名：`<stem>_calibration.<ext>`
fn batch_output_path(output_dir: &Path, input: &Path, ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output_dir.join(format!("{}_calibration.{}", stem, ext))
}

/// 处理批量模式中的单个文件
fn process_batch_file(input: &PathBuf, config: &Arc<BatchCalibrationConfig>) -> ProcessResult {
    let output_file = batch_output_path(&config.output_dir, input, "csv");

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match calibrate_grid_file(input, &output_file, config) {
        Ok(_) => {
            ProcessResult::Success(format!("{} -> {}", input.display(), output_file.display()))
        }
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn calibrate_grid_file(input: &Path, output: &Path, config: &BatchCalibrationConfig) -> Result<()> {
    let grid = parsers::parse_grid_file(input, config.delimiter)?;
    let mut session = Session::with_samples(grid, config.samples.clone());
    let report = session.report();

    export::to_csv(&report, output)?;

    if let Some(ext) = config.plot_ext {
        let plot_path = batch_output_path(&config.output_dir, input, ext);
        plot::generate_calibration_plot(
            &report,
            &plot_path,
            &title_for(input),
            config.width,
            config.height,
            ext == "svg",
        )?;
    }

    Ok(())
}

fn title_for(input: &Path) -> String {
    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("grid");
    format!("Calibration: {}", name)
}

/// 表格中的单行
#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Sample")]
    name: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Shape")]
    shape: String,
    #[tabled(rename = "Cells")]
    cells: usize,
    #[tabled(rename = "Mean count")]
    mean: String,
    #[tabled(rename = "Known (µg/cm²)")]
    known: String,
    #[tabled(rename = "Estimated (µg/cm²)")]
    estimated: String,
}

fn format_optional(value: Option<f64>, missing: &str) -> String {
    value
        .map(|v| format!("{:.4}", v))
        .unwrap_or_else(|| missing.to_string())
}

/// 打印样本表格
fn print_sample_table(report: &SessionReport) {
    let rows: Vec<SampleRow> = report
        .samples
        .iter()
        .map(|s| SampleRow {
            index: s.index + 1,
            name: s.display_name(),
            class: s.classification.to_string(),
            shape: s.shape.to_string(),
            cells: s.cells,
            mean: format_optional(s.mean_count, "not calculated"),
            known: format_optional(s.known_loading, "-"),
            estimated: format_optional(s.estimated_loading, "-"),
        })
        .collect();

    if rows.is_empty() {
        output::print_warning("No regions defined");
        return;
    }

    output::print_header(&format!("{} Regions", rows.len()));
    println!("{}", Table::new(&rows));
}
