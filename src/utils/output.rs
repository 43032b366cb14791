//! # 美化输出工具
//!
//! 统一的终端输出样式，同时充当程序的日志层：
//! 状态信息写 stdout，错误写 stderr。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use crate::calibration::Calibration;

use colored::Colorize;
use std::path::Path;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印"文件已写出"消息
pub fn print_saved(what: &str, path: &Path) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        what,
        "->".cyan(),
        path.display()
    );
}

/// 打印标定状态：拟合成功为绿色，否则为黄色并给出原因
pub fn print_calibration(calibration: &Calibration) {
    match calibration.curve() {
        Some(curve) => {
            println!("{} {}", "[FIT]".green().bold(), calibration);
            if let Some(r2) = curve.r_squared() {
                println!("      {} {:.4}", "R²".dimmed(), r2);
            }
        }
        None => println!("{} {}", "[FIT]".yellow().bold(), calibration),
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
