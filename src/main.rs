//! # xrfcal 命令行入口
//!
//! 解析参数后交给 `commands::run`，错误统一打印并以状态码 1 退出。

use clap::Parser;
use xrfcal::cli::Cli;
use xrfcal::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
