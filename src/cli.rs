//! # 命令行接口模块
//!
//! 使用 `clap` 定义程序的命令行参数。所有参数都有默认值，
//! 不带任何参数运行时读取 `./input.bmp` 并写出 `./output.bmp`。

use crate::constants::{DEFAULT_INPUT_PATH, DEFAULT_MAX_PIXELS, DEFAULT_OUTPUT_PATH};
use clap::{Args, Parser};
use std::path::PathBuf;

/// 一款用于反转未压缩 24 位 BMP 图像颜色的命令行工具。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款用于反转未压缩 24 位 BMP 图像颜色的命令行工具：读取 BMP，将每个像素的颜色通道取反，并写出新的 BMP 文件。"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: InvertArgs,
}

/// 颜色反转所需的参数。
#[derive(Args, Debug)]
pub struct InvertArgs {
    /// 输入的 24 位 BMP 图像路径。
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// 保存结果图像的输出路径。
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// 按 `height` 的符号解释行序，使内存中第 0 行始终为图像顶部。
    /// 输出文件的字节不受影响。
    #[arg(long)]
    pub honor_row_order: bool,

    /// 允许分配的最大像素数 (宽 * 高)。
    #[arg(long, default_value_t = DEFAULT_MAX_PIXELS)]
    pub max_pixels: u64,
}
