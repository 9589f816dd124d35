//! # 命令处理逻辑模块
//!
//! 负责把命令行参数转换为解码选项、调用文件级流水线，
//! 并向用户报告结果。

use crate::cli::InvertArgs;
use crate::decode::DecodeOptions;
use crate::pipeline::invert_file;
use anyhow::{Context, Result};
use colored::Colorize;

/// 处理颜色反转的执行逻辑。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径及解码选项的 `InvertArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法打开输入图像。
/// * 输入不是有效的 24 位 BMP，或像素数据不完整。
/// * 图像尺寸过大，无法分配像素缓冲区。
/// * 无法创建或写入输出图像。
pub fn handle_invert(args: InvertArgs) -> Result<()> {
    let options = DecodeOptions {
        honor_row_order: args.honor_row_order,
        max_pixels: args.max_pixels,
    };

    let summary = invert_file(&args.input, &args.output, &options).with_context(|| {
        format!(
            "Unable to invert the colors of {} into {}",
            args.input.to_string_lossy().red().bold(),
            args.output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Success! The inverted {}x{} image has been saved: {}",
        summary.width,
        summary.height,
        args.output.to_string_lossy().green().bold()
    );

    Ok(())
}
