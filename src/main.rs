use clap::Parser;

use bmp_invert::{cli::Cli, handler::handle_invert};

/// 程序的主入口点
///
/// 负责解析命令行参数，并将执行交给颜色反转的处理函数。
/// 失败时错误信息输出到标准错误，进程以非零状态退出。
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    handle_invert(cli.args)
}
