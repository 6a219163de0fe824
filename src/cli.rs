//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::cipher::CipherMode;
use crate::constants::DEFAULT_BLOCK_SIZE;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或提取经 AES 加密的任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或提取经 AES 加密的任意文件，并可对图像做 LSB 块均值统计分析。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、extract (提取) 和 analyse (分析)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏加密后的载荷文件。
    Hide(HideArgs),

    /// 从经过隐写的图像中提取并解密隐藏的载荷。
    Extract(ExtractArgs),

    /// 按块统计图像各通道 LSB 的均值，用于发现疑似隐写区域。
    Analyse(AnalyseArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的载体图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的载荷文件路径，内容按原始字节处理。
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 用于派生加密密钥的口令。
    #[arg(short = 'k', long)]
    pub password: String,

    /// 加解密共用的块密码链接模式。
    #[arg(short, long, value_enum, default_value_t = CipherMode::Cfb)]
    pub mode: CipherMode,

    /// 隐写完成后保存结果图像的输出路径；省略时在输入图像旁生成。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已隐藏载荷的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 用于派生解密密钥的口令，必须与隐藏时一致。
    #[arg(short = 'k', long)]
    pub password: String,

    /// 加解密共用的块密码链接模式，必须与隐藏时一致。
    #[arg(short, long, value_enum, default_value_t = CipherMode::Cfb)]
    pub mode: CipherMode,

    /// 提取出的载荷保存路径；省略时在输入图像旁生成。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'analyse' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct AnalyseArgs {
    /// 待分析的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 每块包含的 LSB 个数。
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: NonZeroUsize,
}
