//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`extract` 和 `analyse` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::analysis::{BlockAverages, block_averages};
use crate::bitcodec::{assemble, decompose};
use crate::cipher::AesCipher;
use crate::cli::{AnalyseArgs, ExtractArgs, HideArgs};
use crate::constants::{EXTRACTED_SUFFIX, STEGO_SUFFIX};
use crate::steganography::{capacity, embed_bits, extract_bits};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像与载荷文件、加密载荷、把位流嵌入像素 LSB，
/// 最后将结果以 PNG 编码写入目标路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或载荷文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 载体容量不足以容纳加密后的载荷。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .unwrap_or_else(|| suffixed_path(&args.image, STEGO_SUFFIX, "png"));
    ensure_writable(&dest, args.force)?;

    let carrier = open_rgba(&args.image)?;
    let payload = fs::read(&args.payload).with_context(|| {
        format!(
            "Unable to read payload file: {}",
            args.payload.to_string_lossy().red().bold()
        )
    })?;

    let (width, height) = carrier.dimensions();
    println!(
        "Carrier: {} pixels, usable capacity: {} bytes.",
        format!("{width}x{height}").cyan(),
        capacity(&carrier).to_string().cyan()
    );

    let cipher = AesCipher::new(&args.password, args.mode);
    let sealed = cipher.encrypt(&payload);

    let bits = decompose(&sealed)?;
    let stego = embed_bits(&carrier, &bits).with_context(|| {
        format!(
            "Not enough space in the carrier image to hide {} bytes of encrypted payload.",
            sealed.len().to_string().red().bold()
        )
    })?;

    stego
        .save_with_format(&dest, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;

    println!(
        "The payload has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 负责读取隐写图像、按与嵌入相同的顺序收集 LSB、按长度头组装
/// 密文并解密，最后把载荷按原始字节写入目标文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 位流比长度头声明的要短 (图像可能不含隐藏数据)。
/// * 解密失败 (口令或链接模式与隐藏时不一致)。
/// * 无法写入到目标载荷文件。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| suffixed_path(&args.image, EXTRACTED_SUFFIX, "bin"));
    ensure_writable(&output, args.force)?;

    let stego = open_rgba(&args.image)?;

    let bits = extract_bits(&stego);
    let sealed = assemble(&bits).with_context(|| {
        format!(
            "Failed to recover a payload from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let cipher = AesCipher::new(&args.password, args.mode);
    let payload = cipher.decrypt(&sealed).with_context(|| {
        "Failed to decrypt the extracted payload. \nThe password or cipher mode may not match the ones used for hiding."
    })?;

    fs::write(&output, payload).with_context(|| {
        format!(
            "Unable to write to target payload file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The payload has been successfully extracted and saved: {}",
        output.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Analyse' 命令的执行逻辑。
///
/// 计算各通道的 LSB 块均值，在终端按通道渲染为迷你条形图，
/// 并在整体均值接近 0.5 时给出疑似隐写的提示。
///
/// # Errors
///
/// 无法读取输入的图像文件时返回错误。
pub fn handle_analyse(args: AnalyseArgs) -> Result<()> {
    let img = open_rgba(&args.image)?;
    let (width, height) = img.dimensions();
    println!(
        "Image: {} pixels, block size: {} LSBs.",
        format!("{width}x{height}").cyan(),
        args.block_size.to_string().cyan()
    );

    let averages = block_averages(&img, args.block_size);
    if averages.red.is_empty() {
        println!("The image contains no pixels to analyse.");
        return Ok(());
    }

    println!("{} {}", "R".red().bold(), sparkline(&averages.red));
    println!("{} {}", "G".green().bold(), sparkline(&averages.green));
    println!("{} {}", "B".blue().bold(), sparkline(&averages.blue));

    report_summary(&averages);

    Ok(())
}

/// 读取图像文件并转换为 RGBA 像素网格。
fn open_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .to_rgba8())
}

/// 目标文件已存在且未指定 `--force` 时拒绝覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 在输入文件名的主干后追加后缀，生成同目录下的默认输出路径。
fn suffixed_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}.{extension}"))
}

/// 把 [0,1] 区间的均值序列渲染为一行迷你条形图。
fn sparkline(values: &[f64]) -> String {
    const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    values
        .iter()
        .map(|&value| {
            let level = (value.clamp(0.0, 1.0) * 8.0).round() as usize;
            LEVELS[level.min(8)]
        })
        .collect()
}

/// 打印块数与整体均值，并标记接近 0.5 的通道。
fn report_summary(averages: &BlockAverages) {
    let overall = |means: &[f64]| means.iter().sum::<f64>() / means.len() as f64;
    let (r, g, b) = (
        overall(&averages.red),
        overall(&averages.green),
        overall(&averages.blue),
    );

    println!(
        "Blocks per channel: {}, mean LSB (R/G/B): {:.3}/{:.3}/{:.3}",
        averages.red.len().to_string().cyan(),
        r,
        g,
        b
    );

    if [r, g, b].iter().any(|mean| (mean - 0.5).abs() < 0.05) {
        println!(
            "{}",
            "LSB averages close to 0.5 suggest embedded random-looking data.".yellow()
        );
    }
}
