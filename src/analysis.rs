//! # 块统计分析模块
//!
//! 把载体的 LSB 流按通道拆开，再按固定大小分块求均值。
//! 隐藏了加密数据的区域均值会集中在 0.5 附近 (随机位)，
//! 未改动的自然图像区域则通常偏离 0.5。

use crate::steganography::extract_bits;
use image::RgbaImage;
use std::num::NonZeroUsize;

/// 三个颜色通道各自的块均值序列，每个均值都落在 [0.0, 1.0]。
#[derive(Debug, Default)]
pub struct BlockAverages {
    pub red: Vec<f64>,
    pub green: Vec<f64>,
    pub blue: Vec<f64>,
}

/// 计算每个通道的 LSB 块均值。
///
/// 消费与提取路径相同的 LSB 流，按 R、G、B 交错顺序拆分出
/// 三条通道流，每 `block_size` 个位为一块 (末块允许不足)。
/// 空图像得到空结果。
pub fn block_averages(img: &RgbaImage, block_size: NonZeroUsize) -> BlockAverages {
    let bits = extract_bits(img);

    let mut red = Vec::with_capacity(bits.len() / 3);
    let mut green = Vec::with_capacity(bits.len() / 3);
    let mut blue = Vec::with_capacity(bits.len() / 3);

    for pixel in bits.chunks_exact(3) {
        red.push(pixel[0]);
        green.push(pixel[1]);
        blue.push(pixel[2]);
    }

    BlockAverages {
        red: block_means(&red, block_size),
        green: block_means(&green, block_size),
        blue: block_means(&blue, block_size),
    }
}

/// 对单条位流按块求算术平均。
fn block_means(bits: &[u8], block_size: NonZeroUsize) -> Vec<f64> {
    bits.chunks(block_size.get())
        .map(|block| block.iter().map(|&bit| f64::from(bit)).sum::<f64>() / block.len() as f64)
        .collect()
}
