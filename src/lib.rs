//! # lsb_veil 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：位流编解码、AES 加密封装、
//! 像素载体读写以及 LSB 块统计分析。

// 声明库包含的所有模块。

pub mod analysis;
pub mod bitcodec;
pub mod cipher;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;
