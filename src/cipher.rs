//! # 加密封装模块
//!
//! 在载荷进入位流编码之前对其做 AES-256 对称加密，提取后再解密。
//! 链接模式 (CFB 或 CBC) 是一个贯穿加解密两端的配置值，
//! 密钥由调用方口令经 PBKDF2-HMAC-SHA256 派生。
//! 输出格式为 `base64(IV ‖ 密文)`，填充采用字节值等于填充长度的 PKCS#7。

use crate::error::StegoError;
use aes::Aes256;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::NoPadding};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use cfb_mode::cipher::AsyncStreamCipher;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

/// AES 块大小 (字节)，同时也是 IV 的长度。
pub const BLOCK_SIZE: usize = 16;

/// 密钥派生使用的固定应用盐。
/// 盐是编译期常量，提取端只需口令即可重建同一把密钥。
const KDF_SALT: &[u8] = b"lsb_veil/kdf/v1";

/// PBKDF2 迭代次数。
const KDF_ITERATIONS: u32 = 100_000;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type Aes256CfbEnc = cfb_mode::Encryptor<Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<Aes256>;

/// 块密码链接模式。加密与解密共用同一个值。
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CipherMode {
    /// 密文反馈模式，按字节流式处理。
    Cfb,
    /// 密码块链接模式，要求密文长度为块大小的整数倍。
    Cbc,
}

/// 持有派生密钥与链接模式的 AES-256 加密器。
pub struct AesCipher {
    key: [u8; 32],
    mode: CipherMode,
}

impl AesCipher {
    /// 由调用方口令派生密钥并绑定链接模式。
    pub fn new(password: &str, mode: CipherMode) -> Self {
        let mut key = [0u8; 32];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut key);
        Self { key, mode }
    }

    /// 加密载荷，返回 `base64(IV ‖ 密文)` 的字节形式。
    ///
    /// 无论哪种模式都先做 PKCS#7 填充，IV 每次调用随机生成，
    /// 因此同一明文两次加密的输出并不相同。
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let padded = pad(plaintext);

        let mut iv = [0u8; BLOCK_SIZE];
        rand::rng().fill_bytes(&mut iv);

        let ciphertext = match self.mode {
            CipherMode::Cfb => {
                let mut buffer = padded;
                Aes256CfbEnc::new(&self.key.into(), &iv.into()).encrypt(&mut buffer);
                buffer
            }
            CipherMode::Cbc => Aes256CbcEnc::new(&self.key.into(), &iv.into())
                .encrypt_padded_vec_mut::<NoPadding>(&padded),
        };

        let mut sealed = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        sealed.extend_from_slice(&iv);
        sealed.extend_from_slice(&ciphertext);

        STANDARD.encode(sealed).into_bytes()
    }

    /// 解密 `encrypt` 的输出，返回原始载荷。
    ///
    /// # Errors
    ///
    /// * [`StegoError::MalformedCiphertext`] — base64 无法解码、
    ///   数据不足一个块、或 CBC 密文长度不是块大小的整数倍。
    /// * [`StegoError::InvalidPadding`] — 填充字节不合法，
    ///   通常意味着口令或链接模式与加密端不一致。
    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, StegoError> {
        let raw = STANDARD
            .decode(sealed)
            .map_err(|_| StegoError::MalformedCiphertext("not valid base64"))?;

        if raw.len() < BLOCK_SIZE {
            return Err(StegoError::MalformedCiphertext(
                "shorter than one cipher block",
            ));
        }
        let (iv, body) = raw.split_at(BLOCK_SIZE);

        let padded = match self.mode {
            CipherMode::Cfb => {
                let mut buffer = body.to_vec();
                Aes256CfbDec::new_from_slices(&self.key, iv)
                    .map_err(|_| StegoError::MalformedCiphertext("invalid IV length"))?
                    .decrypt(&mut buffer);
                buffer
            }
            CipherMode::Cbc => {
                if body.len() % BLOCK_SIZE != 0 {
                    return Err(StegoError::MalformedCiphertext(
                        "ciphertext length is not a multiple of the block size",
                    ));
                }
                Aes256CbcDec::new_from_slices(&self.key, iv)
                    .map_err(|_| StegoError::MalformedCiphertext("invalid IV length"))?
                    .decrypt_padded_vec_mut::<NoPadding>(body)
                    .map_err(|_| StegoError::InvalidPadding)?
            }
        };

        unpad(&padded)
    }
}

/// 按 PKCS#7 规则把字节缓冲补齐到块大小的整数倍。
/// 填充值等于填充字节数；整块对齐的输入也会追加一个完整填充块。
fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut padded = data.to_vec();
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// 校验并剥离 PKCS#7 填充。
/// 尾字节为 0、超过块大小、超过缓冲长度或填充区不一致均视为非法。
fn unpad(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let &last = data.last().ok_or(StegoError::InvalidPadding)?;
    let pad_len = last as usize;

    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > data.len() {
        return Err(StegoError::InvalidPadding);
    }

    let (body, tail) = data.split_at(data.len() - pad_len);
    if tail.iter().any(|&byte| byte != last) {
        return Err(StegoError::InvalidPadding);
    }

    Ok(body.to_vec())
}
