use lsb_veil::cipher::{AesCipher, CipherMode};
use lsb_veil::error::StegoError;

/// 验证两种链接模式在各填充边界长度上的加解密往返
#[test]
fn test_roundtrip_at_padding_boundaries() {
    for mode in [CipherMode::Cfb, CipherMode::Cbc] {
        let cipher = AesCipher::new("round trip password", mode);

        // 0、1、块大小-1、块大小、块大小+1
        for len in [0usize, 1, 15, 16, 17] {
            let plaintext: Vec<u8> = (0..len).map(|i| (i * 37) as u8).collect();
            let sealed = cipher.encrypt(&plaintext);
            let recovered = cipher.decrypt(&sealed).unwrap();
            assert_eq!(
                recovered, plaintext,
                "{mode:?} must round-trip a {len}-byte plaintext"
            );
        }
    }
}

/// 验证随机 IV 使同一明文两次加密的输出不同，但都能解密
#[test]
fn test_fresh_iv_per_encryption() {
    let cipher = AesCipher::new("iv password", CipherMode::Cfb);
    let plaintext = b"the same message twice";

    let first = cipher.encrypt(plaintext);
    let second = cipher.encrypt(plaintext);

    assert_ne!(first, second);
    assert_eq!(cipher.decrypt(&first).unwrap(), plaintext);
    assert_eq!(cipher.decrypt(&second).unwrap(), plaintext);
}

/// 验证错误口令无法还原明文
#[test]
fn test_wrong_password_fails_or_garbles() {
    let encryptor = AesCipher::new("alpha", CipherMode::Cbc);
    let decryptor = AesCipher::new("beta", CipherMode::Cbc);
    let plaintext = b"secret bytes \x00\xff\x80";

    let sealed = encryptor.encrypt(plaintext);

    // 错误的密钥几乎总是触发填充错误；即使侥幸通过，输出也不等于明文
    match decryptor.decrypt(&sealed) {
        Err(_) => {}
        Ok(recovered) => assert_ne!(recovered, plaintext),
    }
}

/// 验证加解密两端模式不一致时无法还原明文
#[test]
fn test_mode_mismatch_fails_or_garbles() {
    let encryptor = AesCipher::new("shared", CipherMode::Cfb);
    let decryptor = AesCipher::new("shared", CipherMode::Cbc);
    let plaintext = b"mode mismatch probe";

    let sealed = encryptor.encrypt(plaintext);

    match decryptor.decrypt(&sealed) {
        Err(_) => {}
        Ok(recovered) => assert_ne!(recovered, plaintext),
    }
}

/// 验证非 base64 输入被识别为损坏的密文
#[test]
fn test_decrypt_rejects_invalid_base64() {
    let cipher = AesCipher::new("pw", CipherMode::Cfb);
    let err = cipher.decrypt(b"definitely *not* base64!").unwrap_err();
    assert!(matches!(err, StegoError::MalformedCiphertext(_)));
}

/// 验证不足一个块的密文被识别为损坏
#[test]
fn test_decrypt_rejects_short_input() {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    let cipher = AesCipher::new("pw", CipherMode::Cfb);
    let sealed = STANDARD.encode([0u8; 10]).into_bytes();
    let err = cipher.decrypt(&sealed).unwrap_err();
    assert!(matches!(err, StegoError::MalformedCiphertext(_)));
}

/// 验证 CBC 模式下密文长度不是块整数倍时被识别为损坏
#[test]
fn test_cbc_rejects_misaligned_ciphertext() {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    let cipher = AesCipher::new("pw", CipherMode::Cbc);
    // 16 字节 IV 之后跟 5 个散落字节
    let sealed = STANDARD.encode([0u8; 21]).into_bytes();
    let err = cipher.decrypt(&sealed).unwrap_err();
    assert!(matches!(err, StegoError::MalformedCiphertext(_)));
}

/// 验证被篡改的填充区触发填充错误
#[test]
fn test_tampered_padding_is_detected() {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    let cipher = AesCipher::new("pw", CipherMode::Cfb);
    let sealed = cipher.encrypt(b"tamper target");

    // CFB 下翻转密文末字节会等位翻转明文末字节，破坏填充长度字节
    let mut raw = STANDARD.decode(&sealed).unwrap();
    let last = raw.len() - 1;
    raw[last] ^= 0x04;
    let tampered = STANDARD.encode(raw).into_bytes();

    let err = cipher.decrypt(&tampered).unwrap_err();
    assert!(matches!(err, StegoError::InvalidPadding));
}
