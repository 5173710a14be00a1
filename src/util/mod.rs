//! util - общие хелперы форматтеров и CLI.
//!
//! Содержит:
//! - hex_dump(): дамп байтов по 16 в строке со смещением и ASCII-колонкой.
//! - to_hex(): компактная hex-строка.
//! - b64(): base64 (standard) для байтовых payload.
//! - blob_file_name(): безопасное имя `<key>.bin` для side-файлов.
//! - read_image(): чтение образа раздела целиком.

use anyhow::{Context, Result};
use base64::Engine;
use std::fs::OpenOptions;
use std::io::Read;
use std::path::Path;

/// Дамп в стиле `00000000: 41 42 43 ...  ABC...`.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        if row > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{:08x}: ", row * 16));
        for i in 0..16 {
            match chunk.get(i) {
                Some(b) => out.push_str(&format!("{:02x} ", b)),
                None => out.push_str("   "),
            }
        }
        out.push(' ');
        for &b in chunk {
            out.push(if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' });
        }
    }
    out
}

pub fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// Байты через пробел в виде `0x..` (для сырых полей в текстовом дампе).
pub fn hex_list(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[inline]
pub fn b64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Имя side-файла для ключа: разделители пути заменяются на '_'.
pub fn blob_file_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| if c == '/' || c == '\\' || c == '\0' { '_' } else { c })
        .collect();
    if name.is_empty() || name == "." || name == ".." {
        name = format!("_{}", name);
    }
    name.push_str(".bin");
    name
}

/// Прочитать образ раздела целиком.
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    let mut f = OpenOptions::new()
        .read(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(buf)
}
