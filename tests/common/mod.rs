#![allow(dead_code)]

//! Сборка образов NVS-раздела байт за байтом для интеграционных тестов.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const PAGE: usize = 4096;
pub const HDR: usize = 64;
pub const SLOT: usize = 32;
pub const SLOTS: usize = 126;

pub const ST_EMPTY: u32 = 0xFFFF_FFFF;
pub const ST_ACTIVE: u32 = 0xFFFF_FFFE;
pub const ST_FULL: u32 = 0xFFFF_FFFC;

pub const T_U8: u8 = 0x01;
pub const T_I8: u8 = 0x11;
pub const T_U16: u8 = 0x02;
pub const T_I16: u8 = 0x12;
pub const T_U32: u8 = 0x04;
pub const T_I32: u8 = 0x14;
pub const T_U64: u8 = 0x08;
pub const T_STR: u8 = 0x21;
pub const T_BLOB: u8 = 0x41;
pub const T_BLOB_DATA: u8 = 0x42;
pub const T_BLOB_IDX: u8 = 0x48;
pub const T_ANY: u8 = 0xFF;

/// Одна страница; записи кладутся подряд начиная со слота 0.
#[derive(Clone)]
pub struct PageBuilder {
    buf: Vec<u8>,
    next: usize,
}

impl PageBuilder {
    pub fn new(state: u32, seq: u32) -> Self {
        let mut buf = vec![0xFFu8; PAGE];
        buf[0..4].copy_from_slice(&state.to_le_bytes());
        buf[4..8].copy_from_slice(&seq.to_le_bytes());
        buf[8] = 0xFE; // version 2
        buf[28..32].copy_from_slice(&0u32.to_le_bytes());
        Self { buf, next: 0 }
    }

    pub fn active(seq: u32) -> Self {
        Self::new(ST_ACTIVE, seq)
    }

    pub fn set_state(&mut self, slot: usize, bits: u8) -> &mut Self {
        let bitnum = slot * 2;
        let byte = 32 + bitnum / 8;
        let shift = 6 - (bitnum % 8);
        self.buf[byte] = (self.buf[byte] & !(0b11 << shift)) | ((bits & 0b11) << shift);
        self
    }

    pub fn erase(&mut self, slot: usize) -> &mut Self {
        self.set_state(slot, 0b00)
    }

    pub fn slot_mut(&mut self, slot: usize) -> &mut [u8] {
        let off = HDR + slot * SLOT;
        &mut self.buf[off..off + SLOT]
    }

    /// Пропустить `n` слотов (оставить Empty).
    pub fn skip(&mut self, n: usize) -> &mut Self {
        self.next += n;
        self
    }

    pub fn next_slot(&self) -> usize {
        self.next
    }

    /// Записать заголовочный слот + payload, отметить все слоты Written.
    pub fn entry(
        &mut self,
        ns: u8,
        ty: u8,
        span: u8,
        chunk: u8,
        key: &str,
        data: [u8; 8],
        payload: &[u8],
    ) -> &mut Self {
        let at = self.next;
        {
            let s = self.slot_mut(at);
            s[0] = ns;
            s[1] = ty;
            s[2] = span;
            s[3] = chunk;
            s[4..8].fill(0);
            s[8..24].fill(0);
            s[8..8 + key.len()].copy_from_slice(key.as_bytes());
            s[24..32].copy_from_slice(&data);
        }
        if !payload.is_empty() {
            let off = HDR + (at + 1) * SLOT;
            self.buf[off..off + payload.len()].copy_from_slice(payload);
        }
        let used = (span as usize).max(1);
        for k in 0..used {
            self.set_state(at + k, 0b10);
        }
        self.next += used;
        self
    }

    fn scalar(&mut self, ns: u8, ty: u8, key: &str, le: &[u8]) -> &mut Self {
        let mut d = [0xFFu8; 8];
        d[..le.len()].copy_from_slice(le);
        self.entry(ns, ty, 1, 0xFF, key, d, &[])
    }

    pub fn u8(&mut self, ns: u8, key: &str, v: u8) -> &mut Self {
        self.scalar(ns, T_U8, key, &[v])
    }

    pub fn i8(&mut self, ns: u8, key: &str, v: i8) -> &mut Self {
        self.scalar(ns, T_I8, key, &v.to_le_bytes())
    }

    pub fn u16(&mut self, ns: u8, key: &str, v: u16) -> &mut Self {
        self.scalar(ns, T_U16, key, &v.to_le_bytes())
    }

    pub fn i16(&mut self, ns: u8, key: &str, v: i16) -> &mut Self {
        self.scalar(ns, T_I16, key, &v.to_le_bytes())
    }

    pub fn u32(&mut self, ns: u8, key: &str, v: u32) -> &mut Self {
        self.scalar(ns, T_U32, key, &v.to_le_bytes())
    }

    pub fn i32(&mut self, ns: u8, key: &str, v: i32) -> &mut Self {
        self.scalar(ns, T_I32, key, &v.to_le_bytes())
    }

    /// Namespace-определение: ns=0, U8, value=index, key=name.
    pub fn namespace(&mut self, name: &str, index: u8) -> &mut Self {
        self.u8(0, name, index)
    }

    fn var_data(size: u16) -> [u8; 8] {
        let mut d = [0u8; 8];
        d[0..2].copy_from_slice(&size.to_le_bytes());
        d[2..4].copy_from_slice(&[0xFF, 0xFF]);
        d
    }

    fn span_for(len: usize) -> u8 {
        (1 + (len + SLOT - 1) / SLOT) as u8
    }

    /// STR с завершающим NUL (size = len + 1).
    pub fn str(&mut self, ns: u8, key: &str, s: &str) -> &mut Self {
        let mut payload = s.as_bytes().to_vec();
        payload.push(0);
        let span = Self::span_for(payload.len());
        self.entry(ns, T_STR, span, 0xFF, key, Self::var_data(payload.len() as u16), &payload)
    }

    pub fn blob(&mut self, ns: u8, key: &str, bytes: &[u8]) -> &mut Self {
        let span = Self::span_for(bytes.len());
        self.entry(ns, T_BLOB, span, 0xFF, key, Self::var_data(bytes.len() as u16), bytes)
    }

    pub fn blob_data(&mut self, ns: u8, key: &str, chunk: u8, bytes: &[u8]) -> &mut Self {
        let span = Self::span_for(bytes.len());
        self.entry(ns, T_BLOB_DATA, span, chunk, key, Self::var_data(bytes.len() as u16), bytes)
    }

    pub fn blob_idx(&mut self, ns: u8, key: &str, total: u32, count: u8, start: u8) -> &mut Self {
        let mut d = [0xFFu8; 8];
        d[0..4].copy_from_slice(&total.to_le_bytes());
        d[5] = count;
        d[6] = start;
        self.entry(ns, T_BLOB_IDX, 1, 0xFF, key, d, &[])
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }
}

/// Склеить страницы в образ раздела.
pub fn image(pages: &[&PageBuilder]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pages.len() * PAGE);
    for p in pages {
        out.extend_from_slice(&p.bytes());
    }
    out
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("nvsdump-{prefix}-{pid}-{t}-{id}"))
}
