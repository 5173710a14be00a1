//! page - формат страницы NVS: заголовок, bitmap состояний слотов, таблица слотов.
//!
//! Разделение по подмодулям:
//! - common.rs - offset'ы полей заголовка и слота.
//! - bitmap.rs - декодирование 2-битовых состояний слотов.
//! - header.rs - заголовок страницы (state/seq/version/crc/bitmap).
//! - reader.rs - PageView: заголовок + заимствованная таблица слотов.

pub mod common;
pub mod bitmap;
pub mod header;
pub mod reader;

pub use bitmap::{bitmap_digits, decode_bitmap, SlotState};
pub use header::{page_header_read, PageHeader, PageState};
pub use reader::{read_page, PageView};
