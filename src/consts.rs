//! Общие константы формата NVS (страницы, слоты, состояния, коды типов).

// -------- Geometry --------
pub const PAGE_SIZE: usize = 4096;
pub const SLOT_SIZE: usize = 32;
pub const SLOTS_PER_PAGE: usize = 126;
pub const PAGE_HDR_SIZE: usize = 64; // [state u32][seq u32][ver u8][rsv 19][crc32 u32][bitmap 32]

// -------- Page states (u32 LE в начале страницы) --------
pub const PAGE_STATE_EMPTY: u32 = 0xFFFF_FFFF;
pub const PAGE_STATE_ACTIVE: u32 = 0xFFFF_FFFE;
pub const PAGE_STATE_FULL: u32 = 0xFFFF_FFFC;
pub const PAGE_STATE_FREEING: u32 = 0xFFFF_FFF8;
pub const PAGE_STATE_CORRUPT: u32 = 0xFFFF_FFF0;

// -------- Slot states (2 бита на слот в bitmap) --------
pub const SLOT_STATE_ERASED: u8 = 0b00;
pub const SLOT_STATE_WRITTEN: u8 = 0b10;
pub const SLOT_STATE_EMPTY: u8 = 0b11;

// -------- Type codes (byte 1 слота) --------
pub const TYPE_NONE: u8 = 0x00;
pub const TYPE_U8: u8 = 0x01;
pub const TYPE_I8: u8 = 0x11;
pub const TYPE_U16: u8 = 0x02;
pub const TYPE_I16: u8 = 0x12;
pub const TYPE_U32: u8 = 0x04;
pub const TYPE_I32: u8 = 0x14;
pub const TYPE_U64: u8 = 0x08;
pub const TYPE_I64: u8 = 0x18;
pub const TYPE_STR: u8 = 0x21;
pub const TYPE_BLOB: u8 = 0x41;
pub const TYPE_BLOB_DATA: u8 = 0x42;
pub const TYPE_BLOB_IDX: u8 = 0x48;
pub const TYPE_ANY: u8 = 0xFF;

/// Namespace index 0 зарезервирован под записи-определения namespace.
pub const NS_DEFINITIONS: u8 = 0;

// -------- Export --------
pub const DEFAULT_BLOB_DIR: &str = "blob_data";
/// Блобы из одного чанка короче этого порога идут в CSV inline (base64).
pub const DEFAULT_INLINE_BLOB_MAX: usize = 100;
