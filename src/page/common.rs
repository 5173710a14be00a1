//! page/common - offset'ы заголовка страницы и полей слота.

// ---------- Заголовок страницы (64 байта) ----------
/// state (u32 LE): magic состояния страницы.
pub const OFF_STATE: usize = 0;
/// sequence number (u32 LE).
pub const OFF_SEQ_NO: usize = 4;
/// version (u8), хранится как (actual - 1) ^ 0xFF.
pub const OFF_VERSION: usize = 8;
// 9..28: зарезервировано.
/// CRC32 заголовка (u32 LE). Только отчёт, не проверяется.
pub const OFF_CRC32: usize = 28;
/// Bitmap состояний слотов (32 байта, 126 × 2 бита).
pub const OFF_BITMAP: usize = 32;
pub const BITMAP_LEN: usize = 32;

// ---------- Слот (32 байта) ----------
pub const SLOT_OFF_NS: usize = 0;
pub const SLOT_OFF_TYPE: usize = 1;
pub const SLOT_OFF_SPAN: usize = 2;
pub const SLOT_OFF_CHUNK: usize = 3;
// 4..8: CRC32 записи, не читается.
pub const SLOT_OFF_KEY: usize = 8;
pub const SLOT_KEY_LEN: usize = 16;
pub const SLOT_OFF_DATA: usize = 24;
pub const SLOT_DATA_LEN: usize = 8;

// ---------- Inline data для STR/BLOB/BLOB_DATA: [size u16][rsv u16][crc32 u32] ----------
pub const VAR_OFF_SIZE: usize = 0;

// ---------- Inline data для BLOB_IDX: [total u32][rsv u8][count u8][start u8][rsv u8] ----------
pub const IDX_OFF_SIZE: usize = 0;
pub const IDX_OFF_CHUNK_COUNT: usize = 5;
pub const IDX_OFF_CHUNK_START: usize = 6;
