use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::consts::{
    PAGE_HDR_SIZE, PAGE_STATE_ACTIVE, PAGE_STATE_CORRUPT, PAGE_STATE_EMPTY, PAGE_STATE_FREEING,
    PAGE_STATE_FULL,
};
use crate::error::{NvsError, NvsResult};
use crate::page::common::{BITMAP_LEN, OFF_BITMAP, OFF_CRC32, OFF_SEQ_NO, OFF_STATE, OFF_VERSION};

/// Состояние страницы (magic u32 в начале заголовка).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageState {
    Empty,
    Active,
    Full,
    Freeing,
    Corrupt,
    Unrecognized(u32),
}

impl PageState {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            PAGE_STATE_EMPTY => PageState::Empty,
            PAGE_STATE_ACTIVE => PageState::Active,
            PAGE_STATE_FULL => PageState::Full,
            PAGE_STATE_FREEING => PageState::Freeing,
            PAGE_STATE_CORRUPT => PageState::Corrupt,
            other => PageState::Unrecognized(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageState::Empty => "EMPTY",
            PageState::Active => "ACTIVE",
            PageState::Full => "FULL",
            PageState::Freeing => "FREEING",
            PageState::Corrupt => "CORRUPT",
            PageState::Unrecognized(_) => "UNKNOWN",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, PageState::Unrecognized(_))
    }
}

/// Заголовок страницы NVS (64 байта).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
    pub state: PageState,
    pub raw_state: u32,
    pub seq_no: u32,
    pub raw_version: u8,
    /// (raw ^ 0xFF) + 1; raw 0x00 даёт 256, поэтому u16.
    pub version: u16,
    pub crc32: u32,
    pub bitmap: [u8; BITMAP_LEN],
}

/// Прочитать заголовок. Проверяется только длина: CRC и magic не валидируются.
pub fn page_header_read(page: &[u8]) -> NvsResult<PageHeader> {
    if page.len() < PAGE_HDR_SIZE {
        return Err(NvsError::TruncatedPage {
            expected: PAGE_HDR_SIZE,
            actual: page.len(),
        });
    }
    let raw_state = LittleEndian::read_u32(&page[OFF_STATE..OFF_STATE + 4]);
    let raw_version = page[OFF_VERSION];
    let mut bitmap = [0u8; BITMAP_LEN];
    bitmap.copy_from_slice(&page[OFF_BITMAP..OFF_BITMAP + BITMAP_LEN]);

    Ok(PageHeader {
        state: PageState::from_raw(raw_state),
        raw_state,
        seq_no: LittleEndian::read_u32(&page[OFF_SEQ_NO..OFF_SEQ_NO + 4]),
        raw_version,
        version: (raw_version ^ 0xFF) as u16 + 1,
        crc32: LittleEndian::read_u32(&page[OFF_CRC32..OFF_CRC32 + 4]),
        bitmap,
    })
}
