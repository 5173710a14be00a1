use byteorder::{ByteOrder, LittleEndian};

use crate::consts::SLOT_SIZE;
use crate::page::common::{
    IDX_OFF_CHUNK_COUNT, IDX_OFF_CHUNK_START, IDX_OFF_SIZE, SLOT_DATA_LEN, SLOT_KEY_LEN,
    SLOT_OFF_CHUNK, SLOT_OFF_DATA, SLOT_OFF_KEY, SLOT_OFF_NS, SLOT_OFF_SPAN,
    SLOT_OFF_TYPE, VAR_OFF_SIZE,
};

use super::types::ValueType;

/// Заголовочный слот записи (32 байта, без копирования).
#[derive(Debug, Clone, Copy)]
pub struct RawSlot<'a> {
    bytes: &'a [u8],
}

impl<'a> RawSlot<'a> {
    /// `bytes` должен быть ровно SLOT_SIZE; иначе None.
    pub fn new(bytes: &'a [u8]) -> Option<Self> {
        if bytes.len() != SLOT_SIZE {
            return None;
        }
        Some(Self { bytes })
    }

    #[inline]
    pub fn ns(&self) -> u8 {
        self.bytes[SLOT_OFF_NS]
    }

    #[inline]
    pub fn type_code(&self) -> u8 {
        self.bytes[SLOT_OFF_TYPE]
    }

    #[inline]
    pub fn value_type(&self) -> ValueType {
        ValueType::from_code(self.type_code())
    }

    #[inline]
    pub fn span(&self) -> u8 {
        self.bytes[SLOT_OFF_SPAN]
    }

    #[inline]
    pub fn chunk_index(&self) -> u8 {
        self.bytes[SLOT_OFF_CHUNK]
    }

    /// Ключ до первого NUL; байты отображаются в char один к одному.
    pub fn key(&self) -> String {
        self.bytes[SLOT_OFF_KEY..SLOT_OFF_KEY + SLOT_KEY_LEN]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect()
    }

    /// 8 байт inline-данных.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        &self.bytes[SLOT_OFF_DATA..SLOT_OFF_DATA + SLOT_DATA_LEN]
    }

    /// Объявленный размер payload для STR/BLOB/BLOB_DATA.
    pub fn var_size(&self) -> u16 {
        let d = self.data();
        LittleEndian::read_u16(&d[VAR_OFF_SIZE..VAR_OFF_SIZE + 2])
    }

    /// BLOB_IDX: (total_size, chunk_count, chunk_start).
    pub fn blob_index(&self) -> (u32, u8, u8) {
        let d = self.data();
        (
            LittleEndian::read_u32(&d[IDX_OFF_SIZE..IDX_OFF_SIZE + 4]),
            d[IDX_OFF_CHUNK_COUNT],
            d[IDX_OFF_CHUNK_START],
        )
    }
}
