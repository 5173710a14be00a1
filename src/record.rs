//! record - логическая запись NVS, видимая снаружи декодера.

use crate::entry::ValueType;
use crate::page::SlotState;

/// Декодированное значение. Набор вариантов закрыт: новый тип данных требует
/// явной ветки в декодере и в форматтерах.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    Str(String),
    /// Legacy BLOB (без чанков).
    Blob(Vec<u8>),
    /// Один чанк разбитого блоба.
    BlobData(Vec<u8>),
    /// Метаданные разбитого блоба.
    BlobIndex {
        total_size: u32,
        chunk_count: u8,
        chunk_start: u8,
    },
    /// Сырые байты: U64/I64, неизвестные коды типов, STR с невалидным UTF-8.
    Raw(Vec<u8>),
}

impl Value {
    /// Байтовый payload (блобы и Raw), для чисел/строк None.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) | Value::BlobData(b) | Value::Raw(b) => Some(b),
            _ => None,
        }
    }

    /// Целочисленное значение, если оно есть.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::U8(v) => Some(v as i64),
            Value::I8(v) => Some(v as i64),
            Value::U16(v) => Some(v as i64),
            Value::I16(v) => Some(v as i64),
            Value::U32(v) => Some(v as i64),
            Value::I32(v) => Some(v as i64),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalRecord {
    /// Номер страницы в разделе.
    pub page: usize,
    /// Индекс заголовочного слота на странице.
    pub slot: usize,
    /// Абсолютное смещение заголовочного слота.
    pub offset: usize,
    pub state: SlotState,
    pub namespace_index: u8,
    /// Имя namespace, известное на момент скана этой записи.
    pub namespace_name: Option<String>,
    pub value_type: ValueType,
    pub span: u8,
    pub chunk_index: u8,
    pub key: String,
    /// Объявленный размер (STR/BLOB/BLOB_DATA: u16 из inline-данных, BLOB_IDX: total).
    pub data_size: Option<u32>,
    pub value: Value,
}

impl LogicalRecord {
    #[inline]
    pub fn is_written(&self) -> bool {
        self.state == SlotState::Written
    }
}
