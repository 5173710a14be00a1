use crate::consts::{
    TYPE_ANY, TYPE_BLOB, TYPE_BLOB_DATA, TYPE_BLOB_IDX, TYPE_I16, TYPE_I32, TYPE_I64, TYPE_I8,
    TYPE_NONE, TYPE_STR, TYPE_U16, TYPE_U32, TYPE_U64, TYPE_U8,
};

/// Тип значения записи (byte 1 слота).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Код 0: слот без записи.
    None,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    Str,
    Blob,
    BlobData,
    BlobIdx,
    /// 0xFF: неназначенный placeholder.
    Any,
    Unknown(u8),
}

impl ValueType {
    pub fn from_code(code: u8) -> Self {
        match code {
            TYPE_NONE => ValueType::None,
            TYPE_U8 => ValueType::U8,
            TYPE_I8 => ValueType::I8,
            TYPE_U16 => ValueType::U16,
            TYPE_I16 => ValueType::I16,
            TYPE_U32 => ValueType::U32,
            TYPE_I32 => ValueType::I32,
            TYPE_U64 => ValueType::U64,
            TYPE_I64 => ValueType::I64,
            TYPE_STR => ValueType::Str,
            TYPE_BLOB => ValueType::Blob,
            TYPE_BLOB_DATA => ValueType::BlobData,
            TYPE_BLOB_IDX => ValueType::BlobIdx,
            TYPE_ANY => ValueType::Any,
            other => ValueType::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ValueType::None => TYPE_NONE,
            ValueType::U8 => TYPE_U8,
            ValueType::I8 => TYPE_I8,
            ValueType::U16 => TYPE_U16,
            ValueType::I16 => TYPE_I16,
            ValueType::U32 => TYPE_U32,
            ValueType::I32 => TYPE_I32,
            ValueType::U64 => TYPE_U64,
            ValueType::I64 => TYPE_I64,
            ValueType::Str => TYPE_STR,
            ValueType::Blob => TYPE_BLOB,
            ValueType::BlobData => TYPE_BLOB_DATA,
            ValueType::BlobIdx => TYPE_BLOB_IDX,
            ValueType::Any => TYPE_ANY,
            ValueType::Unknown(c) => c,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueType::None => "NONE",
            ValueType::U8 => "U8",
            ValueType::I8 => "I8",
            ValueType::U16 => "U16",
            ValueType::I16 => "I16",
            ValueType::U32 => "U32",
            ValueType::I32 => "I32",
            ValueType::U64 => "U64",
            ValueType::I64 => "I64",
            ValueType::Str => "STR",
            ValueType::Blob => "BLOB",
            ValueType::BlobData => "BLOB_DATA",
            ValueType::BlobIdx => "BLOB_IDX",
            ValueType::Any => "ANY",
            ValueType::Unknown(_) => "UNKNOWN",
        }
    }

    /// Тег типа в CSV (`<key>,data,<tag>,<value>`); None для блобов и служебных типов.
    pub fn csv_tag(self) -> Option<&'static str> {
        match self {
            ValueType::U8 => Some("u8"),
            ValueType::I8 => Some("i8"),
            ValueType::U16 => Some("u16"),
            ValueType::I16 => Some("i16"),
            ValueType::U32 => Some("u32"),
            ValueType::I32 => Some("i32"),
            ValueType::U64 => Some("u64"),
            ValueType::I64 => Some("i64"),
            ValueType::Str => Some("string"),
            _ => None,
        }
    }

    /// Слот не порождает записи (нет записи или placeholder).
    #[inline]
    pub fn is_vacant(self) -> bool {
        matches!(self, ValueType::None | ValueType::Any)
    }

    /// Тип с payload в continuation-слотах: [size u16][rsv u16][crc u32] + (span-1) слотов.
    #[inline]
    pub fn is_variable(self) -> bool {
        matches!(self, ValueType::Str | ValueType::Blob | ValueType::BlobData)
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Unknown(c) => write!(f, "UNKNOWN(0x{:02x})", c),
            other => f.write_str(other.name()),
        }
    }
}

impl serde::Serialize for ValueType {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}
