//! entry - разбор записей NVS из таблицы слотов:
//! - types.rs  - коды типов значений (ValueType)
//! - slot.rs   - заголовочный слот записи (ns/type/span/chunk/key/inline data)
//! - decode.rs - курсор EntryCursor: запись + потребление continuation-слотов

pub mod types;
pub mod slot;
pub mod decode;

pub use types::ValueType;
pub use slot::RawSlot;
pub use decode::{EntryCursor, SlotOutcome, Step};
