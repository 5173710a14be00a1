#![allow(non_snake_case)]

// Формат
pub mod consts;
pub mod error;
pub mod page;   // src/page/{mod,common,bitmap,header,reader}.rs
pub mod entry;  // src/entry/{mod,types,slot,decode}.rs
pub mod record;

// Проход по разделу и побочные таблицы
pub mod namespace;
pub mod blob;
pub mod partition;

// Вывод и окружение
pub mod export; // src/export/{mod,csv,text,json,summary}.rs
pub mod config;
pub mod util;   // src/util/mod.rs
pub mod cli;

// Удобные реэкспорты
pub use blob::{AssembledBlob, BlobAssembler, BlobIndexInfo};
pub use config::{DumpBuilder, DumpConfig};
pub use entry::ValueType;
pub use error::{Anomaly, NvsError, NvsResult};
pub use namespace::NamespaceRegistry;
pub use page::{PageHeader, PageState, SlotState};
pub use partition::{decode_partition, PageInfo, PartitionDecoder, PartitionDump};
pub use record::{LogicalRecord, Value};
