//! export - форматтеры поверх `PartitionDump`. Декодер ничего не печатает сам;
//! каждый форматтер пишет в переданный `Write`.
//! - csv.rs     - таблица key,type,encoding,value + side-файлы блобов
//! - text.rs    - подробный диагностический дамп
//! - json.rs    - страницы и записи в JSON
//! - summary.rs - короткий отчёт

pub mod csv;
pub mod text;
pub mod json;
pub mod summary;

pub use csv::{write_csv, CsvStats};
pub use json::write_json;
pub use summary::{write_summary, Summary};
pub use text::write_text;
