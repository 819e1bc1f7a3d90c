//! tablesql - Компилятор SQL запросов для виртуальных таблиц на Rust
//!
//! Этот модуль предоставляет основную функциональность для компиляции запросов:
//! парсинг SQL подмножества, семантическое разрешение колонок по схеме
//! и трансляцию в физический SQL с связанными параметрами.

pub mod analyzer;
pub mod cli;
pub mod common;
pub mod parser;
pub mod translator;
pub mod traversal;

pub use common::error::{Error, Result};
pub use common::types::*;
pub use translator::QueryTranslator;

/// Версия библиотеки
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Компилирует запрос в физический SQL с параметрами
///
/// Удобная обертка над [`QueryTranslator`] для вызова в одну строку.
pub fn translate(sql: &str, schema: &SchemaMap) -> Result<TranslatedQuery> {
    let translator = QueryTranslator::new(sql, schema)?;
    Ok(translator.into_translated())
}
