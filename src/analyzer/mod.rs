//! Семантический анализатор для tablesql
//!
//! Этот модуль отвечает за разрешение ссылок на колонки по карте схемы,
//! определение типов значений сравнений, выявление агрегатных запросов
//! и построение описания колонок результата.

pub mod resolver;

#[cfg(test)]
pub mod tests;

// Переэкспортируем основные типы
pub use resolver::{ResolvedQuery, SchemaResolver};
