//! Обход синтаксического дерева для tablesql
//!
//! Этот модуль предоставляет обобщенный обход дерева с обратными вызовами
//! по видам узлов и окружающее состояние одного прохода компиляции:
//! стек контекстов клаузул и регистр текущего левого операнда сравнения.

pub mod context;
pub mod walker;

#[cfg(test)]
pub mod tests;

pub use context::{ClauseContext, WalkContext};
pub use walker::{clause_of, walk, Visitor};
