//! Трансляция запросов в физический SQL для tablesql
//!
//! Этот модуль отвечает за выпуск итогового SQL против физического
//! хранилища: подстановку физических идентификаторов, параметризацию
//! литералов и переписывание предикатов.

pub mod renderer;
pub mod translator;

#[cfg(test)]
pub mod tests;

// Переэкспортируем основные типы
pub use renderer::TranslatingRenderer;
pub use translator::QueryTranslator;
