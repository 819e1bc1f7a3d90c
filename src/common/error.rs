//! Обработка ошибок для tablesql

use crate::parser::token::Position;
use thiserror::Error;

/// Основной тип ошибки для tablesql
#[derive(Error, Debug)]
pub enum Error {
    /// Ошибка I/O операций
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации/десериализации
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Ошибка парсинга запроса (некорректный текст запроса)
    #[error("SQL parse error at {line}:{column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// Ошибка трансляции (корректное дерево, но не разрешимо по схеме)
    #[error("SQL translation error: {message}")]
    Translation { message: String },

    /// Ошибка конфигурации
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Внутренняя ошибка (нарушение инварианта компилятора)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Тип результата для tablesql
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Создает ошибку парсинга с позицией в исходном тексте
    pub fn parse(message: impl Into<String>, position: &Position) -> Self {
        Self::Parse {
            message: message.into(),
            line: position.line,
            column: position.column,
        }
    }

    /// Создает ошибку трансляции
    pub fn translation(message: impl Into<String>) -> Self {
        Self::Translation {
            message: message.into(),
        }
    }

    /// Создает ошибку конфигурации
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Создает внутреннюю ошибку
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Является ли ошибка ошибкой парсинга
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Является ли ошибка ошибкой трансляции
    pub fn is_translation(&self) -> bool {
        matches!(self, Self::Translation { .. })
    }
}
