//! Конфигурация для tablesql
//!
//! Предоставляет структуры конфигурации для компонентов компилятора

use crate::common::constants::{
    DEFAULT_MAX_PARAMETERS, DEFAULT_MAX_QUERY_LENGTH, DEFAULT_MAX_RECURSION_DEPTH,
};
use crate::common::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Конфигурация парсера
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Максимальная глубина рекурсии при разборе условий
    pub max_recursion_depth: usize,
    /// Максимальная длина текста запроса (в символах)
    pub max_query_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
        }
    }
}

/// Конфигурация транслятора
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Максимальное количество связанных параметров в одном запросе
    pub max_parameters: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            max_parameters: DEFAULT_MAX_PARAMETERS,
        }
    }
}

/// Конфигурация логирования
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Уровень логирования
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Основная конфигурация компилятора
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub parser: ParserConfig,
    pub translator: TranslatorConfig,
    pub logging: LoggingConfig,
}

impl CompilerConfig {
    /// Загружает конфигурацию из TOML файла
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Разбирает конфигурацию из TOML строки
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("invalid TOML configuration: {}", e)))
    }

    /// Проверяет согласованность значений конфигурации
    pub fn validate(&self) -> Result<()> {
        if self.parser.max_recursion_depth == 0 {
            return Err(Error::configuration(
                "parser.max_recursion_depth must be greater than zero",
            ));
        }
        if self.parser.max_query_length == 0 {
            return Err(Error::configuration(
                "parser.max_query_length must be greater than zero",
            ));
        }
        if self.translator.max_parameters == 0 {
            return Err(Error::configuration(
                "translator.max_parameters must be greater than zero",
            ));
        }
        Ok(())
    }
}
