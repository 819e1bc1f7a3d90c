//! Лексический анализатор SQL для tablesql
//!
//! Преобразует входной текст запроса в последовательность токенов для
//! дальнейшего парсинга. Поддерживает ключевые слова подмножества SQL,
//! идентификаторы (включая заключенные в двойные кавычки), литералы,
//! операторы сравнения и комментарии.

use crate::common::{Error, Result};
use crate::parser::token::{keyword_map, Position, Token, TokenType};
use std::collections::HashMap;

/// Лексический анализатор SQL
pub struct Lexer {
    /// Исходный текст
    input: Vec<char>,
    /// Текущая позиция в тексте
    position: usize,
    /// Текущая позиция для отображения ошибок
    current_position: Position,
    /// Карта ключевых слов
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    /// Создает новый лексический анализатор
    pub fn new(input: &str) -> Result<Self> {
        Ok(Self {
            input: input.chars().collect(),
            position: 0,
            current_position: Position::start(),
            keywords: keyword_map(),
        })
    }
}

// Подключаем методы из отдельных файлов
include!("lexer_methods.rs");
include!("lexer_readers.rs");
