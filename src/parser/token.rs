//! Токены для SQL лексера tablesql
//!
//! Определяет все типы токенов, которые может распознать лексический анализатор,
//! включая ключевые слова поддерживаемого подмножества SQL, идентификаторы,
//! литералы и операторы.

use std::collections::HashMap;
use std::fmt;

/// Позиция токена в исходном тексте
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Токен с позицией и значением
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(token_type: TokenType, value: String, position: Position) -> Self {
        Self {
            token_type,
            value,
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}('{}') at {}",
            self.token_type, self.value, self.position
        )
    }
}

/// Типы токенов поддерживаемого подмножества SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // === Ключевые слова ===
    Select,
    Distinct,
    From,
    Where,
    Group,
    Having,
    Order,
    By,
    Asc,
    Desc,
    Limit,
    Offset,

    // Соединения
    Join,
    Inner,
    Left,
    Right,
    Outer,
    On,

    // Логические операторы
    And,
    Or,
    Not,
    In,
    Is,
    Null,
    Like,

    // Агрегатные функции
    Count,
    Sum,
    Avg,
    Min,
    Max,

    // Прочие ключевые слова
    As,

    // === Идентификаторы и литералы ===
    /// Идентификатор (имя таблицы, колонки, etc.)
    Identifier,

    /// Идентификатор в двойных кавычках
    QuotedIdentifier,

    /// Строковый литерал
    StringLiteral,

    /// Целое число
    IntegerLiteral,

    /// Число с плавающей точкой
    FloatLiteral,

    // === Операторы ===
    Equal,        // =
    NotEqual,     // <> или !=
    Less,         // <
    Greater,      // >
    LessEqual,    // <=
    GreaterEqual, // >=

    // === Разделители и символы ===
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,
    Semicolon,  // ;
    Dot,        // .
    Asterisk,   // *

    // === Специальные токены ===
    /// Конец файла
    Eof,

    /// Неизвестный символ (ошибка)
    Unknown,
}

impl TokenType {
    /// Проверяет, является ли токен ключевым словом
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenType::Select
                | TokenType::Distinct
                | TokenType::From
                | TokenType::Where
                | TokenType::Group
                | TokenType::Having
                | TokenType::Order
                | TokenType::By
                | TokenType::Asc
                | TokenType::Desc
                | TokenType::Limit
                | TokenType::Offset
                | TokenType::Join
                | TokenType::Inner
                | TokenType::Left
                | TokenType::Right
                | TokenType::Outer
                | TokenType::On
                | TokenType::And
                | TokenType::Or
                | TokenType::Not
                | TokenType::In
                | TokenType::Is
                | TokenType::Null
                | TokenType::Like
                | TokenType::Count
                | TokenType::Sum
                | TokenType::Avg
                | TokenType::Min
                | TokenType::Max
                | TokenType::As
        )
    }

    /// Проверяет, является ли токен агрегатной функцией
    pub fn is_aggregate_function(&self) -> bool {
        matches!(
            self,
            TokenType::Count | TokenType::Sum | TokenType::Avg | TokenType::Min | TokenType::Max
        )
    }
}

/// Строит карту ключевых слов (в верхнем регистре) к типам токенов
///
/// Контекстные слова (JSON_TABLE, COLUMNS, PATH, ERROR, имена булевых
/// функций) намеренно не зарезервированы и лексируются как идентификаторы.
pub fn keyword_map() -> HashMap<&'static str, TokenType> {
    let mut map = HashMap::new();
    map.insert("SELECT", TokenType::Select);
    map.insert("DISTINCT", TokenType::Distinct);
    map.insert("FROM", TokenType::From);
    map.insert("WHERE", TokenType::Where);
    map.insert("GROUP", TokenType::Group);
    map.insert("HAVING", TokenType::Having);
    map.insert("ORDER", TokenType::Order);
    map.insert("BY", TokenType::By);
    map.insert("ASC", TokenType::Asc);
    map.insert("DESC", TokenType::Desc);
    map.insert("LIMIT", TokenType::Limit);
    map.insert("OFFSET", TokenType::Offset);
    map.insert("JOIN", TokenType::Join);
    map.insert("INNER", TokenType::Inner);
    map.insert("LEFT", TokenType::Left);
    map.insert("RIGHT", TokenType::Right);
    map.insert("OUTER", TokenType::Outer);
    map.insert("ON", TokenType::On);
    map.insert("AND", TokenType::And);
    map.insert("OR", TokenType::Or);
    map.insert("NOT", TokenType::Not);
    map.insert("IN", TokenType::In);
    map.insert("IS", TokenType::Is);
    map.insert("NULL", TokenType::Null);
    map.insert("LIKE", TokenType::Like);
    map.insert("COUNT", TokenType::Count);
    map.insert("SUM", TokenType::Sum);
    map.insert("AVG", TokenType::Avg);
    map.insert("MIN", TokenType::Min);
    map.insert("MAX", TokenType::Max);
    map.insert("AS", TokenType::As);
    map
}
