//! Вспомогательные функции для tablesql

/// Проверяет, является ли строка корректным простым идентификатором
pub fn is_regular_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Заключает значение в одинарные кавычки, удваивая внутренние кавычки
pub fn quote_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Заключает идентификатор в двойные кавычки
pub fn quote_identifier(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
