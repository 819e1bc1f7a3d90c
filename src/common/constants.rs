//! Константы для tablesql

/// Префикс имен связанных параметров (`:b0`, `:b1`, ...)
pub const BIND_PREFIX: &str = "b";

/// Фиксированный путь разворачивания JSON массива в JSON_TABLE
pub const JSON_UNNEST_PATH: &str = "$[*]";

/// Фиксированный листовой путь объявленной колонки JSON_TABLE
pub const JSON_LEAF_PATH: &str = "$";

/// Маркер строгой обработки некорректного JSON
pub const JSON_STRICT_MARKER: &str = "ERROR ON ERROR";

/// Максимальная глубина рекурсии парсера по умолчанию
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 100;

/// Максимальная длина текста запроса по умолчанию (в символах)
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 64 * 1024;

/// Максимальное количество связанных параметров по умолчанию
pub const DEFAULT_MAX_PARAMETERS: usize = 1000;
