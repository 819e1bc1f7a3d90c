//! Основные типы данных для tablesql
//!
//! Определяет типы значений колонок, модель колонки, карту схемы,
//! а также структуры результата компиляции (SQL + параметры).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Тип значения колонки виртуальной таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    Integer,
    Double,
    Boolean,
    Date,
    String,
    StringList,
    IntegerList,
}

impl ColumnType {
    /// Является ли тип списочным (JSON массив значений)
    pub fn is_list(&self) -> bool {
        matches!(self, ColumnType::StringList | ColumnType::IntegerList)
    }

    /// Возвращает тип элемента для списочного типа, иначе сам тип
    pub fn non_list(&self) -> ColumnType {
        match self {
            ColumnType::StringList => ColumnType::String,
            ColumnType::IntegerList => ColumnType::Integer,
            other => *other,
        }
    }

    /// Является ли тип числовым
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Integer | ColumnType::Double | ColumnType::Date
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Double => "DOUBLE",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Date => "DATE",
            ColumnType::String => "STRING",
            ColumnType::StringList => "STRING_LIST",
            ColumnType::IntegerList => "INTEGER_LIST",
        };
        write!(f, "{}", name)
    }
}

/// Модель колонки из каталога хранилища
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnModel {
    /// Числовой идентификатор колонки в хранилище
    pub id: i64,
    /// Логическое (пользовательское) имя колонки
    pub name: String,
    /// Тип значения
    pub column_type: ColumnType,
    /// Максимальный размер значения (для строковых типов)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_size: Option<u32>,
}

impl ColumnModel {
    /// Создает модель колонки
    pub fn new(id: i64, name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id,
            name: name.into(),
            column_type,
            maximum_size: None,
        }
    }

    /// Физическое имя колонки в хранилище, например `_C123_`
    pub fn physical_name(&self) -> String {
        format!("_C{}_", self.id)
    }

    /// Физическое имя парной колонки для специальных значений DOUBLE,
    /// например `_DBL_C123_`
    pub fn double_physical_name(&self) -> String {
        format!("_DBL_C{}_", self.id)
    }
}

/// Карта схемы: логические имена -> модели колонок и физические таблицы
///
/// Поставляется коллаборатором хранилища на каждую компиляцию;
/// компилятор только читает ее.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaMap {
    /// Логическое имя колонки -> модель колонки
    columns: IndexMap<String, ColumnModel>,
    /// Логический идентификатор таблицы -> физический идентификатор
    tables: IndexMap<String, String>,
}

impl SchemaMap {
    /// Создает пустую карту схемы
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет модель колонки
    pub fn add_column(&mut self, column: ColumnModel) {
        self.columns.insert(column.name.clone(), column);
    }

    /// Добавляет соответствие логической таблицы физической
    pub fn add_table(&mut self, logical: impl Into<String>, physical: impl Into<String>) {
        self.tables.insert(logical.into(), physical.into());
    }

    /// Ищет модель колонки по логическому имени
    pub fn column(&self, name: &str) -> Option<&ColumnModel> {
        self.columns.get(name)
    }

    /// Ищет физический идентификатор таблицы по логическому
    pub fn physical_table(&self, logical: &str) -> Option<&str> {
        self.tables.get(logical).map(|s| s.as_str())
    }

    /// Все модели колонок в порядке добавления
    pub fn columns(&self) -> impl Iterator<Item = &ColumnModel> {
        self.columns.values()
    }

    /// Количество колонок в схеме
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Пуста ли схема
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Описание колонки результата запроса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectColumn {
    /// Отображаемое имя (псевдоним или текст выражения)
    pub name: String,
    /// Тип значения, если известен
    pub column_type: Option<ColumnType>,
    /// Идентификатор колонки схемы; `None` для агрегатов и выражений
    pub id: Option<i64>,
}

/// Значение связанного параметра
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(v) => write!(f, "{}", v),
            ParameterValue::Double(v) => write!(f, "{}", v),
            ParameterValue::Boolean(v) => write!(f, "{}", v),
            ParameterValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Связанный параметр транслированного запроса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundParameter {
    /// Имя параметра без двоеточия, например `b0`
    pub name: String,
    /// Значение параметра
    pub value: ParameterValue,
    /// Тип колонки, по которому выполнена коэрция, если был известен
    pub column_type: Option<ColumnType>,
}

/// Результат трансляции: физический SQL и упорядоченный список параметров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedQuery {
    pub sql: String,
    pub parameters: Vec<BoundParameter>,
}
