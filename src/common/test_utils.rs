//! Общие утилиты для тестов tablesql

use crate::common::types::{ColumnModel, ColumnType, SchemaMap};

/// Создает стандартную тестовую схему
///
/// Набор колонок повторяется во всех тестах компилятора:
/// `foo` STRING (id 111), `bar` INTEGER (id 333), `doubletype` DOUBLE (id 777),
/// `inttype` INTEGER (id 888), `datetype` DATE (id 444),
/// `stringlist` STRING_LIST (id 555); таблица `syn123` -> `T123`.
pub fn test_schema() -> SchemaMap {
    let mut schema = SchemaMap::new();
    let mut foo = ColumnModel::new(111, "foo", ColumnType::String);
    foo.maximum_size = Some(50);
    schema.add_column(foo);
    schema.add_column(ColumnModel::new(333, "bar", ColumnType::Integer));
    schema.add_column(ColumnModel::new(777, "doubletype", ColumnType::Double));
    schema.add_column(ColumnModel::new(888, "inttype", ColumnType::Integer));
    schema.add_column(ColumnModel::new(444, "datetype", ColumnType::Date));
    schema.add_column(ColumnModel::new(555, "stringlist", ColumnType::StringList));
    schema.add_table("syn123", "T123");
    schema
}

/// Схема с двумя таблицами для тестов соединений
pub fn join_schema() -> SchemaMap {
    let mut schema = test_schema();
    schema.add_table("syn456", "T456");
    schema
}
