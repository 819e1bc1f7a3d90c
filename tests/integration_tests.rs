//! Интеграционные тесты компилятора запросов
//!
//! Проверяют полный конвейер через публичный API: текст запроса и карта
//! схемы на входе, физический SQL и список параметров на выходе.

use tablesql::{
    translate, ColumnModel, ColumnType, Error, ParameterValue, QueryTranslator, SchemaMap,
};

/// Схема, повторяющая типовую таблицу пользователя
fn schema() -> SchemaMap {
    let mut schema = SchemaMap::new();
    schema.add_column(ColumnModel::new(111, "foo", ColumnType::String));
    schema.add_column(ColumnModel::new(333, "bar", ColumnType::Integer));
    schema.add_column(ColumnModel::new(777, "doubletype", ColumnType::Double));
    schema.add_column(ColumnModel::new(555, "stringlist", ColumnType::StringList));
    schema.add_table("syn123", "T123");
    schema.add_table("syn456", "T456");
    schema
}

#[test]
fn test_end_to_end_complex_query() {
    let translator = QueryTranslator::new(
        "select foo as name, count(*) from syn123 where bar > 5 and foo like 'a%' \
         group by foo having count(*) > 2 order by name desc limit 10",
        &schema(),
    )
    .expect("компиляция не удалась");

    assert_eq!(
        translator.output_sql(),
        "SELECT _C111_ AS name, COUNT(*) FROM T123 \
         WHERE _C333_ > :b0 AND _C111_ LIKE :b1 \
         GROUP BY _C111_ HAVING COUNT(*) > :b2 ORDER BY name DESC LIMIT :b3"
    );

    let values: Vec<&ParameterValue> = translator.parameters().iter().map(|p| &p.value).collect();
    assert_eq!(
        values,
        vec![
            &ParameterValue::Integer(5),
            &ParameterValue::Text("a%".to_string()),
            &ParameterValue::Integer(2),
            &ParameterValue::Integer(10),
        ]
    );

    assert!(translator.is_aggregate());
    // Колонки агрегированного результата не несут идентификаторов схемы
    assert!(translator.select_columns().iter().all(|c| c.id.is_none()));
}

#[test]
fn test_end_to_end_join_query() {
    let translator = QueryTranslator::new(
        "select foo from syn123 as t1 left outer join syn456 t2 on t1.foo = t2.bar",
        &schema(),
    )
    .expect("компиляция не удалась");

    assert_eq!(
        translator.output_sql(),
        "SELECT _C111_ FROM T123 AS t1 LEFT OUTER JOIN T456 t2 ON t1._C111_ = t2._C333_"
    );
    assert_eq!(translator.single_table_id(), None);
}

#[test]
fn test_end_to_end_json_unnesting() {
    let translated = translate(
        "select item from json_table(stringlist, '$[*]' columns(item varchar(50))) as U \
         where item = 'x'",
        &schema(),
    )
    .expect("компиляция не удалась");

    assert_eq!(
        translated.sql,
        "SELECT item FROM JSON_TABLE(_C555_, '$[*]' COLUMNS(item VARCHAR(50) PATH '$' ERROR ON ERROR)) AS U \
         WHERE item = :b0"
    );
}

#[test]
fn test_end_to_end_double_special_values() {
    let translated = translate(
        "select doubletype from syn123 where isInfinity(doubletype)",
        &schema(),
    )
    .expect("компиляция не удалась");

    assert_eq!(
        translated.sql,
        "SELECT CASE WHEN _DBL_C777_ IS NULL THEN _C777_ ELSE _DBL_C777_ END FROM T123 \
         WHERE ( _DBL_C777_ IS NOT NULL AND _DBL_C777_ IN ('-Infinity', 'Infinity') )"
    );
}

#[test]
fn test_parse_error_surface() {
    let error = QueryTranslator::new("select * from a join b", &schema()).unwrap_err();
    match error {
        Error::Parse { message, line, .. } => {
            assert!(message.contains("ON"));
            assert_eq!(line, 1);
        }
        other => panic!("Ожидалась ошибка парсинга, получено: {:?}", other),
    }
}

#[test]
fn test_translation_error_surface() {
    let error = QueryTranslator::new("select missing from syn123", &schema()).unwrap_err();
    match error {
        Error::Translation { message } => assert!(message.contains("missing")),
        other => panic!("Ожидалась ошибка трансляции, получено: {:?}", other),
    }
}

#[test]
fn test_schema_is_loadable_from_json() {
    let json = r#"{
        "columns": {
            "foo": { "id": 111, "name": "foo", "column_type": "STRING" }
        },
        "tables": { "syn123": "T123" }
    }"#;
    let schema: SchemaMap = serde_json::from_str(json).expect("схема не разобрана");
    let translated = translate("select foo from syn123", &schema).expect("компиляция не удалась");
    assert_eq!(translated.sql, "SELECT _C111_ FROM T123");
}
