//! Тесты для транслирующего рендерера

use crate::analyzer::SchemaResolver;
use crate::common::test_utils::{join_schema, test_schema};
use crate::common::types::{ColumnType, ParameterValue, SchemaMap, TranslatedQuery};
use crate::common::Result;
use crate::parser::parser::QueryParser;
use crate::translator::renderer::TranslatingRenderer;

/// Полный конвейер: парсинг, разрешение, рендеринг
fn translate(input: &str, schema: &SchemaMap) -> Result<TranslatedQuery> {
    let mut parser = QueryParser::new(input)?;
    let query = parser.parse()?;
    SchemaResolver::new(schema).resolve(&query)?;
    TranslatingRenderer::new(schema).render(&query)
}

#[test]
fn test_table_and_column_substitution() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select foo from syn123 where foo = 'x'", &schema)?;
    assert_eq!(
        translated.sql,
        "SELECT _C111_ FROM T123 WHERE _C111_ = :b0"
    );
    assert_eq!(translated.parameters.len(), 1);
    assert_eq!(translated.parameters[0].name, "b0");
    assert_eq!(
        translated.parameters[0].value,
        ParameterValue::Text("x".to_string())
    );
    assert_eq!(
        translated.parameters[0].column_type,
        Some(ColumnType::String)
    );
    Ok(())
}

#[test]
fn test_wildcard_is_preserved() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select * from syn123", &schema)?;
    assert_eq!(translated.sql, "SELECT * FROM T123");
    assert!(translated.parameters.is_empty());
    Ok(())
}

#[test]
fn test_unknown_table_fails_render() -> Result<()> {
    let schema = test_schema();
    let error = translate("select foo from syn999", &schema).unwrap_err();
    assert!(error.is_translation());
    assert!(error.to_string().contains("syn999"));
    Ok(())
}

#[test]
fn test_literal_coercion_by_lhs_type() -> Result<()> {
    let schema = test_schema();

    // Целочисленная колонка связывает целое значение
    let translated = translate("select bar from syn123 where bar > 5", &schema)?;
    assert_eq!(translated.parameters[0].value, ParameterValue::Integer(5));
    assert_eq!(
        translated.parameters[0].column_type,
        Some(ColumnType::Integer)
    );

    // DOUBLE колонка связывает дробное значение
    let translated = translate("select bar from syn123 where doubletype = 1.5", &schema)?;
    assert_eq!(translated.sql, "SELECT _C333_ FROM T123 WHERE _C777_ = :b0");
    assert_eq!(translated.parameters[0].value, ParameterValue::Double(1.5));

    // Строковый литерал с целочисленной колонкой коэрцируется в целое
    let translated = translate("select bar from syn123 where bar = '12'", &schema)?;
    assert_eq!(translated.parameters[0].value, ParameterValue::Integer(12));

    // Неразборчивое значение откатывается к лексической форме
    let translated = translate("select bar from syn123 where bar = 'abc'", &schema)?;
    assert_eq!(
        translated.parameters[0].value,
        ParameterValue::Text("abc".to_string())
    );
    Ok(())
}

#[test]
fn test_literal_without_lhs_uses_lexical_form() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select bar from syn123 where 12 = bar", &schema)?;
    assert_eq!(translated.sql, "SELECT _C333_ FROM T123 WHERE :b0 = _C333_");
    assert_eq!(translated.parameters[0].value, ParameterValue::Integer(12));
    assert_eq!(translated.parameters[0].column_type, None);
    Ok(())
}

#[test]
fn test_parameters_are_ordered() -> Result<()> {
    let schema = test_schema();
    let translated = translate(
        "select foo from syn123 where foo = 'x' or bar in (1, 2) limit 10 offset 5",
        &schema,
    )?;
    assert_eq!(
        translated.sql,
        "SELECT _C111_ FROM T123 WHERE _C111_ = :b0 OR _C333_ IN ( :b1, :b2 ) LIMIT :b3 OFFSET :b4"
    );
    let names: Vec<&str> = translated
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["b0", "b1", "b2", "b3", "b4"]);
    assert_eq!(translated.parameters[3].value, ParameterValue::Integer(10));
    assert_eq!(translated.parameters[4].value, ParameterValue::Integer(5));
    Ok(())
}

#[test]
fn test_double_column_renders_case_switch_in_select() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select doubletype from syn123", &schema)?;
    assert_eq!(
        translated.sql,
        "SELECT CASE WHEN _DBL_C777_ IS NULL THEN _C777_ ELSE _DBL_C777_ END FROM T123"
    );
    Ok(())
}

#[test]
fn test_double_column_in_function_renders_plain_name() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select sum(doubletype) from syn123", &schema)?;
    assert_eq!(translated.sql, "SELECT SUM(_C777_) FROM T123");
    Ok(())
}

#[test]
fn test_is_nan_rewrite() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select foo from syn123 where isNaN(doubletype)", &schema)?;
    assert_eq!(
        translated.sql,
        "SELECT _C111_ FROM T123 WHERE ( _DBL_C777_ IS NOT NULL AND _DBL_C777_ = 'NaN' )"
    );
    Ok(())
}

#[test]
fn test_is_infinity_rewrite() -> Result<()> {
    let schema = test_schema();
    let translated = translate(
        "select foo from syn123 where isInfinity(doubletype)",
        &schema,
    )?;
    assert_eq!(
        translated.sql,
        "SELECT _C111_ FROM T123 WHERE ( _DBL_C777_ IS NOT NULL AND _DBL_C777_ IN ('-Infinity', 'Infinity') )"
    );
    Ok(())
}

#[test]
fn test_boolean_function_requires_double_column() -> Result<()> {
    let schema = test_schema();
    let error = translate("select foo from syn123 where isNaN(bar)", &schema).unwrap_err();
    assert!(error.is_translation());
    assert!(error.to_string().contains("DOUBLE"));
    Ok(())
}

#[test]
fn test_order_by_resolves_alias_first() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select foo as f from syn123 order by f", &schema)?;
    assert_eq!(translated.sql, "SELECT _C111_ AS f FROM T123 ORDER BY f");
    Ok(())
}

#[test]
fn test_order_by_falls_back_to_schema() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select foo from syn123 order by bar desc", &schema)?;
    assert_eq!(
        translated.sql,
        "SELECT _C111_ FROM T123 ORDER BY _C333_ DESC"
    );
    Ok(())
}

#[test]
fn test_group_by_substitutes_schema_columns() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select foo from syn123 group by foo, bar", &schema)?;
    assert_eq!(
        translated.sql,
        "SELECT _C111_ FROM T123 GROUP BY _C111_, _C333_"
    );
    Ok(())
}

#[test]
fn test_join_translation() -> Result<()> {
    let schema = join_schema();
    let translated = translate(
        "select foo from syn123 a join syn456 b on a.foo = b.bar where bar = 3",
        &schema,
    )?;
    assert_eq!(
        translated.sql,
        "SELECT _C111_ FROM T123 a JOIN T456 b ON a._C111_ = b._C333_ WHERE _C333_ = :b0"
    );
    Ok(())
}

#[test]
fn test_qualified_logical_table_is_substituted() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select foo from syn123 where syn123.bar = 1", &schema)?;
    assert_eq!(
        translated.sql,
        "SELECT _C111_ FROM T123 WHERE T123._C333_ = :b0"
    );
    Ok(())
}

#[test]
fn test_json_table_translation() -> Result<()> {
    let schema = test_schema();
    let translated = translate(
        "select item from json_table(stringlist, columns(item varchar(50))) as J where item = 'x'",
        &schema,
    )?;
    assert_eq!(
        translated.sql,
        "SELECT item FROM JSON_TABLE(_C555_, '$[*]' COLUMNS(item VARCHAR(50) PATH '$' ERROR ON ERROR)) AS J WHERE item = :b0"
    );
    assert_eq!(
        translated.parameters[0].value,
        ParameterValue::Text("x".to_string())
    );
    Ok(())
}

#[test]
fn test_select_literal_is_parameterized() -> Result<()> {
    let schema = test_schema();
    let translated = translate("select 'not a foo' from syn123", &schema)?;
    assert_eq!(translated.sql, "SELECT :b0 FROM T123");
    assert_eq!(
        translated.parameters[0].value,
        ParameterValue::Text("not a foo".to_string())
    );
    Ok(())
}

#[test]
fn test_max_parameters_limit() -> Result<()> {
    let schema = test_schema();
    let mut parser = QueryParser::new("select foo from syn123 where bar in (1, 2, 3)")?;
    let query = parser.parse()?;
    SchemaResolver::new(&schema).resolve(&query)?;

    let error = TranslatingRenderer::new(&schema)
        .with_max_parameters(2)
        .render(&query)
        .unwrap_err();
    assert!(error.is_translation());
    Ok(())
}

#[test]
fn test_failed_render_returns_no_partial_sql() -> Result<()> {
    let schema = test_schema();
    // Ошибка на этапе рендеринга: вызывающий получает Err, а не усеченный SQL
    let result = translate("select foo from syn999 where foo = 'x'", &schema);
    assert!(result.is_err());
    Ok(())
}
