//! Тесты для фасада компиляции

use crate::common::config::CompilerConfig;
use crate::common::test_utils::test_schema;
use crate::common::{Error, Result};
use crate::translator::translator::QueryTranslator;

#[test]
fn test_full_compilation() -> Result<()> {
    let schema = test_schema();
    let translator = QueryTranslator::new(
        "select foo, bar from syn123 where bar > 5 order by foo limit 10",
        &schema,
    )?;

    assert_eq!(
        translator.output_sql(),
        "SELECT _C111_, _C333_ FROM T123 WHERE _C333_ > :b0 ORDER BY _C111_ LIMIT :b1"
    );
    assert_eq!(translator.parameters().len(), 2);
    assert_eq!(
        translator.input_sql(),
        "select foo, bar from syn123 where bar > 5 order by foo limit 10"
    );
    assert!(!translator.is_aggregate());
    assert_eq!(translator.single_table_id(), Some("syn123"));

    let columns = translator.select_columns();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].id, Some(111));
    Ok(())
}

#[test]
fn test_single_table_id_absent_for_joins() -> Result<()> {
    let mut schema = test_schema();
    schema.add_table("syn456", "T456");
    let translator = QueryTranslator::new(
        "select foo from syn123 a join syn456 b on a.foo = b.bar",
        &schema,
    )?;
    assert_eq!(translator.single_table_id(), None);
    Ok(())
}

#[test]
fn test_aggregate_flag() -> Result<()> {
    let schema = test_schema();
    let translator = QueryTranslator::new("select count(*) from syn123", &schema)?;
    assert!(translator.is_aggregate());
    assert_eq!(translator.output_sql(), "SELECT COUNT(*) FROM T123");
    Ok(())
}

#[test]
fn test_parse_and_translation_errors_are_distinct() -> Result<()> {
    let schema = test_schema();

    let parse_error = QueryTranslator::new("select from syn123", &schema).unwrap_err();
    assert!(parse_error.is_parse());

    let translation_error =
        QueryTranslator::new("select nosuch from syn123", &schema).unwrap_err();
    assert!(translation_error.is_translation());
    Ok(())
}

#[test]
fn test_compilation_respects_config() -> Result<()> {
    let schema = test_schema();
    let mut config = CompilerConfig::default();
    config.parser.max_query_length = 10;

    let error =
        QueryTranslator::with_config("select foo from syn123", &schema, &config).unwrap_err();
    assert!(error.is_parse());
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() -> Result<()> {
    let schema = test_schema();
    let mut config = CompilerConfig::default();
    config.translator.max_parameters = 0;

    let error =
        QueryTranslator::with_config("select foo from syn123", &schema, &config).unwrap_err();
    assert!(matches!(error, Error::Configuration { .. }));
    Ok(())
}

#[test]
fn test_into_translated() -> Result<()> {
    let schema = test_schema();
    let translated = crate::translate("select foo from syn123 where foo = 'x'", &schema)?;
    assert_eq!(translated.sql, "SELECT _C111_ FROM T123 WHERE _C111_ = :b0");
    assert_eq!(translated.parameters.len(), 1);
    Ok(())
}
