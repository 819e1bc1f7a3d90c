//! Тесты для синтаксического анализатора запросов

use crate::common::Result;
use crate::parser::ast::{children_of, first_descendant, JoinKind, NodeKind, NodeTag};
use crate::parser::parser::{ParserSettings, QueryParser};

/// Разбирает запрос и возвращает канонический рендеринг
fn parse_to_sql(input: &str) -> Result<String> {
    let mut parser = QueryParser::new(input)?;
    let query = parser.parse()?;
    let sql = query.borrow().to_sql();
    Ok(sql)
}

#[test]
fn test_parse_simple_select() -> Result<()> {
    assert_eq!(parse_to_sql("select * from syn123")?, "SELECT * FROM syn123");
    Ok(())
}

#[test]
fn test_parse_select_columns_and_alias() -> Result<()> {
    assert_eq!(
        parse_to_sql("select foo, bar as b from syn123")?,
        "SELECT foo, bar AS b FROM syn123"
    );
    Ok(())
}

#[test]
fn test_parse_distinct() -> Result<()> {
    assert_eq!(
        parse_to_sql("select distinct foo from syn123")?,
        "SELECT DISTINCT foo FROM syn123"
    );
    Ok(())
}

#[test]
fn test_parse_table_alias_forms() -> Result<()> {
    // Форма псевдонима сохраняется: с AS и без
    assert_eq!(
        parse_to_sql("select * from syn123 as t")?,
        "SELECT * FROM syn123 AS t"
    );
    assert_eq!(
        parse_to_sql("select * from syn123 t")?,
        "SELECT * FROM syn123 t"
    );
    Ok(())
}

#[test]
fn test_join_keywords_normalized() -> Result<()> {
    // Для каждого вида соединения регистр нормализуется, текст сохраняется
    let cases = [
        ("inner", "INNER JOIN"),
        ("left", "LEFT JOIN"),
        ("left outer", "LEFT OUTER JOIN"),
        ("right", "RIGHT JOIN"),
        ("right outer", "RIGHT OUTER JOIN"),
    ];
    for (input_kind, rendered) in cases {
        let sql = format!("select * from a {} join b on a.x = b.x", input_kind);
        assert_eq!(
            parse_to_sql(&sql)?,
            format!("SELECT * FROM a {} b ON a.x = b.x", rendered)
        );
    }
    // Голое JOIN остается без вида
    assert_eq!(
        parse_to_sql("select * from a join b on a.x = b.x")?,
        "SELECT * FROM a JOIN b ON a.x = b.x"
    );
    Ok(())
}

#[test]
fn test_join_without_on_is_parse_error() -> Result<()> {
    let mut parser = QueryParser::new("select * from a join tableB")?;
    let error = parser.parse().unwrap_err();
    assert!(error.is_parse());
    assert!(
        error.to_string().contains("ON"),
        "сообщение должно ссылаться на ожидаемый токен ON: {}",
        error
    );
    Ok(())
}

#[test]
fn test_chained_joins_preserve_textual_order() -> Result<()> {
    // Лево-вложенная структура не меняет порядок таблиц при рендеринге
    assert_eq!(
        parse_to_sql(
            "select * from a join b on a.i = b.i inner join c on a.e = c.e left join d on a.i = d.i"
        )?,
        "SELECT * FROM a JOIN b ON a.i = b.i INNER JOIN c ON a.e = c.e LEFT JOIN d ON a.i = d.i"
    );
    Ok(())
}

#[test]
fn test_joins_nest_left_associative() -> Result<()> {
    let mut parser =
        QueryParser::new("select * from a join b on a.i = b.i inner join c on a.e = c.e")?;
    let query = parser.parse()?;

    // Внешнее соединение — INNER, его левый операнд содержит вложенное
    let outer = first_descendant(&query, NodeTag::Join).expect("соединение не найдено");
    match outer.borrow().kind() {
        NodeKind::Join { kind } => assert_eq!(*kind, Some(JoinKind::Inner)),
        _ => panic!("Ожидался узел Join"),
    }
    let left_reference = children_of(&outer)[0].clone();
    assert!(left_reference.borrow().has_join());
    Ok(())
}

#[test]
fn test_parse_where_predicates() -> Result<()> {
    assert_eq!(
        parse_to_sql("select foo from syn123 where foo = 'x' and bar > 5 or not bar is null")?,
        "SELECT foo FROM syn123 WHERE foo = 'x' AND bar > 5 OR NOT bar IS NULL"
    );
    assert_eq!(
        parse_to_sql("select foo from syn123 where ( foo = 'x' or bar <= 2 ) and bar in (1, 2)")?,
        "SELECT foo FROM syn123 WHERE ( foo = 'x' OR bar <= 2 ) AND bar IN ( 1, 2 )"
    );
    assert_eq!(
        parse_to_sql("select foo from syn123 where foo not like 'a%'")?,
        "SELECT foo FROM syn123 WHERE foo NOT LIKE 'a%'"
    );
    Ok(())
}

#[test]
fn test_parse_boolean_function_predicate() -> Result<()> {
    assert_eq!(
        parse_to_sql("select foo from syn123 where isNaN(doubletype)")?,
        "SELECT foo FROM syn123 WHERE ISNAN(doubletype)"
    );
    assert_eq!(
        parse_to_sql("select foo from syn123 where isInfinity(doubletype)")?,
        "SELECT foo FROM syn123 WHERE ISINFINITY(doubletype)"
    );
    Ok(())
}

#[test]
fn test_parse_group_having_order_limit() -> Result<()> {
    assert_eq!(
        parse_to_sql(
            "select foo, count(*) from syn123 where bar > 1 group by foo \
             having count(*) > 2 order by foo desc, bar asc limit 10 offset 5"
        )?,
        "SELECT foo, COUNT(*) FROM syn123 WHERE bar > 1 GROUP BY foo \
         HAVING COUNT(*) > 2 ORDER BY foo DESC, bar ASC LIMIT 10 OFFSET 5"
    );
    Ok(())
}

#[test]
fn test_parse_aggregate_functions() -> Result<()> {
    assert_eq!(
        parse_to_sql("select count(distinct foo), min(bar), max(bar), sum(bar), avg(bar) from syn123")?,
        "SELECT COUNT(DISTINCT foo), MIN(bar), MAX(bar), SUM(bar), AVG(bar) FROM syn123"
    );
    Ok(())
}

#[test]
fn test_count_star_only() -> Result<()> {
    let mut parser = QueryParser::new("select sum(*) from syn123")?;
    assert!(parser.parse().is_err());
    Ok(())
}

#[test]
fn test_parse_json_table_round_trip() -> Result<()> {
    assert_eq!(
        parse_to_sql(
            "select item from json_table(stringlist, '$[*]' columns(item varchar(50) path '$' error on error)) as J"
        )?,
        "SELECT item FROM JSON_TABLE(stringlist, '$[*]' COLUMNS(item VARCHAR(50) PATH '$' ERROR ON ERROR)) AS J"
    );
    // Путь и маркер строгой обработки восстанавливаются, даже если опущены
    assert_eq!(
        parse_to_sql("select item from json_table(stringlist, columns(item varchar(50)))")?,
        "SELECT item FROM JSON_TABLE(stringlist, '$[*]' COLUMNS(item VARCHAR(50) PATH '$' ERROR ON ERROR))"
    );
    Ok(())
}

#[test]
fn test_json_table_requires_columns() -> Result<()> {
    let mut parser = QueryParser::new("select item from json_table(stringlist, '$[*]' columns())")?;
    let error = parser.parse().unwrap_err();
    assert!(error.is_parse());
    Ok(())
}

#[test]
fn test_json_table_rejects_other_paths() -> Result<()> {
    let mut parser = QueryParser::new(
        "select item from json_table(stringlist, '$.a' columns(item varchar(50)))",
    )?;
    let error = parser.parse().unwrap_err();
    assert!(error.is_parse());
    assert!(error.to_string().contains("$[*]"));
    Ok(())
}

#[test]
fn test_parse_quoted_column() -> Result<()> {
    assert_eq!(
        parse_to_sql("select \"has space\" from syn123")?,
        "SELECT \"has space\" FROM syn123"
    );
    Ok(())
}

#[test]
fn test_parse_error_carries_position() -> Result<()> {
    let mut parser = QueryParser::new("select from syn123")?;
    let error = parser.parse().unwrap_err();
    match error {
        crate::common::Error::Parse { line, column, .. } => {
            assert_eq!(line, 1);
            assert!(column > 1);
        }
        other => panic!("Ожидалась ошибка парсинга, получено: {:?}", other),
    }
    Ok(())
}

#[test]
fn test_trailing_tokens_rejected() -> Result<()> {
    let mut parser = QueryParser::new("select foo from syn123 extra")?;
    assert!(parser.parse().is_err());
    Ok(())
}

#[test]
fn test_trailing_semicolon_accepted() -> Result<()> {
    assert_eq!(
        parse_to_sql("select foo from syn123;")?,
        "SELECT foo FROM syn123"
    );
    Ok(())
}

#[test]
fn test_recursion_depth_limit() -> Result<()> {
    let settings = ParserSettings {
        max_recursion_depth: 5,
        ..ParserSettings::default()
    };
    let mut parser = QueryParser::with_settings(
        "select foo from syn123 where ((((( foo = 1 )))))",
        settings,
    )?;
    let error = parser.parse().unwrap_err();
    assert!(error.is_parse());
    assert!(error.to_string().contains("depth"));
    Ok(())
}

#[test]
fn test_query_length_limit() -> Result<()> {
    let settings = ParserSettings {
        max_query_length: 10,
        ..ParserSettings::default()
    };
    assert!(QueryParser::with_settings("select foo from syn123", settings).is_err());
    Ok(())
}
