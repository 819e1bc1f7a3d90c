//! Фасад компиляции запроса для tablesql
//!
//! Связывает конвейер компиляции: парсинг текста запроса, семантическое
//! разрешение по карте схемы и трансляцию в физический SQL. Один экземпляр
//! соответствует одной компиляции одного запроса.

use crate::analyzer::{ResolvedQuery, SchemaResolver};
use crate::common::config::CompilerConfig;
use crate::common::types::{BoundParameter, SchemaMap, SelectColumn, TranslatedQuery};
use crate::common::Result;
use crate::parser::ast::{first_descendant, NodeHandle, NodeTag};
use crate::parser::parser::{ParserSettings, QueryParser};
use crate::translator::renderer::TranslatingRenderer;

/// Транслятор одного запроса к виртуальной таблице
#[derive(Debug)]
pub struct QueryTranslator {
    input_sql: String,
    model: NodeHandle,
    resolved: ResolvedQuery,
    translated: TranslatedQuery,
    single_table_id: Option<String>,
}

impl QueryTranslator {
    /// Компилирует запрос с конфигурацией по умолчанию
    pub fn new(sql: &str, schema: &SchemaMap) -> Result<Self> {
        Self::with_config(sql, schema, &CompilerConfig::default())
    }

    /// Компилирует запрос с заданной конфигурацией
    pub fn with_config(sql: &str, schema: &SchemaMap, config: &CompilerConfig) -> Result<Self> {
        config.validate()?;

        let mut parser = QueryParser::with_settings(sql, ParserSettings::from(config))?;
        let model = parser.parse()?;

        let resolved = SchemaResolver::new(schema).resolve(&model)?;

        let renderer = TranslatingRenderer::new(schema)
            .with_max_parameters(config.translator.max_parameters);
        let translated = renderer.render(&model)?;
        tracing::debug!(sql = %translated.sql, "translated query");

        // Запрос адресует единственную таблицу только когда FROM — голая
        // именованная таблица без соединений.
        let single_table_id = first_descendant(&model, NodeTag::TableReference)
            .and_then(|reference| reference.borrow().single_table_name());

        Ok(Self {
            input_sql: sql.to_string(),
            model,
            resolved,
            translated,
            single_table_id,
        })
    }

    /// Исходный текст запроса (до трансляции)
    pub fn input_sql(&self) -> &str {
        &self.input_sql
    }

    /// Транслированный SQL с физическими идентификаторами
    pub fn output_sql(&self) -> &str {
        &self.translated.sql
    }

    /// Упорядоченный список связанных параметров
    pub fn parameters(&self) -> &[BoundParameter] {
        &self.translated.parameters
    }

    /// Описание колонок результата
    pub fn select_columns(&self) -> &[SelectColumn] {
        &self.resolved.select_columns
    }

    /// Является ли запрос агрегатным
    pub fn is_aggregate(&self) -> bool {
        self.resolved.is_aggregate
    }

    /// Логический идентификатор таблицы, если запрос адресует одну таблицу
    pub fn single_table_id(&self) -> Option<&str> {
        self.single_table_id.as_deref()
    }

    /// Разрешенное синтаксическое дерево запроса
    pub fn model(&self) -> &NodeHandle {
        &self.model
    }

    /// Забирает результат трансляции
    pub fn into_translated(self) -> TranslatedQuery {
        self.translated
    }
}
