//! Разрешение ссылок на колонки по карте схемы
//!
//! Обходит дерево запроса, разрешая каждую ссылку на колонку по внешней
//! карте схемы: записывает тип значения на ссылке и на объемлющем
//! предикате, помечает агрегатные запросы и строит описание колонок
//! результата. Колонка результата сохраняет идентичность колонки схемы
//! только в неагрегатном запросе: у агрегированного результата нет
//! стабильной колонки-источника.

use crate::common::types::{ColumnType, SchemaMap, SelectColumn};
use crate::common::{Error, Result};
use crate::parser::ast::{
    children_of, descendants_of_tag, first_descendant, parent_of, LiteralValue, NodeHandle,
    NodeKind, NodeTag,
};
use crate::traversal::{walk, ClauseContext, Visitor, WalkContext};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Результат семантического разрешения запроса
#[derive(Debug, Clone)]
pub struct ResolvedQuery {
    /// Является ли запрос агрегатным (GROUP BY или агрегатная функция)
    pub is_aggregate: bool,
    /// Описание колонок результата
    pub select_columns: Vec<SelectColumn>,
}

/// Семантический резолвер поверх карты схемы
pub struct SchemaResolver<'a> {
    schema: &'a SchemaMap,
}

impl<'a> SchemaResolver<'a> {
    /// Создает резолвер для карты схемы
    pub fn new(schema: &'a SchemaMap) -> Self {
        Self { schema }
    }

    /// Разрешает дерево запроса
    pub fn resolve(&self, query: &NodeHandle) -> Result<ResolvedQuery> {
        let is_aggregate = is_aggregate_query(query);
        let aliases = collect_select_aliases(query);
        let json_columns = self.resolve_json_tables(query)?;

        let mut visitor = ResolveVisitor {
            schema: self.schema,
            aliases: &aliases,
            json_columns: &json_columns,
        };
        let mut ctx = WalkContext::new();
        walk(query, &mut visitor, &mut ctx)?;

        let select_columns = self.build_select_columns(query, &json_columns, is_aggregate)?;
        log::debug!(
            "resolved query: {} select columns, aggregate = {}",
            select_columns.len(),
            is_aggregate
        );

        Ok(ResolvedQuery {
            is_aggregate,
            select_columns,
        })
    }

    /// Разрешает источники JSON_TABLE и собирает объявленные колонки
    ///
    /// Источником разворачивания может быть только списочная колонка схемы.
    fn resolve_json_tables(&self, query: &NodeHandle) -> Result<IndexMap<String, ColumnType>> {
        let mut declared = IndexMap::new();

        for json_table in descendants_of_tag(query, NodeTag::JsonTable) {
            let children = children_of(&json_table);
            let source = &children[0];

            let source_name = match source.borrow().kind() {
                NodeKind::ColumnReference { name, .. } => name.clone(),
                _ => return Err(Error::internal("JSON_TABLE source is not a column")),
            };
            let column = self.schema.column(&source_name).ok_or_else(|| {
                Error::translation(format!("Unknown column: {}", source_name))
            })?;
            if !column.column_type.is_list() {
                return Err(Error::translation(format!(
                    "JSON_TABLE only works for columns that hold list values: {}",
                    source_name
                )));
            }
            source.borrow_mut().set_resolved_type(column.column_type)?;

            for declared_column in &children[1..] {
                let declared_column = declared_column.borrow();
                if let NodeKind::JsonTableColumn { name, sql_type } = declared_column.kind() {
                    declared.insert(name.clone(), declared_column_type(sql_type));
                }
            }
        }

        Ok(declared)
    }

    /// Строит описание колонок результата по списку выборки
    fn build_select_columns(
        &self,
        query: &NodeHandle,
        json_columns: &IndexMap<String, ColumnType>,
        is_aggregate: bool,
    ) -> Result<Vec<SelectColumn>> {
        let select_list = first_descendant(query, NodeTag::SelectList)
            .ok_or_else(|| Error::internal("query has no select list"))?;

        let mut columns = Vec::new();

        let wildcard = matches!(
            select_list.borrow().kind(),
            NodeKind::SelectList { wildcard: true, .. }
        );
        if wildcard {
            // SELECT * описывает каждую колонку схемы
            for model in self.schema.columns() {
                columns.push(SelectColumn {
                    name: model.name.clone(),
                    column_type: Some(model.column_type),
                    id: Some(model.id),
                });
            }
        } else {
            for derived in children_of(&select_list) {
                columns.push(self.build_select_column(&derived, json_columns)?);
            }
        }

        // Идентичность колонки схемы теряется в агрегированном результате
        // и при наличии хотя бы одной колонки без источника.
        let any_missing_id = columns.iter().any(|c| c.id.is_none());
        if is_aggregate || any_missing_id {
            for column in &mut columns {
                column.id = None;
            }
        }

        Ok(columns)
    }

    /// Строит описание одной колонки результата
    fn build_select_column(
        &self,
        derived: &NodeHandle,
        json_columns: &IndexMap<String, ColumnType>,
    ) -> Result<SelectColumn> {
        let alias = match derived.borrow().kind() {
            NodeKind::DerivedColumn { alias } => alias.clone(),
            _ => return Err(Error::internal("select list entry is not a derived column")),
        };
        let expression = children_of(derived)
            .into_iter()
            .next()
            .ok_or_else(|| Error::internal("derived column has no expression"))?;
        let kind = expression.borrow().kind().clone();

        let (display, column_type, id) = match &kind {
            NodeKind::ColumnReference { name, .. } => {
                if let Some(model) = self.schema.column(name) {
                    (name.clone(), Some(model.column_type), Some(model.id))
                } else if let Some(column_type) = json_columns.get(name) {
                    (name.clone(), Some(*column_type), None)
                } else {
                    (name.clone(), None, None)
                }
            }
            NodeKind::FunctionCall { function, .. } => {
                let argument_type = aggregate_argument_type(&expression, self.schema);
                (
                    expression.borrow().to_sql(),
                    Some(function.return_type(argument_type)),
                    None,
                )
            }
            NodeKind::Literal { value } => {
                let column_type = match value {
                    LiteralValue::Integer(_) => ColumnType::Integer,
                    LiteralValue::Decimal(_) => ColumnType::Double,
                    LiteralValue::Text(_) => ColumnType::String,
                };
                (expression.borrow().to_sql(), Some(column_type), None)
            }
            _ => (expression.borrow().to_sql(), None, None),
        };

        let name = match alias {
            Some(alias) => {
                // Идентичность сохраняется только при совпадении
                // отображаемого имени с именем колонки схемы.
                let id = if alias == display { id } else { None };
                return Ok(SelectColumn {
                    name: alias,
                    column_type,
                    id,
                });
            }
            None => display,
        };

        Ok(SelectColumn {
            name,
            column_type,
            id,
        })
    }

}

/// Проверяет, является ли запрос агрегатным
pub fn is_aggregate_query(query: &NodeHandle) -> bool {
    first_descendant(query, NodeTag::GroupByClause).is_some()
        || first_descendant(query, NodeTag::FunctionCall).is_some()
}

/// Собирает псевдонимы списка выборки
fn collect_select_aliases(query: &NodeHandle) -> HashSet<String> {
    let mut aliases = HashSet::new();
    for derived in descendants_of_tag(query, NodeTag::DerivedColumn) {
        if let NodeKind::DerivedColumn { alias: Some(alias) } = derived.borrow().kind() {
            aliases.insert(alias.clone());
        }
    }
    aliases
}

/// Тип значения объявленной колонки JSON_TABLE по ее SQL типу
pub fn declared_column_type(sql_type: &str) -> ColumnType {
    let base = sql_type
        .split('(')
        .next()
        .unwrap_or(sql_type)
        .trim()
        .to_uppercase();
    match base.as_str() {
        "INT" | "INTEGER" | "BIGINT" | "SMALLINT" => ColumnType::Integer,
        "DOUBLE" | "FLOAT" | "REAL" | "DECIMAL" | "NUMERIC" => ColumnType::Double,
        "BOOLEAN" | "BOOL" => ColumnType::Boolean,
        "DATE" | "TIMESTAMP" => ColumnType::Date,
        _ => ColumnType::String,
    }
}

/// Посетитель, разрешающий ссылки на колонки
struct ResolveVisitor<'a> {
    schema: &'a SchemaMap,
    aliases: &'a HashSet<String>,
    json_columns: &'a IndexMap<String, ColumnType>,
}

impl ResolveVisitor<'_> {
    /// Ищет тип колонки по логическому имени (схема, затем колонки JSON_TABLE)
    fn lookup_type(&self, name: &str) -> Option<ColumnType> {
        self.schema
            .column(name)
            .map(|model| model.column_type)
            .or_else(|| self.json_columns.get(name).copied())
    }
}

impl Visitor for ResolveVisitor<'_> {
    fn enter(&mut self, node: &NodeHandle, ctx: &mut WalkContext) -> Result<()> {
        let tag = node.borrow().tag();
        match tag {
            NodeTag::ColumnReference => {
                // Источник JSON_TABLE разрешен отдельным проходом
                if let Some(parent) = parent_of(node) {
                    if parent.borrow().tag() == NodeTag::JsonTable {
                        return Ok(());
                    }
                }

                let (name, qualifier) = match node.borrow().kind() {
                    NodeKind::ColumnReference {
                        name, qualifier, ..
                    } => (name.clone(), qualifier.clone()),
                    _ => unreachable!(),
                };

                // ORDER BY может ссылаться на псевдоним списка выборки
                if ctx.current_clause() == Some(ClauseContext::OrderBy)
                    && qualifier.is_none()
                    && self.aliases.contains(&name)
                {
                    return Ok(());
                }

                match self.lookup_type(&name) {
                    Some(column_type) => node.borrow_mut().set_resolved_type(column_type)?,
                    None => {
                        return Err(Error::translation(format!("Unknown column: {}", name)));
                    }
                }
                Ok(())
            }
            NodeTag::Comparison | NodeTag::InPredicate | NodeTag::LikePredicate => {
                // Тип сравнения определяется левым операндом
                let left = children_of(node).into_iter().next();
                let lhs_type = left.and_then(|left| {
                    let left = left.borrow();
                    match left.kind() {
                        NodeKind::ColumnReference { name, .. } => self.lookup_type(name),
                        _ => None,
                    }
                });
                // Для списочных колонок значения сравниваются с элементами
                let lhs_type = lhs_type.map(|t| t.non_list());
                if let Some(column_type) = lhs_type {
                    node.borrow_mut().set_resolved_type(column_type)?;
                }
                ctx.set_lhs(lhs_type)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn leave(&mut self, node: &NodeHandle, ctx: &mut WalkContext) -> Result<()> {
        let tag = node.borrow().tag();
        if matches!(
            tag,
            NodeTag::Comparison | NodeTag::InPredicate | NodeTag::LikePredicate
        ) {
            ctx.clear_lhs()?;
        }
        Ok(())
    }
}

/// Тип первого аргумента агрегатной функции по карте схемы
pub fn aggregate_argument_type(
    function: &NodeHandle,
    schema: &SchemaMap,
) -> Option<ColumnType> {
    let argument = children_of(function).into_iter().next()?;
    let argument = argument.borrow();
    match argument.kind() {
        NodeKind::ColumnReference { name, .. } => {
            schema.column(name).map(|model| model.column_type)
        }
        _ => None,
    }
}
