//! Транслирующий рендерер для tablesql
//!
//! Обходит разрешенное дерево и выпускает итоговый SQL против физического
//! хранилища: подставляет физические идентификаторы таблиц и колонок,
//! переписывает булевы функции-предикаты, регистрирует псевдонимы списка
//! выборки и параметризует каждый литерал. При любой ошибке частично
//! построенный буфер отбрасывается целиком.

use crate::common::constants::{
    BIND_PREFIX, DEFAULT_MAX_PARAMETERS, JSON_LEAF_PATH, JSON_STRICT_MARKER, JSON_UNNEST_PATH,
};
use crate::common::types::{
    BoundParameter, ColumnModel, ColumnType, ParameterValue, SchemaMap, TranslatedQuery,
};
use crate::common::{Error, Result};
use crate::parser::ast::{
    children_of, descendants_of_tag, BooleanFunction, LiteralValue, NodeHandle, NodeKind, NodeTag,
};
use crate::traversal::{clause_of, ClauseContext, WalkContext};
use std::collections::HashSet;

/// Транслирующий рендерер одной компиляции
pub struct TranslatingRenderer<'a> {
    schema: &'a SchemaMap,
    ctx: WalkContext,
    /// Псевдонимы списка выборки, видимые последующим клаузулам
    select_aliases: Vec<String>,
    /// Колонки, объявленные конструкциями JSON_TABLE
    json_columns: HashSet<String>,
    parameters: Vec<BoundParameter>,
    max_parameters: usize,
    out: String,
}

impl<'a> TranslatingRenderer<'a> {
    /// Создает рендерер для карты схемы
    pub fn new(schema: &'a SchemaMap) -> Self {
        Self {
            schema,
            ctx: WalkContext::new(),
            select_aliases: Vec::new(),
            json_columns: HashSet::new(),
            parameters: Vec::new(),
            max_parameters: DEFAULT_MAX_PARAMETERS,
            out: String::new(),
        }
    }

    /// Задает ограничение на количество связанных параметров
    pub fn with_max_parameters(mut self, max_parameters: usize) -> Self {
        self.max_parameters = max_parameters;
        self
    }

    /// Рендерит дерево запроса в физический SQL с параметрами
    ///
    /// Рендерер потребляется вызовом: при ошибке буфер уничтожается
    /// вместе с ним, и вызывающий не получает усеченного SQL.
    pub fn render(mut self, query: &NodeHandle) -> Result<TranslatedQuery> {
        for json_table in descendants_of_tag(query, NodeTag::JsonTable) {
            for declared in &children_of(&json_table)[1..] {
                if let NodeKind::JsonTableColumn { name, .. } = declared.borrow().kind() {
                    self.json_columns.insert(name.clone());
                }
            }
        }

        self.render_node(query)?;
        self.ctx.finish()?;

        Ok(TranslatedQuery {
            sql: self.out,
            parameters: self.parameters,
        })
    }

    fn render_node(&mut self, node: &NodeHandle) -> Result<()> {
        let kind = node.borrow().kind().clone();
        let clause = clause_of(node.borrow().tag());
        if let Some(clause) = clause {
            self.ctx.push_clause(clause);
        }

        let result = self.render_kind(node, &kind);

        if let Some(clause) = clause {
            // Закрываем контекст даже на ошибочном пути: буфер все равно
            // отбрасывается, а стек должен остаться согласованным.
            self.ctx.pop_clause(clause)?;
        }
        result
    }

    fn render_kind(&mut self, node: &NodeHandle, kind: &NodeKind) -> Result<()> {
        match kind {
            NodeKind::Query => {
                for (i, child) in children_of(node).iter().enumerate() {
                    if i > 0 {
                        self.out.push(' ');
                    }
                    self.render_node(child)?;
                }
                Ok(())
            }
            NodeKind::SelectList { distinct, wildcard } => {
                self.out.push_str("SELECT ");
                if *distinct {
                    self.out.push_str("DISTINCT ");
                }
                if *wildcard {
                    self.out.push('*');
                } else {
                    self.render_children_joined(node, ", ")?;
                }
                Ok(())
            }
            NodeKind::DerivedColumn { alias } => {
                self.render_node(&children_of(node)[0])?;
                if let Some(alias) = alias {
                    self.out.push_str(" AS ");
                    self.out.push_str(alias);
                    // Псевдоним регистрируется до того, как поздние клаузулы
                    // попытаются разрешаться через него.
                    self.select_aliases.push(alias.clone());
                }
                Ok(())
            }
            NodeKind::FromClause => {
                self.out.push_str("FROM ");
                self.render_node(&children_of(node)[0])
            }
            NodeKind::TableReference => self.render_node(&children_of(node)[0]),
            NodeKind::TableName { name, alias } => {
                let physical = self
                    .schema
                    .physical_table(name)
                    .ok_or_else(|| Error::translation(format!("Unknown table: {}", name)))?;
                self.out.push_str(physical);
                if let Some(alias) = alias {
                    if alias.with_as {
                        self.out.push_str(" AS ");
                    } else {
                        self.out.push(' ');
                    }
                    self.out.push_str(&alias.name);
                }
                Ok(())
            }
            NodeKind::Join { kind } => {
                let children = children_of(node);
                self.render_node(&children[0])?;
                self.out.push(' ');
                if let Some(kind) = kind {
                    self.out.push_str(kind.keyword());
                    self.out.push(' ');
                }
                self.out.push_str("JOIN ");
                self.render_node(&children[1])?;
                self.out.push_str(" ON ");
                self.render_node(&children[2])
            }
            NodeKind::JoinCondition => self.render_node(&children_of(node)[0]),
            NodeKind::JsonTable { alias } => {
                let children = children_of(node);
                self.out.push_str("JSON_TABLE(");
                self.render_node(&children[0])?;
                self.out
                    .push_str(&format!(", '{}' COLUMNS(", JSON_UNNEST_PATH));
                for (i, declared) in children[1..].iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.render_node(declared)?;
                }
                self.out.push_str("))");
                if let Some(alias) = alias {
                    self.out.push_str(" AS ");
                    self.out.push_str(alias);
                }
                Ok(())
            }
            NodeKind::JsonTableColumn { name, sql_type } => {
                // Листовой путь и маркер строгой обработки — часть
                // канонической формы конструкции, а не опция.
                self.out.push_str(&format!(
                    "{} {} PATH '{}' {}",
                    name, sql_type, JSON_LEAF_PATH, JSON_STRICT_MARKER
                ));
                Ok(())
            }
            NodeKind::ColumnReference {
                qualifier, name, ..
            } => self.render_column_reference(qualifier.as_deref(), name),
            NodeKind::Literal { value } => self.bind_literal(value),
            NodeKind::FunctionCall {
                function,
                distinct,
                star,
            } => {
                self.out.push_str(function.name());
                self.out.push('(');
                if *star {
                    self.out.push('*');
                } else {
                    if *distinct {
                        self.out.push_str("DISTINCT ");
                    }
                    self.render_children_joined(node, ", ")?;
                }
                self.out.push(')');
                Ok(())
            }
            NodeKind::BooleanFunctionCall { function } => {
                self.render_boolean_function(node, *function)
            }
            NodeKind::Comparison { op } => {
                let children = children_of(node);
                self.ctx.set_lhs(node.borrow().resolved_type())?;
                self.render_node(&children[0])?;
                self.out.push(' ');
                self.out.push_str(op.symbol());
                self.out.push(' ');
                self.render_node(&children[1])?;
                self.ctx.clear_lhs()
            }
            NodeKind::IsNullPredicate { negated } => {
                self.render_node(&children_of(node)[0])?;
                if *negated {
                    self.out.push_str(" IS NOT NULL");
                } else {
                    self.out.push_str(" IS NULL");
                }
                Ok(())
            }
            NodeKind::InPredicate { negated } => {
                let children = children_of(node);
                self.ctx.set_lhs(node.borrow().resolved_type())?;
                self.render_node(&children[0])?;
                if *negated {
                    self.out.push_str(" NOT");
                }
                self.out.push_str(" IN ( ");
                for (i, value) in children[1..].iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.render_node(value)?;
                }
                self.out.push_str(" )");
                self.ctx.clear_lhs()
            }
            NodeKind::LikePredicate { negated } => {
                let children = children_of(node);
                self.ctx.set_lhs(node.borrow().resolved_type())?;
                self.render_node(&children[0])?;
                if *negated {
                    self.out.push_str(" NOT");
                }
                self.out.push_str(" LIKE ");
                self.render_node(&children[1])?;
                self.ctx.clear_lhs()
            }
            NodeKind::BooleanOp { op } => {
                let children = children_of(node);
                self.render_node(&children[0])?;
                self.out.push(' ');
                self.out.push_str(op.keyword());
                self.out.push(' ');
                self.render_node(&children[1])
            }
            NodeKind::NotExpr => {
                self.out.push_str("NOT ");
                self.render_node(&children_of(node)[0])
            }
            NodeKind::Grouping => {
                self.out.push_str("( ");
                self.render_node(&children_of(node)[0])?;
                self.out.push_str(" )");
                Ok(())
            }
            NodeKind::WhereClause => {
                self.out.push_str("WHERE ");
                self.render_node(&children_of(node)[0])
            }
            NodeKind::GroupByClause => {
                self.out.push_str("GROUP BY ");
                self.render_children_joined(node, ", ")
            }
            NodeKind::HavingClause => {
                self.out.push_str("HAVING ");
                self.render_node(&children_of(node)[0])
            }
            NodeKind::OrderByClause => {
                self.out.push_str("ORDER BY ");
                self.render_children_joined(node, ", ")
            }
            NodeKind::SortSpecification { direction } => {
                self.render_node(&children_of(node)[0])?;
                if let Some(direction) = direction {
                    self.out.push(' ');
                    self.out.push_str(direction.keyword());
                }
                Ok(())
            }
            NodeKind::Pagination { limit, offset } => {
                self.out.push_str("LIMIT ");
                self.bind_parameter(
                    ParameterValue::Integer(*limit as i64),
                    Some(ColumnType::Integer),
                )?;
                if let Some(offset) = offset {
                    self.out.push_str(" OFFSET ");
                    self.bind_parameter(
                        ParameterValue::Integer(*offset as i64),
                        Some(ColumnType::Integer),
                    )?;
                }
                Ok(())
            }
        }
    }

    fn render_children_joined(&mut self, node: &NodeHandle, separator: &str) -> Result<()> {
        for (i, child) in children_of(node).iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            self.render_node(child)?;
        }
        Ok(())
    }

    /// Подставляет физическое имя колонки с учетом текущей клаузулы
    fn render_column_reference(&mut self, qualifier: Option<&str>, name: &str) -> Result<()> {
        // ORDER BY сперва разрешается через псевдонимы списка выборки
        if self.ctx.current_clause() == Some(ClauseContext::OrderBy)
            && qualifier.is_none()
            && self.select_aliases.iter().any(|a| a == name)
        {
            self.out.push_str(name);
            return Ok(());
        }

        // Колонки, объявленные JSON_TABLE, уже физические
        if qualifier.is_none() && self.json_columns.contains(name) {
            self.out.push_str(name);
            return Ok(());
        }

        let model = self
            .schema
            .column(name)
            .ok_or_else(|| Error::translation(format!("Unknown column: {}", name)))?;

        if let Some(qualifier) = qualifier {
            // Квалификатор-логическая таблица подставляется физическим
            // именем; прочие квалификаторы (псевдонимы) сохраняются.
            let qualifier = self
                .schema
                .physical_table(qualifier)
                .unwrap_or(qualifier);
            self.out.push_str(qualifier);
            self.out.push('.');
            self.out.push_str(&model.physical_name());
            return Ok(());
        }

        // DOUBLE вне функции в списке выборки переключается между
        // основной колонкой и колонкой специальных значений.
        if model.column_type == ColumnType::Double
            && self.ctx.current_clause() == Some(ClauseContext::SelectList)
            && !self.ctx.within_clause(ClauseContext::FunctionArguments)
        {
            self.out.push_str(&double_case_expression(model));
            return Ok(());
        }

        self.out.push_str(&model.physical_name());
        Ok(())
    }

    /// Переписывает булеву функцию-предикат в физическое условие
    fn render_boolean_function(
        &mut self,
        node: &NodeHandle,
        function: BooleanFunction,
    ) -> Result<()> {
        let column = children_of(node)
            .into_iter()
            .next()
            .ok_or_else(|| Error::internal("boolean function has no column argument"))?;
        let name = match column.borrow().kind() {
            NodeKind::ColumnReference { name, .. } => name.clone(),
            _ => {
                return Err(Error::internal(
                    "boolean function argument is not a column reference",
                ))
            }
        };

        let model = self.schema.column(&name).ok_or_else(|| {
            Error::translation(format!(
                "Function: {} has unknown reference: {}",
                function.name(),
                name
            ))
        })?;
        if model.column_type != ColumnType::Double {
            return Err(Error::translation(format!(
                "Function: {} can only be used with a column of type DOUBLE",
                function.name()
            )));
        }

        let double_column = model.double_physical_name();
        let rewritten = match function {
            BooleanFunction::IsNaN => format!(
                "( {} IS NOT NULL AND {} = 'NaN' )",
                double_column, double_column
            ),
            BooleanFunction::IsInfinity => format!(
                "( {} IS NOT NULL AND {} IN ('-Infinity', 'Infinity') )",
                double_column, double_column
            ),
        };
        self.out.push_str(&rewritten);
        Ok(())
    }

    /// Параметризует литерал с коэрцией по типу текущего левого операнда
    fn bind_literal(&mut self, value: &LiteralValue) -> Result<()> {
        let lhs_type = self.ctx.lhs_type();
        let bound = coerce_literal(value, lhs_type);
        self.bind_parameter(bound, lhs_type)
    }

    /// Выпускает связанный параметр и пишет его плейсхолдер в буфер
    fn bind_parameter(
        &mut self,
        value: ParameterValue,
        column_type: Option<ColumnType>,
    ) -> Result<()> {
        if self.parameters.len() >= self.max_parameters {
            return Err(Error::translation(format!(
                "query exceeds the maximum of {} bound parameters",
                self.max_parameters
            )));
        }
        let name = format!("{}{}", BIND_PREFIX, self.parameters.len());
        self.out.push(':');
        self.out.push_str(&name);
        self.parameters.push(BoundParameter {
            name,
            value,
            column_type,
        });
        Ok(())
    }
}

/// CASE выражение выбора между основной и специальной колонками DOUBLE
fn double_case_expression(model: &ColumnModel) -> String {
    let physical = model.physical_name();
    let double = model.double_physical_name();
    format!(
        "CASE WHEN {} IS NULL THEN {} ELSE {} END",
        double, physical, double
    )
}

/// Выбирает связанное представление литерала
///
/// Тип берется от текущего левого операнда, если он известен; иначе
/// выводится из лексической формы литерала. Неудачный разбор значения
/// откатывается к лексическому представлению.
fn coerce_literal(value: &LiteralValue, lhs_type: Option<ColumnType>) -> ParameterValue {
    let lexeme = value.lexeme();
    match lhs_type.map(|t| t.non_list()) {
        Some(ColumnType::Integer) | Some(ColumnType::Date) => lexeme
            .parse::<i64>()
            .map(ParameterValue::Integer)
            .unwrap_or_else(|_| lexical_value(value)),
        Some(ColumnType::Double) => lexeme
            .parse::<f64>()
            .map(ParameterValue::Double)
            .unwrap_or_else(|_| lexical_value(value)),
        Some(ColumnType::Boolean) => match lexeme.to_ascii_lowercase().as_str() {
            "true" => ParameterValue::Boolean(true),
            "false" => ParameterValue::Boolean(false),
            _ => lexical_value(value),
        },
        Some(ColumnType::String)
        | Some(ColumnType::StringList)
        | Some(ColumnType::IntegerList) => ParameterValue::Text(lexeme.to_string()),
        None => lexical_value(value),
    }
}

/// Связанное представление литерала по его лексической форме
fn lexical_value(value: &LiteralValue) -> ParameterValue {
    match value {
        LiteralValue::Integer(lexeme) => lexeme
            .parse::<i64>()
            .map(ParameterValue::Integer)
            .unwrap_or_else(|_| ParameterValue::Text(lexeme.clone())),
        LiteralValue::Decimal(lexeme) => lexeme
            .parse::<f64>()
            .map(ParameterValue::Double)
            .unwrap_or_else(|_| ParameterValue::Text(lexeme.clone())),
        LiteralValue::Text(lexeme) => ParameterValue::Text(lexeme.clone()),
    }
}
