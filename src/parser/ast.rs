//! Синтаксическое дерево запросов для tablesql
//!
//! Дерево состоит из закрытого набора видов узлов ([`NodeKind`]). Каждый узел
//! владеет своими детьми и несет невладеющую обратную ссылку на родителя,
//! используемую только для навигации вверх. Единственная структурная
//! мутация после построения — [`replace_element`].

use crate::common::constants::{JSON_LEAF_PATH, JSON_STRICT_MARKER, JSON_UNNEST_PATH};
use crate::common::types::ColumnType;
use crate::common::utils::{quote_identifier, quote_string_literal};
use crate::common::{Error, Result};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Владеющая ссылка на узел дерева
pub type NodeHandle = Rc<RefCell<Node>>;

/// Невладеющая ссылка на родителя
type ParentLink = Weak<RefCell<Node>>;

/// Вид соединения таблиц
///
/// Отсутствие вида (голое `JOIN`) семантически эквивалентно `INNER`,
/// но при рендеринге сохраняется форма исходного текста.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    LeftOuter,
    Right,
    RightOuter,
}

impl JoinKind {
    /// Ключевое слово вида соединения в каноническом регистре
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::LeftOuter => "LEFT OUTER",
            JoinKind::Right => "RIGHT",
            JoinKind::RightOuter => "RIGHT OUTER",
        }
    }
}

/// Оператор сравнения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl ComparisonOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "<>",
            ComparisonOp::Less => "<",
            ComparisonOp::Greater => ">",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::GreaterEqual => ">=",
        }
    }
}

/// Логический оператор
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperator {
    And,
    Or,
}

impl BooleanOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
        }
    }
}

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Агрегатная функция
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }

    /// Тип результата функции для колонки данного типа
    pub fn return_type(&self, argument_type: Option<ColumnType>) -> ColumnType {
        match self {
            AggregateFunction::Count => ColumnType::Integer,
            AggregateFunction::Avg => ColumnType::Double,
            AggregateFunction::Sum | AggregateFunction::Min | AggregateFunction::Max => {
                argument_type.unwrap_or(ColumnType::Double)
            }
        }
    }
}

/// Булева функция-предикат над колонкой
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanFunction {
    IsNaN,
    IsInfinity,
}

impl BooleanFunction {
    pub fn name(&self) -> &'static str {
        match self {
            BooleanFunction::IsNaN => "ISNAN",
            BooleanFunction::IsInfinity => "ISINFINITY",
        }
    }
}

/// Псевдоним таблицы с признаком наличия ключевого слова AS в исходном тексте
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAlias {
    pub name: String,
    pub with_as: bool,
}

/// Литеральное значение с сохраненной лексической формой
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Целое число (лексема)
    Integer(String),
    /// Десятичное число (лексема)
    Decimal(String),
    /// Строка в одинарных кавычках (без кавычек)
    Text(String),
}

impl LiteralValue {
    fn to_sql(&self) -> String {
        match self {
            LiteralValue::Integer(lexeme) | LiteralValue::Decimal(lexeme) => lexeme.clone(),
            LiteralValue::Text(value) => quote_string_literal(value),
        }
    }

    /// Лексема значения без кавычек
    pub fn lexeme(&self) -> &str {
        match self {
            LiteralValue::Integer(lexeme)
            | LiteralValue::Decimal(lexeme)
            | LiteralValue::Text(lexeme) => lexeme,
        }
    }
}

/// Вид узла синтаксического дерева (закрытый набор)
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Корень запроса; дети: SelectList, FromClause и опциональные клаузулы
    Query,
    /// Список выборки; дети: DerivedColumn*
    SelectList { distinct: bool, wildcard: bool },
    /// Элемент списка выборки; ребенок: выражение значения
    DerivedColumn { alias: Option<String> },
    /// FROM клаузула; ребенок: TableReference
    FromClause,
    /// Ссылка на таблицу; ребенок: TableName, Join или JsonTable
    TableReference,
    /// Именованная таблица с опциональным псевдонимом
    TableName {
        name: String,
        alias: Option<TableAlias>,
    },
    /// Соединение; дети: TableReference (левый), TableReference (правый),
    /// JoinCondition
    Join { kind: Option<JoinKind> },
    /// Условие соединения; ребенок: булево выражение
    JoinCondition,
    /// Конструкция разворачивания JSON массива в строки;
    /// дети: ColumnReference (источник), JsonTableColumn+
    JsonTable { alias: Option<String> },
    /// Объявленная колонка JSON_TABLE (лист)
    JsonTableColumn { name: String, sql_type: String },
    /// Ссылка на колонку (лист)
    ColumnReference {
        qualifier: Option<String>,
        name: String,
        quoted: bool,
    },
    /// Литерал (лист)
    Literal { value: LiteralValue },
    /// Вызов агрегатной функции; дети: аргументы
    FunctionCall {
        function: AggregateFunction,
        distinct: bool,
        star: bool,
    },
    /// Булева функция-предикат; ребенок: ColumnReference
    BooleanFunctionCall { function: BooleanFunction },
    /// Сравнение; дети: левый и правый операнды
    Comparison { op: ComparisonOp },
    /// IS NULL / IS NOT NULL; ребенок: операнд
    IsNullPredicate { negated: bool },
    /// IN предикат; дети: операнд, значения списка
    InPredicate { negated: bool },
    /// LIKE предикат; дети: операнд, шаблон
    LikePredicate { negated: bool },
    /// AND / OR; дети: левое и правое выражения
    BooleanOp { op: BooleanOperator },
    /// NOT; ребенок: выражение
    NotExpr,
    /// Выражение в скобках; ребенок: выражение
    Grouping,
    /// WHERE клаузула; ребенок: булево выражение
    WhereClause,
    /// GROUP BY клаузула; дети: ColumnReference*
    GroupByClause,
    /// HAVING клаузула; ребенок: булево выражение
    HavingClause,
    /// ORDER BY клаузула; дети: SortSpecification*
    OrderByClause,
    /// Спецификация сортировки; ребенок: выражение
    SortSpecification { direction: Option<SortDirection> },
    /// LIMIT / OFFSET (лист)
    Pagination { limit: u64, offset: Option<u64> },
}

/// Тег вида узла для типизированных запросов по дереву
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag {
    Query,
    SelectList,
    DerivedColumn,
    FromClause,
    TableReference,
    TableName,
    Join,
    JoinCondition,
    JsonTable,
    JsonTableColumn,
    ColumnReference,
    Literal,
    FunctionCall,
    BooleanFunctionCall,
    Comparison,
    IsNullPredicate,
    InPredicate,
    LikePredicate,
    BooleanOp,
    NotExpr,
    Grouping,
    WhereClause,
    GroupByClause,
    HavingClause,
    OrderByClause,
    SortSpecification,
    Pagination,
}

/// Узел синтаксического дерева
#[derive(Debug)]
pub struct Node {
    kind: NodeKind,
    children: Vec<NodeHandle>,
    parent: ParentLink,
    resolved_type: Option<ColumnType>,
}

impl Node {
    /// Создает узел без детей
    pub fn new(kind: NodeKind) -> NodeHandle {
        Rc::new(RefCell::new(Self {
            kind,
            children: Vec::new(),
            parent: Weak::new(),
            resolved_type: None,
        }))
    }

    /// Создает узел с детьми, устанавливая обратные ссылки на родителя
    pub fn with_children(kind: NodeKind, children: Vec<NodeHandle>) -> NodeHandle {
        let node = Self::new(kind);
        for child in children {
            attach_child(&node, child);
        }
        node
    }

    /// Создает узел ссылки на колонку
    pub fn column_reference(
        qualifier: Option<String>,
        name: impl Into<String>,
        quoted: bool,
    ) -> NodeHandle {
        Self::new(NodeKind::ColumnReference {
            qualifier,
            name: name.into(),
            quoted,
        })
    }

    /// Создает узел литерала
    pub fn literal(value: LiteralValue) -> NodeHandle {
        Self::new(NodeKind::Literal { value })
    }

    /// Создает ссылку на таблицу, оборачивающую именованную таблицу
    pub fn table_reference_for_name(
        name: impl Into<String>,
        alias: Option<TableAlias>,
    ) -> NodeHandle {
        Self::with_children(
            NodeKind::TableReference,
            vec![Self::new(NodeKind::TableName {
                name: name.into(),
                alias,
            })],
        )
    }

    /// Вид узла
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Тег вида узла
    pub fn tag(&self) -> NodeTag {
        match &self.kind {
            NodeKind::Query => NodeTag::Query,
            NodeKind::SelectList { .. } => NodeTag::SelectList,
            NodeKind::DerivedColumn { .. } => NodeTag::DerivedColumn,
            NodeKind::FromClause => NodeTag::FromClause,
            NodeKind::TableReference => NodeTag::TableReference,
            NodeKind::TableName { .. } => NodeTag::TableName,
            NodeKind::Join { .. } => NodeTag::Join,
            NodeKind::JoinCondition => NodeTag::JoinCondition,
            NodeKind::JsonTable { .. } => NodeTag::JsonTable,
            NodeKind::JsonTableColumn { .. } => NodeTag::JsonTableColumn,
            NodeKind::ColumnReference { .. } => NodeTag::ColumnReference,
            NodeKind::Literal { .. } => NodeTag::Literal,
            NodeKind::FunctionCall { .. } => NodeTag::FunctionCall,
            NodeKind::BooleanFunctionCall { .. } => NodeTag::BooleanFunctionCall,
            NodeKind::Comparison { .. } => NodeTag::Comparison,
            NodeKind::IsNullPredicate { .. } => NodeTag::IsNullPredicate,
            NodeKind::InPredicate { .. } => NodeTag::InPredicate,
            NodeKind::LikePredicate { .. } => NodeTag::LikePredicate,
            NodeKind::BooleanOp { .. } => NodeTag::BooleanOp,
            NodeKind::NotExpr => NodeTag::NotExpr,
            NodeKind::Grouping => NodeTag::Grouping,
            NodeKind::WhereClause => NodeTag::WhereClause,
            NodeKind::GroupByClause => NodeTag::GroupByClause,
            NodeKind::HavingClause => NodeTag::HavingClause,
            NodeKind::OrderByClause => NodeTag::OrderByClause,
            NodeKind::SortSpecification { .. } => NodeTag::SortSpecification,
            NodeKind::Pagination { .. } => NodeTag::Pagination,
        }
    }

    /// Разрешенный тип значения узла, если установлен
    pub fn resolved_type(&self) -> Option<ColumnType> {
        self.resolved_type
    }

    /// Устанавливает разрешенный тип значения
    ///
    /// Повторная установка без явного сброса — внутренняя ошибка:
    /// она означает, что один проход разрешения посетил узел дважды.
    pub fn set_resolved_type(&mut self, column_type: ColumnType) -> Result<()> {
        if self.resolved_type.is_some() {
            return Err(Error::internal(
                "value type is already resolved for this element",
            ));
        }
        self.resolved_type = Some(column_type);
        Ok(())
    }

    /// Сбрасывает разрешенный тип значения
    pub fn reset_resolved_type(&mut self) {
        self.resolved_type = None;
    }

    /// Есть ли соединение в ссылке на таблицу
    ///
    /// Имеет смысл только для узла `TableReference`.
    pub fn has_join(&self) -> bool {
        self.children
            .first()
            .map(|c| c.borrow().tag() == NodeTag::Join)
            .unwrap_or(false)
    }

    /// Имя таблицы, если ссылка указывает на единственную именованную таблицу
    ///
    /// Возвращает `None` для соединений и производных таблиц.
    pub fn single_table_name(&self) -> Option<String> {
        let child = self.children.first()?;
        let child = child.borrow();
        match child.kind() {
            NodeKind::TableName { name, .. } => Some(name.clone()),
            _ => None,
        }
    }

    /// Рендерит узел в канонический SQL текст
    ///
    /// Рендеринг детерминирован: ключевые слова в верхнем регистре,
    /// идентификаторы в исходном виде.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    fn write_sql(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Query => {
                for (i, child) in self.children.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    child.borrow().write_sql(out);
                }
            }
            NodeKind::SelectList { distinct, wildcard } => {
                out.push_str("SELECT ");
                if *distinct {
                    out.push_str("DISTINCT ");
                }
                if *wildcard {
                    out.push('*');
                } else {
                    self.write_children_joined(out, ", ");
                }
            }
            NodeKind::DerivedColumn { alias } => {
                self.children[0].borrow().write_sql(out);
                if let Some(alias) = alias {
                    out.push_str(" AS ");
                    out.push_str(alias);
                }
            }
            NodeKind::FromClause => {
                out.push_str("FROM ");
                self.children[0].borrow().write_sql(out);
            }
            NodeKind::TableReference => {
                self.children[0].borrow().write_sql(out);
            }
            NodeKind::TableName { name, alias } => {
                out.push_str(name);
                if let Some(alias) = alias {
                    if alias.with_as {
                        out.push_str(" AS ");
                    } else {
                        out.push(' ');
                    }
                    out.push_str(&alias.name);
                }
            }
            NodeKind::Join { kind } => {
                self.children[0].borrow().write_sql(out);
                out.push(' ');
                if let Some(kind) = kind {
                    out.push_str(kind.keyword());
                    out.push(' ');
                }
                out.push_str("JOIN ");
                self.children[1].borrow().write_sql(out);
                out.push_str(" ON ");
                self.children[2].borrow().write_sql(out);
            }
            NodeKind::JoinCondition => {
                self.children[0].borrow().write_sql(out);
            }
            NodeKind::JsonTable { alias } => {
                out.push_str("JSON_TABLE(");
                self.children[0].borrow().write_sql(out);
                out.push_str(&format!(", '{}' COLUMNS(", JSON_UNNEST_PATH));
                for (i, column) in self.children[1..].iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    column.borrow().write_sql(out);
                }
                out.push_str("))");
                if let Some(alias) = alias {
                    out.push_str(" AS ");
                    out.push_str(alias);
                }
            }
            NodeKind::JsonTableColumn { name, sql_type } => {
                out.push_str(&format!(
                    "{} {} PATH '{}' {}",
                    name, sql_type, JSON_LEAF_PATH, JSON_STRICT_MARKER
                ));
            }
            NodeKind::ColumnReference {
                qualifier,
                name,
                quoted,
            } => {
                if let Some(qualifier) = qualifier {
                    out.push_str(qualifier);
                    out.push('.');
                }
                if *quoted {
                    out.push_str(&quote_identifier(name));
                } else {
                    out.push_str(name);
                }
            }
            NodeKind::Literal { value } => {
                out.push_str(&value.to_sql());
            }
            NodeKind::FunctionCall {
                function,
                distinct,
                star,
            } => {
                out.push_str(function.name());
                out.push('(');
                if *star {
                    out.push('*');
                } else {
                    if *distinct {
                        out.push_str("DISTINCT ");
                    }
                    self.write_children_joined(out, ", ");
                }
                out.push(')');
            }
            NodeKind::BooleanFunctionCall { function } => {
                out.push_str(function.name());
                out.push('(');
                self.children[0].borrow().write_sql(out);
                out.push(')');
            }
            NodeKind::Comparison { op } => {
                self.children[0].borrow().write_sql(out);
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
                self.children[1].borrow().write_sql(out);
            }
            NodeKind::IsNullPredicate { negated } => {
                self.children[0].borrow().write_sql(out);
                if *negated {
                    out.push_str(" IS NOT NULL");
                } else {
                    out.push_str(" IS NULL");
                }
            }
            NodeKind::InPredicate { negated } => {
                self.children[0].borrow().write_sql(out);
                if *negated {
                    out.push_str(" NOT");
                }
                out.push_str(" IN ( ");
                for (i, value) in self.children[1..].iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    value.borrow().write_sql(out);
                }
                out.push_str(" )");
            }
            NodeKind::LikePredicate { negated } => {
                self.children[0].borrow().write_sql(out);
                if *negated {
                    out.push_str(" NOT");
                }
                out.push_str(" LIKE ");
                self.children[1].borrow().write_sql(out);
            }
            NodeKind::BooleanOp { op } => {
                self.children[0].borrow().write_sql(out);
                out.push(' ');
                out.push_str(op.keyword());
                out.push(' ');
                self.children[1].borrow().write_sql(out);
            }
            NodeKind::NotExpr => {
                out.push_str("NOT ");
                self.children[0].borrow().write_sql(out);
            }
            NodeKind::Grouping => {
                out.push_str("( ");
                self.children[0].borrow().write_sql(out);
                out.push_str(" )");
            }
            NodeKind::WhereClause => {
                out.push_str("WHERE ");
                self.children[0].borrow().write_sql(out);
            }
            NodeKind::GroupByClause => {
                out.push_str("GROUP BY ");
                self.write_children_joined(out, ", ");
            }
            NodeKind::HavingClause => {
                out.push_str("HAVING ");
                self.children[0].borrow().write_sql(out);
            }
            NodeKind::OrderByClause => {
                out.push_str("ORDER BY ");
                self.write_children_joined(out, ", ");
            }
            NodeKind::SortSpecification { direction } => {
                self.children[0].borrow().write_sql(out);
                if let Some(direction) = direction {
                    out.push(' ');
                    out.push_str(direction.keyword());
                }
            }
            NodeKind::Pagination { limit, offset } => {
                out.push_str(&format!("LIMIT {}", limit));
                if let Some(offset) = offset {
                    out.push_str(&format!(" OFFSET {}", offset));
                }
            }
        }
    }

    fn write_children_joined(&self, out: &mut String, separator: &str) {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            child.borrow().write_sql(out);
        }
    }
}

/// Присоединяет ребенка к родителю, устанавливая обратную ссылку
pub fn attach_child(parent: &NodeHandle, child: NodeHandle) {
    child.borrow_mut().parent = Rc::downgrade(parent);
    parent.borrow_mut().children.push(child);
}

/// Возвращает детей узла
pub fn children_of(node: &NodeHandle) -> Vec<NodeHandle> {
    node.borrow().children.iter().map(Rc::clone).collect()
}

/// Возвращает родителя узла, если он есть
pub fn parent_of(node: &NodeHandle) -> Option<NodeHandle> {
    node.borrow().parent.upgrade()
}

/// Возвращает все узлы поддерева в порядке обхода сверху вниз (включая сам узел)
pub fn descendants(node: &NodeHandle) -> Vec<NodeHandle> {
    let mut result = Vec::new();
    let mut stack = vec![Rc::clone(node)];
    while let Some(current) = stack.pop() {
        let children = children_of(&current);
        result.push(current);
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    result
}

/// Ищет первый узел заданного вида в поддереве (включая сам узел)
pub fn first_descendant(node: &NodeHandle, tag: NodeTag) -> Option<NodeHandle> {
    descendants(node)
        .into_iter()
        .find(|n| n.borrow().tag() == tag)
}

/// Ищет все узлы заданного вида в поддереве
pub fn descendants_of_tag(node: &NodeHandle, tag: NodeTag) -> Vec<NodeHandle> {
    descendants(node)
        .into_iter()
        .filter(|n| n.borrow().tag() == tag)
        .collect()
}

/// Ищет ближайшего предка заданного вида, двигаясь вверх по дереву
pub fn ancestor_of_tag(node: &NodeHandle, tag: NodeTag) -> Option<NodeHandle> {
    let mut current = parent_of(node);
    while let Some(candidate) = current {
        if candidate.borrow().tag() == tag {
            return Some(candidate);
        }
        current = parent_of(&candidate);
    }
    None
}

/// Заменяет узел в дереве новым узлом
///
/// Атомарно: отсоединяет обратные ссылки детей вытесняемого узла,
/// ставит новый узел на прежнее место в списке детей прежнего родителя
/// и обнуляет ссылку на родителя у вытесненного узла. После замены
/// вытесненное поддерево полностью изолировано от живого дерева.
pub fn replace_element(old: &NodeHandle, new: &NodeHandle) -> Result<()> {
    if Rc::ptr_eq(old, new) {
        return Err(Error::internal("cannot replace an element with itself"));
    }
    let parent = old
        .borrow()
        .parent
        .upgrade()
        .ok_or_else(|| Error::internal("cannot replace an element that has no parent"))?;

    let index = parent
        .borrow()
        .children
        .iter()
        .position(|c| Rc::ptr_eq(c, old))
        .ok_or_else(|| Error::internal("parent does not own the element being replaced"))?;

    parent.borrow_mut().children[index] = Rc::clone(new);
    new.borrow_mut().parent = Rc::downgrade(&parent);

    let mut displaced = old.borrow_mut();
    displaced.parent = Weak::new();
    for child in &displaced.children {
        child.borrow_mut().parent = Weak::new();
    }
    Ok(())
}
