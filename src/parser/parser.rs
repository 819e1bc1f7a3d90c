//! Парсер запросов для tablesql
//!
//! Рекурсивный нисходящий парсер, строящий синтаксическое дерево из
//! последовательности токенов. Ссылки на таблицы разбираются
//! лево-ассоциативно, поэтому цепочка соединений дает лево-вложенную
//! структуру. Ошибки парсинга несут позицию в исходном тексте.

use crate::common::config::CompilerConfig;
use crate::common::constants::{
    DEFAULT_MAX_QUERY_LENGTH, DEFAULT_MAX_RECURSION_DEPTH, JSON_LEAF_PATH, JSON_UNNEST_PATH,
};
use crate::common::{Error, Result};
use crate::parser::ast::*;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenType};

/// Настройки парсера
#[derive(Debug, Clone)]
pub struct ParserSettings {
    /// Максимальная глубина рекурсии при разборе условий
    pub max_recursion_depth: usize,
    /// Максимальная длина текста запроса (в символах)
    pub max_query_length: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
        }
    }
}

impl From<&CompilerConfig> for ParserSettings {
    fn from(config: &CompilerConfig) -> Self {
        Self {
            max_recursion_depth: config.parser.max_recursion_depth,
            max_query_length: config.parser.max_query_length,
        }
    }
}

/// Рекурсивный нисходящий парсер запросов
pub struct QueryParser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    settings: ParserSettings,
    depth: usize,
}

impl QueryParser {
    /// Создает новый парсер для текста запроса
    pub fn new(input: &str) -> Result<Self> {
        Self::with_settings(input, ParserSettings::default())
    }

    /// Создает парсер с настройками
    pub fn with_settings(input: &str, settings: ParserSettings) -> Result<Self> {
        if input.chars().count() > settings.max_query_length {
            return Err(Error::parse(
                format!(
                    "query text exceeds the maximum length of {} characters",
                    settings.max_query_length
                ),
                &crate::parser::token::Position::start(),
            ));
        }
        let mut lexer = Lexer::new(input)?;
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            peek,
            settings,
            depth: 0,
        })
    }

    /// Получает настройки парсера
    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Парсит полный запрос и проверяет, что текст исчерпан
    pub fn parse(&mut self) -> Result<NodeHandle> {
        let query = self.parse_query_specification()?;
        if self.match_token(TokenType::Semicolon) {
            self.advance()?;
        }
        if !self.match_token(TokenType::Eof) {
            return Err(self.unexpected("end of query"));
        }
        Ok(query)
    }

    /// Парсит спецификацию запроса: SELECT ... FROM ... [клаузулы]
    fn parse_query_specification(&mut self) -> Result<NodeHandle> {
        self.expect_token(TokenType::Select)?;

        let mut children = Vec::new();
        children.push(self.parse_select_list()?);

        self.expect_token(TokenType::From)?;
        children.push(Node::with_children(
            NodeKind::FromClause,
            vec![self.parse_table_reference()?],
        ));

        if self.match_token(TokenType::Where) {
            self.advance()?;
            let condition = self.parse_search_condition()?;
            children.push(Node::with_children(NodeKind::WhereClause, vec![condition]));
        }

        if self.match_token(TokenType::Group) {
            self.advance()?;
            self.expect_token(TokenType::By)?;
            let mut columns = vec![self.parse_column_reference()?];
            while self.match_token(TokenType::Comma) {
                self.advance()?;
                columns.push(self.parse_column_reference()?);
            }
            children.push(Node::with_children(NodeKind::GroupByClause, columns));
        }

        if self.match_token(TokenType::Having) {
            self.advance()?;
            let condition = self.parse_search_condition()?;
            children.push(Node::with_children(NodeKind::HavingClause, vec![condition]));
        }

        if self.match_token(TokenType::Order) {
            self.advance()?;
            self.expect_token(TokenType::By)?;
            let mut specs = vec![self.parse_sort_specification()?];
            while self.match_token(TokenType::Comma) {
                self.advance()?;
                specs.push(self.parse_sort_specification()?);
            }
            children.push(Node::with_children(NodeKind::OrderByClause, specs));
        }

        if self.match_token(TokenType::Limit) {
            self.advance()?;
            let limit = self.parse_unsigned_integer()?;
            let offset = if self.match_token(TokenType::Offset) {
                self.advance()?;
                Some(self.parse_unsigned_integer()?)
            } else {
                None
            };
            children.push(Node::new(NodeKind::Pagination { limit, offset }));
        }

        Ok(Node::with_children(NodeKind::Query, children))
    }

    /// Парсит список выборки
    fn parse_select_list(&mut self) -> Result<NodeHandle> {
        let distinct = if self.match_token(TokenType::Distinct) {
            self.advance()?;
            true
        } else {
            false
        };

        if self.match_token(TokenType::Asterisk) {
            self.advance()?;
            return Ok(Node::new(NodeKind::SelectList {
                distinct,
                wildcard: true,
            }));
        }

        let mut columns = vec![self.parse_derived_column()?];
        while self.match_token(TokenType::Comma) {
            self.advance()?;
            columns.push(self.parse_derived_column()?);
        }

        Ok(Node::with_children(
            NodeKind::SelectList {
                distinct,
                wildcard: false,
            },
            columns,
        ))
    }

    /// Парсит элемент списка выборки с опциональным псевдонимом
    fn parse_derived_column(&mut self) -> Result<NodeHandle> {
        let expression = self.parse_value_expression()?;
        let alias = if self.match_token(TokenType::As) {
            self.advance()?;
            Some(self.expect_identifier()?)
        } else {
            None
        };
        Ok(Node::with_children(
            NodeKind::DerivedColumn { alias },
            vec![expression],
        ))
    }

    /// Парсит выражение значения: агрегатная функция, колонка или литерал
    fn parse_value_expression(&mut self) -> Result<NodeHandle> {
        self.parse_operand()
    }

    /// Парсит вызов агрегатной функции
    fn parse_aggregate_function(&mut self) -> Result<NodeHandle> {
        let function = match self.current.token_type {
            TokenType::Count => AggregateFunction::Count,
            TokenType::Sum => AggregateFunction::Sum,
            TokenType::Avg => AggregateFunction::Avg,
            TokenType::Min => AggregateFunction::Min,
            TokenType::Max => AggregateFunction::Max,
            _ => return Err(self.unexpected("aggregate function")),
        };
        self.advance()?;
        self.expect_token(TokenType::LeftParen)?;

        if self.match_token(TokenType::Asterisk) {
            if function != AggregateFunction::Count {
                return Err(self.unexpected("expression"));
            }
            self.advance()?;
            self.expect_token(TokenType::RightParen)?;
            return Ok(Node::new(NodeKind::FunctionCall {
                function,
                distinct: false,
                star: true,
            }));
        }

        let distinct = if self.match_token(TokenType::Distinct) {
            self.advance()?;
            true
        } else {
            false
        };
        let argument = self.parse_operand()?;
        self.expect_token(TokenType::RightParen)?;

        Ok(Node::with_children(
            NodeKind::FunctionCall {
                function,
                distinct,
                star: false,
            },
            vec![argument],
        ))
    }

    /// Парсит ссылку на таблицу с цепочкой соединений (лево-ассоциативно)
    fn parse_table_reference(&mut self) -> Result<NodeHandle> {
        let factor = self.parse_table_factor()?;
        let mut reference = Node::with_children(NodeKind::TableReference, vec![factor]);

        loop {
            let kind = if self.match_token(TokenType::Inner) {
                self.advance()?;
                self.expect_token(TokenType::Join)?;
                Some(JoinKind::Inner)
            } else if self.match_token(TokenType::Left) {
                self.advance()?;
                let kind = if self.match_token(TokenType::Outer) {
                    self.advance()?;
                    JoinKind::LeftOuter
                } else {
                    JoinKind::Left
                };
                self.expect_token(TokenType::Join)?;
                Some(kind)
            } else if self.match_token(TokenType::Right) {
                self.advance()?;
                let kind = if self.match_token(TokenType::Outer) {
                    self.advance()?;
                    JoinKind::RightOuter
                } else {
                    JoinKind::Right
                };
                self.expect_token(TokenType::Join)?;
                Some(kind)
            } else if self.match_token(TokenType::Join) {
                self.advance()?;
                None
            } else {
                break;
            };

            let right_factor = self.parse_table_factor()?;
            let right = Node::with_children(NodeKind::TableReference, vec![right_factor]);

            // Явное соединение всегда требует условия ON
            self.expect_token(TokenType::On)?;
            let condition = Node::with_children(
                NodeKind::JoinCondition,
                vec![self.parse_search_condition()?],
            );

            let join = Node::with_children(
                NodeKind::Join { kind },
                vec![reference, right, condition],
            );
            reference = Node::with_children(NodeKind::TableReference, vec![join]);
        }

        Ok(reference)
    }

    /// Парсит одиночный источник таблицы: именованную таблицу или JSON_TABLE
    fn parse_table_factor(&mut self) -> Result<NodeHandle> {
        if self.match_contextual_keyword("JSON_TABLE") {
            return self.parse_json_table();
        }

        let name = self.expect_identifier()?;
        let alias = if self.match_token(TokenType::As) {
            self.advance()?;
            Some(TableAlias {
                name: self.expect_identifier()?,
                with_as: true,
            })
        } else if self.match_token(TokenType::Identifier) {
            Some(TableAlias {
                name: self.expect_identifier()?,
                with_as: false,
            })
        } else {
            None
        };

        Ok(Node::new(NodeKind::TableName { name, alias }))
    }

    /// Парсит конструкцию разворачивания JSON массива
    ///
    /// Путь разворачивания и листовой путь колонок фиксированы; маркер
    /// строгой обработки принимается во входном тексте и всегда
    /// присутствует в каноническом рендеринге.
    fn parse_json_table(&mut self) -> Result<NodeHandle> {
        self.advance()?; // JSON_TABLE
        self.expect_token(TokenType::LeftParen)?;

        let source = self.parse_column_reference()?;
        self.expect_token(TokenType::Comma)?;

        if self.match_token(TokenType::StringLiteral) {
            if self.current.value != JSON_UNNEST_PATH {
                return Err(Error::parse(
                    format!("expected '{}' unnesting path", JSON_UNNEST_PATH),
                    &self.current.position,
                ));
            }
            self.advance()?;
        }

        self.expect_contextual_keyword("COLUMNS")?;
        self.expect_token(TokenType::LeftParen)?;

        let mut children = vec![source];
        children.push(self.parse_json_table_column()?);
        while self.match_token(TokenType::Comma) {
            self.advance()?;
            children.push(self.parse_json_table_column()?);
        }

        self.expect_token(TokenType::RightParen)?;
        self.expect_token(TokenType::RightParen)?;

        let alias = if self.match_token(TokenType::As) {
            self.advance()?;
            Some(self.expect_identifier()?)
        } else if self.match_token(TokenType::Identifier) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        Ok(Node::with_children(NodeKind::JsonTable { alias }, children))
    }

    /// Парсит объявление выходной колонки JSON_TABLE
    fn parse_json_table_column(&mut self) -> Result<NodeHandle> {
        let name = self.expect_identifier()?;
        let mut sql_type = self.expect_identifier()?.to_uppercase();

        if self.match_token(TokenType::LeftParen) {
            self.advance()?;
            let mut arguments = vec![self.parse_unsigned_integer()?.to_string()];
            while self.match_token(TokenType::Comma) {
                self.advance()?;
                arguments.push(self.parse_unsigned_integer()?.to_string());
            }
            self.expect_token(TokenType::RightParen)?;
            sql_type = format!("{}({})", sql_type, arguments.join(","));
        }

        if self.match_contextual_keyword("PATH") {
            self.advance()?;
            if !self.match_token(TokenType::StringLiteral) {
                return Err(self.unexpected("column path string"));
            }
            if self.current.value != JSON_LEAF_PATH {
                return Err(Error::parse(
                    format!("expected '{}' column path", JSON_LEAF_PATH),
                    &self.current.position,
                ));
            }
            self.advance()?;
        }

        if self.match_contextual_keyword("ERROR") {
            self.advance()?;
            self.expect_token(TokenType::On)?;
            self.expect_contextual_keyword("ERROR")?;
        }

        Ok(Node::new(NodeKind::JsonTableColumn { name, sql_type }))
    }

    /// Парсит условие поиска: дизъюнкция термов
    fn parse_search_condition(&mut self) -> Result<NodeHandle> {
        self.enter_recursion()?;
        let mut left = self.parse_boolean_term()?;
        while self.match_token(TokenType::Or) {
            self.advance()?;
            let right = self.parse_boolean_term()?;
            left = Node::with_children(
                NodeKind::BooleanOp {
                    op: BooleanOperator::Or,
                },
                vec![left, right],
            );
        }
        self.leave_recursion();
        Ok(left)
    }

    /// Парсит терм: конъюнкция факторов
    fn parse_boolean_term(&mut self) -> Result<NodeHandle> {
        let mut left = self.parse_boolean_factor()?;
        while self.match_token(TokenType::And) {
            self.advance()?;
            let right = self.parse_boolean_factor()?;
            left = Node::with_children(
                NodeKind::BooleanOp {
                    op: BooleanOperator::And,
                },
                vec![left, right],
            );
        }
        Ok(left)
    }

    /// Парсит фактор: опциональное отрицание первичного выражения
    fn parse_boolean_factor(&mut self) -> Result<NodeHandle> {
        if self.match_token(TokenType::Not) {
            self.advance()?;
            let inner = self.parse_boolean_primary()?;
            return Ok(Node::with_children(NodeKind::NotExpr, vec![inner]));
        }
        self.parse_boolean_primary()
    }

    /// Парсит первичное булево выражение: скобки или предикат
    fn parse_boolean_primary(&mut self) -> Result<NodeHandle> {
        self.enter_recursion()?;
        let result = if self.match_token(TokenType::LeftParen) {
            self.advance()?;
            let inner = self.parse_search_condition()?;
            self.expect_token(TokenType::RightParen)?;
            Ok(Node::with_children(NodeKind::Grouping, vec![inner]))
        } else {
            self.parse_predicate()
        };
        self.leave_recursion();
        result
    }

    /// Парсит предикат
    fn parse_predicate(&mut self) -> Result<NodeHandle> {
        // Булевы функции-предикаты распознаются контекстно по имени
        if let Some(function) = self.match_boolean_function() {
            self.advance()?;
            self.expect_token(TokenType::LeftParen)?;
            let column = self.parse_column_reference()?;
            self.expect_token(TokenType::RightParen)?;
            return Ok(Node::with_children(
                NodeKind::BooleanFunctionCall { function },
                vec![column],
            ));
        }

        let left = self.parse_operand()?;

        if let Some(op) = self.match_comparison_operator() {
            self.advance()?;
            let right = self.parse_operand()?;
            return Ok(Node::with_children(
                NodeKind::Comparison { op },
                vec![left, right],
            ));
        }

        if self.match_token(TokenType::Is) {
            self.advance()?;
            let negated = if self.match_token(TokenType::Not) {
                self.advance()?;
                true
            } else {
                false
            };
            self.expect_token(TokenType::Null)?;
            return Ok(Node::with_children(
                NodeKind::IsNullPredicate { negated },
                vec![left],
            ));
        }

        let negated = if self.match_token(TokenType::Not) {
            self.advance()?;
            true
        } else {
            false
        };

        if self.match_token(TokenType::In) {
            self.advance()?;
            self.expect_token(TokenType::LeftParen)?;
            let mut children = vec![left];
            children.push(self.parse_literal()?);
            while self.match_token(TokenType::Comma) {
                self.advance()?;
                children.push(self.parse_literal()?);
            }
            self.expect_token(TokenType::RightParen)?;
            return Ok(Node::with_children(
                NodeKind::InPredicate { negated },
                children,
            ));
        }

        if self.match_token(TokenType::Like) {
            self.advance()?;
            let pattern = self.parse_literal()?;
            return Ok(Node::with_children(
                NodeKind::LikePredicate { negated },
                vec![left, pattern],
            ));
        }

        Err(self.unexpected("comparison operator, IS, IN or LIKE"))
    }

    /// Парсит операнд предиката: агрегат, колонку или литерал
    ///
    /// Агрегатные функции допустимы, чтобы HAVING мог сравнивать
    /// агрегированные значения.
    fn parse_operand(&mut self) -> Result<NodeHandle> {
        if self.current.token_type.is_aggregate_function() {
            return self.parse_aggregate_function();
        }
        match self.current.token_type {
            TokenType::IntegerLiteral | TokenType::FloatLiteral | TokenType::StringLiteral => {
                self.parse_literal()
            }
            TokenType::Identifier | TokenType::QuotedIdentifier => self.parse_column_reference(),
            _ => Err(self.unexpected("column reference or literal")),
        }
    }

    /// Парсит литерал
    fn parse_literal(&mut self) -> Result<NodeHandle> {
        let value = match self.current.token_type {
            TokenType::IntegerLiteral => LiteralValue::Integer(self.current.value.clone()),
            TokenType::FloatLiteral => LiteralValue::Decimal(self.current.value.clone()),
            TokenType::StringLiteral => LiteralValue::Text(self.current.value.clone()),
            _ => return Err(self.unexpected("literal")),
        };
        self.advance()?;
        Ok(Node::literal(value))
    }

    /// Парсит ссылку на колонку, возможно квалифицированную таблицей
    fn parse_column_reference(&mut self) -> Result<NodeHandle> {
        if self.match_token(TokenType::QuotedIdentifier) {
            let name = self.current.value.clone();
            self.advance()?;
            return Ok(Node::column_reference(None, name, true));
        }

        let first = self.expect_identifier()?;

        if self.match_token(TokenType::Dot) {
            self.advance()?;
            if self.match_token(TokenType::QuotedIdentifier) {
                let name = self.current.value.clone();
                self.advance()?;
                return Ok(Node::column_reference(Some(first), name, true));
            }
            let name = self.expect_identifier()?;
            return Ok(Node::column_reference(Some(first), name, false));
        }

        Ok(Node::column_reference(None, first, false))
    }

    /// Парсит спецификацию сортировки
    fn parse_sort_specification(&mut self) -> Result<NodeHandle> {
        let expression = self.parse_value_expression()?;
        let direction = if self.match_token(TokenType::Asc) {
            self.advance()?;
            Some(SortDirection::Asc)
        } else if self.match_token(TokenType::Desc) {
            self.advance()?;
            Some(SortDirection::Desc)
        } else {
            None
        };
        Ok(Node::with_children(
            NodeKind::SortSpecification { direction },
            vec![expression],
        ))
    }

    /// Парсит беззнаковое целое число
    fn parse_unsigned_integer(&mut self) -> Result<u64> {
        if !self.match_token(TokenType::IntegerLiteral) {
            return Err(self.unexpected("integer literal"));
        }
        let value = self.current.value.parse::<u64>().map_err(|e| {
            Error::parse(format!("invalid integer: {}", e), &self.current.position)
        })?;
        self.advance()?;
        Ok(value)
    }
}

impl QueryParser {
    /// Переходит к следующему токену
    fn advance(&mut self) -> Result<()> {
        let next = self.lexer.next_token()?;
        self.current = std::mem::replace(&mut self.peek, next);
        Ok(())
    }

    /// Проверяет, соответствует ли текущий токен ожидаемому типу
    fn match_token(&self, token_type: TokenType) -> bool {
        self.current.token_type == token_type
    }

    /// Проверяет, является ли текущий токен контекстным ключевым словом
    ///
    /// Контекстные слова (JSON_TABLE, COLUMNS, PATH, ERROR) не
    /// зарезервированы и приходят от лексера как идентификаторы.
    fn match_contextual_keyword(&self, keyword: &str) -> bool {
        self.current.token_type == TokenType::Identifier
            && self.current.value.eq_ignore_ascii_case(keyword)
    }

    /// Распознает контекстное имя булевой функции перед скобкой
    fn match_boolean_function(&self) -> Option<BooleanFunction> {
        if self.current.token_type != TokenType::Identifier
            || self.peek.token_type != TokenType::LeftParen
        {
            return None;
        }
        match self.current.value.to_uppercase().as_str() {
            "ISNAN" => Some(BooleanFunction::IsNaN),
            "ISINFINITY" => Some(BooleanFunction::IsInfinity),
            _ => None,
        }
    }

    /// Распознает оператор сравнения
    fn match_comparison_operator(&self) -> Option<ComparisonOp> {
        match self.current.token_type {
            TokenType::Equal => Some(ComparisonOp::Equal),
            TokenType::NotEqual => Some(ComparisonOp::NotEqual),
            TokenType::Less => Some(ComparisonOp::Less),
            TokenType::Greater => Some(ComparisonOp::Greater),
            TokenType::LessEqual => Some(ComparisonOp::LessEqual),
            TokenType::GreaterEqual => Some(ComparisonOp::GreaterEqual),
            _ => None,
        }
    }

    /// Ожидает определенный токен и переходит к следующему
    fn expect_token(&mut self, expected: TokenType) -> Result<()> {
        if self.match_token(expected) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected(describe_token(expected)))
        }
    }

    /// Ожидает контекстное ключевое слово
    fn expect_contextual_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.match_contextual_keyword(keyword) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected(keyword))
        }
    }

    /// Ожидает идентификатор и возвращает его значение
    fn expect_identifier(&mut self) -> Result<String> {
        if self.match_token(TokenType::Identifier) {
            let value = self.current.value.clone();
            self.advance()?;
            Ok(value)
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// Формирует ошибку о неожиданном токене
    fn unexpected(&self, expected: &str) -> Error {
        let found = if self.current.token_type == TokenType::Eof {
            "end of input".to_string()
        } else {
            format!("'{}'", self.current.value)
        };
        Error::parse(
            format!("expected {}, found {}", expected, found),
            &self.current.position,
        )
    }

    /// Входит в рекурсивный разбор, проверяя ограничение глубины
    fn enter_recursion(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.settings.max_recursion_depth {
            return Err(Error::parse(
                "maximum expression nesting depth exceeded",
                &self.current.position,
            ));
        }
        Ok(())
    }

    /// Выходит из рекурсивного разбора
    fn leave_recursion(&mut self) {
        self.depth -= 1;
    }
}

/// Человекочитаемое имя типа токена для сообщений об ошибках
fn describe_token(token_type: TokenType) -> &'static str {
    match token_type {
        TokenType::Select => "SELECT",
        TokenType::Distinct => "DISTINCT",
        TokenType::From => "FROM",
        TokenType::Where => "WHERE",
        TokenType::Group => "GROUP",
        TokenType::Having => "HAVING",
        TokenType::Order => "ORDER",
        TokenType::By => "BY",
        TokenType::Asc => "ASC",
        TokenType::Desc => "DESC",
        TokenType::Limit => "LIMIT",
        TokenType::Offset => "OFFSET",
        TokenType::Join => "JOIN",
        TokenType::Inner => "INNER",
        TokenType::Left => "LEFT",
        TokenType::Right => "RIGHT",
        TokenType::Outer => "OUTER",
        TokenType::On => "ON",
        TokenType::And => "AND",
        TokenType::Or => "OR",
        TokenType::Not => "NOT",
        TokenType::In => "IN",
        TokenType::Is => "IS",
        TokenType::Null => "NULL",
        TokenType::Like => "LIKE",
        TokenType::Count => "COUNT",
        TokenType::Sum => "SUM",
        TokenType::Avg => "AVG",
        TokenType::Min => "MIN",
        TokenType::Max => "MAX",
        TokenType::As => "AS",
        TokenType::Identifier => "identifier",
        TokenType::QuotedIdentifier => "quoted identifier",
        TokenType::StringLiteral => "string literal",
        TokenType::IntegerLiteral => "integer literal",
        TokenType::FloatLiteral => "numeric literal",
        TokenType::Equal => "=",
        TokenType::NotEqual => "<>",
        TokenType::Less => "<",
        TokenType::Greater => ">",
        TokenType::LessEqual => "<=",
        TokenType::GreaterEqual => ">=",
        TokenType::LeftParen => "(",
        TokenType::RightParen => ")",
        TokenType::Comma => ",",
        TokenType::Semicolon => ";",
        TokenType::Dot => ".",
        TokenType::Asterisk => "*",
        TokenType::Eof => "end of input",
        TokenType::Unknown => "token",
    }
}
