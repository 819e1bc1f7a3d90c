//! Окружающее состояние одного прохода компиляции
//!
//! Состояние создается на каждую компиляцию и не разделяется между ними:
//! стек контекстов клаузул и однослотовый регистр текущего левого операнда
//! сравнения. Нарушение парности push/pop или set/clear — фатальная
//! внутренняя ошибка, а не тихое продолжение.

use crate::common::types::ColumnType;
use crate::common::{Error, Result};

/// Контекст клаузулы, внутри которой находится обход
///
/// Один и тот же вид узла (например, ссылка на колонку) разрешается и
/// рендерится по-разному в зависимости от объемлющей клаузулы: ORDER BY
/// видит псевдонимы списка выборки, GROUP BY — нет.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseContext {
    SelectList,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    JoinCondition,
    FunctionArguments,
}

/// Слот текущего левого операнда сравнения
#[derive(Debug, Clone, Copy, PartialEq)]
struct LhsSlot {
    column_type: Option<ColumnType>,
}

/// Окружающее состояние обхода одной компиляции
#[derive(Debug, Default)]
pub struct WalkContext {
    clause_stack: Vec<ClauseContext>,
    lhs: Option<LhsSlot>,
}

impl WalkContext {
    /// Создает пустое состояние обхода
    pub fn new() -> Self {
        Self::default()
    }

    /// Входит в клаузулу
    pub fn push_clause(&mut self, clause: ClauseContext) {
        self.clause_stack.push(clause);
    }

    /// Выходит из клаузулы, проверяя парность
    pub fn pop_clause(&mut self, expected: ClauseContext) -> Result<()> {
        match self.clause_stack.pop() {
            Some(clause) if clause == expected => Ok(()),
            Some(clause) => Err(Error::internal(format!(
                "clause stack mismatch: expected to leave {:?}, found {:?}",
                expected, clause
            ))),
            None => Err(Error::internal(
                "clause stack underflow: pop without matching push",
            )),
        }
    }

    /// Текущая (ближайшая) клаузула
    pub fn current_clause(&self) -> Option<ClauseContext> {
        self.clause_stack.last().copied()
    }

    /// Находится ли обход внутри заданной клаузулы (на любой глубине)
    pub fn within_clause(&self, clause: ClauseContext) -> bool {
        self.clause_stack.contains(&clause)
    }

    /// Глубина стека клаузул
    pub fn clause_depth(&self) -> usize {
        self.clause_stack.len()
    }

    /// Занимает слот левого операнда сравнения
    ///
    /// Грамматика не допускает вложенных сравнений, поэтому повторное
    /// занятие слота — внутренняя ошибка.
    pub fn set_lhs(&mut self, column_type: Option<ColumnType>) -> Result<()> {
        if self.lhs.is_some() {
            return Err(Error::internal(
                "left-hand operand slot is already occupied",
            ));
        }
        self.lhs = Some(LhsSlot { column_type });
        Ok(())
    }

    /// Освобождает слот левого операнда сравнения
    pub fn clear_lhs(&mut self) -> Result<()> {
        if self.lhs.is_none() {
            return Err(Error::internal("left-hand operand slot is already empty"));
        }
        self.lhs = None;
        Ok(())
    }

    /// Тип текущего левого операнда, если слот занят и тип известен
    pub fn lhs_type(&self) -> Option<ColumnType> {
        self.lhs.and_then(|slot| slot.column_type)
    }

    /// Занят ли слот левого операнда
    pub fn lhs_occupied(&self) -> bool {
        self.lhs.is_some()
    }

    /// Проверяет сбалансированность состояния по завершении обхода
    pub fn finish(&self) -> Result<()> {
        if !self.clause_stack.is_empty() {
            return Err(Error::internal(format!(
                "clause stack is not balanced at the end of the walk: {:?}",
                self.clause_stack
            )));
        }
        if self.lhs.is_some() {
            return Err(Error::internal(
                "left-hand operand slot is still occupied at the end of the walk",
            ));
        }
        Ok(())
    }
}
