//! Обобщенный обход синтаксического дерева
//!
//! Обходит дерево сверху вниз, вызывая обратные вызовы посетителя на входе
//! и выходе из каждого узла. Клаузульные узлы автоматически открывают и
//! закрывают контекст в [`WalkContext`], поэтому стек сбалансирован по
//! построению, а проверяемые pop выявляют некорректных посетителей.

use crate::common::Result;
use crate::parser::ast::{children_of, NodeHandle, NodeTag};
use crate::traversal::context::{ClauseContext, WalkContext};

/// Посетитель узлов дерева
pub trait Visitor {
    /// Вызывается при входе в узел (до обхода детей)
    fn enter(&mut self, node: &NodeHandle, ctx: &mut WalkContext) -> Result<()>;

    /// Вызывается при выходе из узла (после обхода детей)
    fn leave(&mut self, _node: &NodeHandle, _ctx: &mut WalkContext) -> Result<()> {
        Ok(())
    }
}

/// Сопоставляет клаузульный узел контексту клаузулы
pub fn clause_of(tag: NodeTag) -> Option<ClauseContext> {
    match tag {
        NodeTag::SelectList => Some(ClauseContext::SelectList),
        NodeTag::FromClause => Some(ClauseContext::From),
        NodeTag::WhereClause => Some(ClauseContext::Where),
        NodeTag::GroupByClause => Some(ClauseContext::GroupBy),
        NodeTag::HavingClause => Some(ClauseContext::Having),
        NodeTag::OrderByClause => Some(ClauseContext::OrderBy),
        NodeTag::JoinCondition => Some(ClauseContext::JoinCondition),
        NodeTag::FunctionCall => Some(ClauseContext::FunctionArguments),
        _ => None,
    }
}

/// Обходит дерево, вызывая посетителя на каждом узле
///
/// По завершении обхода корня проверяет сбалансированность состояния.
pub fn walk<V: Visitor>(root: &NodeHandle, visitor: &mut V, ctx: &mut WalkContext) -> Result<()> {
    walk_node(root, visitor, ctx)?;
    ctx.finish()
}

fn walk_node<V: Visitor>(node: &NodeHandle, visitor: &mut V, ctx: &mut WalkContext) -> Result<()> {
    let tag = node.borrow().tag();
    let clause = clause_of(tag);

    if let Some(clause) = clause {
        ctx.push_clause(clause);
    }
    visitor.enter(node, ctx)?;

    for child in children_of(node) {
        walk_node(&child, visitor, ctx)?;
    }

    visitor.leave(node, ctx)?;
    if let Some(clause) = clause {
        ctx.pop_clause(clause)?;
    }
    Ok(())
}
