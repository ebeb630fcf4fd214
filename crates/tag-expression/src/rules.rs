//! Predecessor/successor grammar for tag expressions.

use crate::token::TokenType;
use TokenType::*;

/// Which token types may appear next to a token, and whether it may open or close the
/// expression. Neighbours are always the nearest non-whitespace tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyRule {
    pub allowed_predecessors: &'static [TokenType],
    pub allowed_successors: &'static [TokenType],
    pub can_start_expression: bool,
    pub can_end_expression: bool,
}

impl AdjacencyRule {
    pub fn allows_predecessor(&self, ty: TokenType) -> bool {
        self.allowed_predecessors.contains(&ty)
    }

    pub fn allows_successor(&self, ty: TokenType) -> bool {
        self.allowed_successors.contains(&ty)
    }

    /// Table entry for `ty`.
    ///
    /// `Function` has no entry: function calls are validated structurally. `Whitespace` is
    /// transparent and `Invalid` is rejected outright, so neither consults the table either.
    pub fn for_type(ty: TokenType) -> Option<&'static AdjacencyRule> {
        match ty {
            LParen => Some(&LPAREN),
            RParen => Some(&RPAREN),
            Operator => Some(&OPERATOR),
            ConditionalOperator => Some(&CONDITIONAL_OPERATOR),
            ConditionalDelimiter => Some(&CONDITIONAL_DELIMITER),
            Comma => Some(&COMMA),
            Tag => Some(&REFERENCE),
            Expression => Some(&REFERENCE),
            Number => Some(&NUMBER),
            Function | Whitespace | Invalid => None,
        }
    }
}

const OPERAND_START: &[TokenType] = &[Number, Tag, LParen, Function, Expression];
const OPERAND_END: &[TokenType] = &[Number, RParen, Tag, Function, Expression];
const AFTER_OPERAND: &[TokenType] = &[RParen, Operator, Comma, ConditionalOperator];
const BEFORE_OPERAND: &[TokenType] = &[LParen, Operator, Comma, ConditionalOperator];

static LPAREN: AdjacencyRule = AdjacencyRule {
    allowed_predecessors: &[
        Operator,
        LParen,
        Function,
        Expression,
        Comma,
        ConditionalOperator,
    ],
    allowed_successors: OPERAND_START,
    can_start_expression: true,
    can_end_expression: false,
};

static RPAREN: AdjacencyRule = AdjacencyRule {
    allowed_predecessors: OPERAND_END,
    allowed_successors: &[Operator, RParen, Comma, ConditionalOperator],
    can_start_expression: false,
    can_end_expression: true,
};

static OPERATOR: AdjacencyRule = AdjacencyRule {
    allowed_predecessors: OPERAND_END,
    allowed_successors: OPERAND_START,
    can_start_expression: false,
    can_end_expression: false,
};

static CONDITIONAL_OPERATOR: AdjacencyRule = AdjacencyRule {
    allowed_predecessors: OPERAND_END,
    allowed_successors: OPERAND_START,
    can_start_expression: false,
    can_end_expression: false,
};

static COMMA: AdjacencyRule = AdjacencyRule {
    allowed_predecessors: OPERAND_END,
    allowed_successors: &[Number, Tag, LParen, RParen, Function, Expression],
    can_start_expression: false,
    can_end_expression: false,
};

// Tags and embedded expressions share one rule.
static REFERENCE: AdjacencyRule = AdjacencyRule {
    allowed_predecessors: BEFORE_OPERAND,
    allowed_successors: AFTER_OPERAND,
    can_start_expression: true,
    can_end_expression: true,
};

static NUMBER: AdjacencyRule = AdjacencyRule {
    allowed_predecessors: BEFORE_OPERAND,
    allowed_successors: AFTER_OPERAND,
    can_start_expression: true,
    can_end_expression: true,
};

// Delimiters are only ever inserted into already-validated sequences.
static CONDITIONAL_DELIMITER: AdjacencyRule = AdjacencyRule {
    allowed_predecessors: &TokenType::ALL,
    allowed_successors: &TokenType::ALL,
    can_start_expression: true,
    can_end_expression: true,
};
