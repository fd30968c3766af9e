use tracing::{debug, instrument, warn};

use crate::ast::LogicNode;
use crate::error::ParseError;
use crate::literal::Variable;
use crate::parser::token::{Lexer, Operator, Token};

/// Kind of the previously consumed token. Decides whether juxtaposition
/// inserts an implicit AND and whether a postfix NOT has an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Previous {
    Start,
    Operator,
    Operand,
    Open,
    Close,
}

/// Entry of the operator stack together with the byte offset it was read at.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Operator(Operator, usize),
    /// Opening parenthesis, acting as a stack sentinel.
    Open(usize),
}

/// Deepest gate tree [`parse`] builds. Evaluation, netlist generation and
/// dropping all walk the tree recursively.
pub const MAX_DEPTH: usize = 1024;

/// Operand and operator stacks of the shunting-yard algorithm. Every operand
/// is stored with the depth of its tree.
struct ShuntingYard {
    operands: Vec<(LogicNode, usize)>,
    operators: Vec<Pending>,
    previous: Previous,
}

impl ShuntingYard {
    fn new() -> Self {
        ShuntingYard {
            operands: Vec::new(),
            operators: Vec::new(),
            previous: Previous::Start,
        }
    }

    /// Pop two operands and join them with `operator`. The first popped
    /// operand becomes the right child.
    fn build_subtree(&mut self, operator: Operator, position: usize) -> Result<(), ParseError> {
        let missing = ParseError::MissingOperand {
            operator: operator.symbol(),
            position,
        };
        let (right, right_depth) = self.operands.pop().ok_or(missing.clone())?;
        let (left, left_depth) = self.operands.pop().ok_or(missing)?;

        let node = LogicNode::gate(operator.gate_kind(), left, right);
        self.push_operand(node, left_depth.max(right_depth) + 1, position)
    }

    fn push_operand(
        &mut self,
        node: LogicNode,
        depth: usize,
        position: usize,
    ) -> Result<(), ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                position,
            });
        }
        self.operands.push((node, depth));
        Ok(())
    }

    /// Reduce pending operators binding at least as tight as `precedence`.
    /// Stops at an opening parenthesis.
    fn reduce_while(&mut self, precedence: u8) -> Result<(), ParseError> {
        while let Some(Pending::Operator(operator, position)) = self.operators.last().copied() {
            if operator.precedence() < precedence {
                break;
            }
            self.operators.pop();
            self.build_subtree(operator, position)?;
        }
        Ok(())
    }

    fn push_operator(&mut self, operator: Operator, position: usize) -> Result<(), ParseError> {
        self.reduce_while(operator.precedence())?;
        self.operators.push(Pending::Operator(operator, position));
        Ok(())
    }

    /// Juxtaposition after an operand or a closed group means AND.
    fn insert_implicit_and(&mut self, position: usize) -> Result<(), ParseError> {
        if matches!(self.previous, Previous::Operand | Previous::Close) {
            self.push_operator(Operator::And, position)?;
        }
        Ok(())
    }

    fn consume(&mut self, token: Token, position: usize) -> Result<(), ParseError> {
        match token {
            Token::Variable(letter) => {
                self.insert_implicit_and(position)?;
                let variable = Variable::new(letter);
                if !variable.is_input() {
                    warn!(%variable, position, "variable lies outside of inputs A..F");
                }
                self.operands.push((LogicNode::Var(variable), 1));
                self.previous = Previous::Operand;
            }
            Token::Not => {
                if !matches!(self.previous, Previous::Operand | Previous::Close) {
                    return Err(ParseError::DanglingNot { position });
                }
                let (operand, depth) = self
                    .operands
                    .pop()
                    .ok_or(ParseError::DanglingNot { position })?;
                self.push_operand(LogicNode::not(operand), depth + 1, position)?;
                self.previous = Previous::Operand;
            }
            Token::Open => {
                self.insert_implicit_and(position)?;
                self.operators.push(Pending::Open(position));
                self.previous = Previous::Open;
            }
            Token::Close => {
                loop {
                    match self.operators.pop() {
                        Some(Pending::Operator(operator, at)) => self.build_subtree(operator, at)?,
                        Some(Pending::Open(_)) => break,
                        None => return Err(ParseError::UnmatchedClose { position }),
                    }
                }
                self.previous = Previous::Close;
            }
            Token::Operator(operator) => {
                self.push_operator(operator, position)?;
                self.previous = Previous::Operator;
            }
        }

        Ok(())
    }

    /// Reduce everything left on the stacks and return the single root.
    fn finish(mut self) -> Result<LogicNode, ParseError> {
        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::Operator(operator, position) => self.build_subtree(operator, position)?,
                Pending::Open(position) => return Err(ParseError::UnclosedOpen { position }),
            }
        }

        if self.previous == Previous::Start {
            return Err(ParseError::Empty);
        }

        let operands = self.operands.len();
        match self.operands.pop() {
            Some((root, _)) if operands == 1 => Ok(root),
            _ => Err(ParseError::OperandCount { operands }),
        }
    }
}

/// Parse `expression` into a gate tree.
///
/// Precedence from tightest to loosest: postfix `'`, then `*` and `%`, then
/// `+`, `^`, and `$`. Operators of equal precedence associate to the left.
///
/// # Errors
///
/// Returns a [`ParseError`] if the expression is empty, contains a character
/// outside of the language, has unbalanced parentheses, or an operator lacks
/// an operand. Trees nesting deeper than [`MAX_DEPTH`] levels, such as long
/// chains of postfix NOTs or of a single operator, are rejected with
/// [`ParseError::TooDeep`]. Partially built subtrees are dropped; no partial
/// tree is ever returned.
#[instrument(level = "debug")]
pub fn parse(expression: &str) -> Result<LogicNode, ParseError> {
    let mut yard = ShuntingYard::new();

    for token in Lexer::new(expression) {
        let (position, token) = token?;
        yard.consume(token, position)?;
    }

    let tree = yard.finish()?;
    debug!(nodes = tree.size(), "parsed expression");
    Ok(tree)
}

impl std::str::FromStr for LogicNode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
