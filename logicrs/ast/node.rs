use std::collections::BTreeSet;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::literal::Variable;

/// Two-input gates a [`LogicNode`] can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    And,
    Or,
    Xor,
    Nand,
    Nor,
}

impl GateKind {
    /// Compute the output of the gate for the given inputs.
    #[must_use]
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            GateKind::And => left && right,
            GateKind::Or => left || right,
            GateKind::Xor => left ^ right,
            GateKind::Nand => !(left && right),
            GateKind::Nor => !(left || right),
        }
    }

    /// Associative gates can be drawn with any number of inputs, so chains
    /// like `(A * B) * C` collapse into a single gate.
    #[must_use]
    pub fn is_associative(self) -> bool {
        matches!(self, GateKind::And | GateKind::Or | GateKind::Xor)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Xor => "XOR",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
        }
    }
}

/// A node of the gate tree. Every child is exclusively owned by its parent,
/// so dropping the root releases the whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicNode {
    /// An input variable.
    Var(Variable),

    /// An inverter.
    Not(Box<LogicNode>),

    /// A two-input gate.
    Gate {
        kind: GateKind,
        left: Box<LogicNode>,
        right: Box<LogicNode>,
    },
}

impl LogicNode {
    /// Build a leaf reading the variable `letter`.
    #[must_use]
    pub fn var(letter: char) -> LogicNode {
        LogicNode::Var(Variable::new(letter))
    }

    /// Build an inverter around `child`.
    #[must_use]
    pub fn not(child: LogicNode) -> LogicNode {
        LogicNode::Not(Box::new(child))
    }

    /// Build a two-input gate of the given kind.
    #[must_use]
    pub fn gate(kind: GateKind, left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::Gate {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn and(left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::gate(GateKind::And, left, right)
    }

    #[must_use]
    pub fn or(left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::gate(GateKind::Or, left, right)
    }

    #[must_use]
    pub fn xor(left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::gate(GateKind::Xor, left, right)
    }

    #[must_use]
    pub fn nand(left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::gate(GateKind::Nand, left, right)
    }

    #[must_use]
    pub fn nor(left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::gate(GateKind::Nor, left, right)
    }

    /// Gate kind of the node, if it is a two-input gate.
    #[must_use]
    pub fn gate_kind(&self) -> Option<GateKind> {
        match self {
            LogicNode::Gate { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Label used when drawing the node: the variable letter or the
    /// name of the gate.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            LogicNode::Var(variable) => variable.to_string(),
            LogicNode::Not(_) => "NOT".to_owned(),
            LogicNode::Gate { kind, .. } => kind.name().to_owned(),
        }
    }

    /// Evaluate the tree for the inputs in `input_mask`. Bit 0 holds `A`,
    /// bit 1 holds `B`, and so on. Variables without a bit in the mask
    /// read as Low.
    #[must_use]
    pub fn evaluate(&self, input_mask: u32) -> bool {
        match self {
            LogicNode::Var(variable) => variable
                .index()
                .is_some_and(|idx| (input_mask >> idx.0) & 1 == 1),
            LogicNode::Not(child) => !child.evaluate(input_mask),
            LogicNode::Gate { kind, left, right } => {
                kind.apply(left.evaluate(input_mask), right.evaluate(input_mask))
            }
        }
    }

    /// Variables the tree reads, in alphabetical order.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut variables = BTreeSet::new();
        self.collect_variables(&mut variables);
        variables
    }

    fn collect_variables(&self, variables: &mut BTreeSet<Variable>) {
        match self {
            LogicNode::Var(variable) => {
                variables.insert(*variable);
            }
            LogicNode::Not(child) => child.collect_variables(variables),
            LogicNode::Gate { left, right, .. } => {
                left.collect_variables(variables);
                right.collect_variables(variables);
            }
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            LogicNode::Var(_) => 1,
            LogicNode::Not(child) => 1 + child.size(),
            LogicNode::Gate { left, right, .. } => 1 + left.size() + right.size(),
        }
    }
}

/// Evaluate a possibly absent tree. A missing tree is always Low, so
/// callers must check the parse result to tell an invalid expression apart
/// from a constant-false one.
#[must_use]
pub fn evaluate(tree: Option<&LogicNode>, input_mask: u32) -> bool {
    tree.is_some_and(|tree| tree.evaluate(input_mask))
}

impl Not for LogicNode {
    type Output = Self;

    fn not(self) -> Self::Output {
        LogicNode::not(self)
    }
}

impl BitAnd for LogicNode {
    type Output = Self;

    fn bitand(self, rhs: LogicNode) -> Self::Output {
        LogicNode::and(self, rhs)
    }
}

impl BitOr for LogicNode {
    type Output = Self;

    fn bitor(self, rhs: LogicNode) -> Self::Output {
        LogicNode::or(self, rhs)
    }
}

impl BitXor for LogicNode {
    type Output = Self;

    fn bitxor(self, rhs: LogicNode) -> Self::Output {
        LogicNode::xor(self, rhs)
    }
}
