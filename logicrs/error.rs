//! Errors raised while compiling boolean expressions.
use thiserror::Error;

/// Syntax error raised by [`crate::parser::parse`]. Every variant carries the
/// byte offset in the expression at which the problem was detected.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("postfix NOT at position {position} does not follow an operand")]
    DanglingNot { position: usize },

    #[error("closing parenthesis at position {position} has no matching '('")]
    UnmatchedClose { position: usize },

    #[error("parenthesis opened at position {position} is never closed")]
    UnclosedOpen { position: usize },

    #[error("operator '{operator}' at position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },

    #[error("expression reduces to {operands} operands instead of one")]
    OperandCount { operands: usize },

    #[error("expression nests deeper than {limit} levels at position {position}")]
    TooDeep { limit: usize, position: usize },
}

/// Error raised when a term falls outside of the 6-input domain.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("term {term} lies outside of the input domain 0..{limit}")]
pub struct TruthTableError {
    pub term: usize,
    pub limit: usize,
}

/// Error raised by the Quine-McCluskey engine.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MinimizeError {
    #[error("implicant list exceeded its capacity of {capacity} terms")]
    CapacityExceeded { capacity: usize },
}

/// Error raised while serializing netlists.
#[derive(Debug, Error)]
pub enum NetlistError {
    #[error("netlist needs {required} bytes but the buffer holds only {capacity}")]
    CapacityExceeded { required: usize, capacity: usize },

    #[error("combined netlist supports at most {limit} outputs, got {got}")]
    TooManyOutputs { limit: usize, got: usize },

    #[error("could not serialize netlist: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("could not write netlist: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for the compilation pipeline.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("could not parse '{expression}': {source}")]
    Parse {
        expression: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Minimize(#[from] MinimizeError),

    #[error(transparent)]
    Netlist(#[from] NetlistError),
}

/// Result of a pipeline operation.
pub type Result<T> = std::result::Result<T, CompileError>;
