//! Defines the Abstract Syntax Tree (AST) for map expressions.
//!
//! Every node owns its children; the tree has no back-references and is never
//! mutated after the parser hands it out.

use crate::token::Span;

/// A successfully parsed expression together with the input range it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub root: Expr,
    /// Always `0..input.len()`: the parser only succeeds at end of input.
    pub span: Span,
}

/// The top-level expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Constant),
    /// `$name`
    Variable(String),
    FunctionCall(FunctionCall),
    /// A parenthesized expression.
    Group(Box<Expr>),
    Selector(Selector),
    /// Two or more `or`-separated operands.
    Or(Vec<Expr>),
    /// Two or more `and`-separated operands.
    And(Vec<Expr>),
    /// A single, non-associative comparison.
    Relational {
        op: RelationalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `first (+|- operand)+`
    Additive {
        first: Box<Expr>,
        rest: Vec<(AdditiveOp, Expr)>,
    },
    /// `first (*|div|mod operand)+`
    Multiplicative {
        first: Box<Expr>,
        rest: Vec<(MultiplicativeOp, Expr)>,
    },
    /// Two or more `|`-separated selectors.
    Union(Vec<Selector>),
}

impl Expr {
    /// Checks if the expression is a `Selector` variant.
    pub fn is_selector(&self) -> bool {
        matches!(self, Expr::Selector(_))
    }

    /// Checks if the expression is built from an operator chain.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Expr::Or(_)
                | Expr::And(_)
                | Expr::Relational { .. }
                | Expr::Additive { .. }
                | Expr::Multiplicative { .. }
                | Expr::Union(_)
        )
    }

    /// A short name of the node kind, for logging and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Constant(_) => "constant",
            Expr::Variable(_) => "variable",
            Expr::FunctionCall(_) => "function call",
            Expr::Group(_) => "group",
            Expr::Selector(_) => "selector",
            Expr::Or(_) => "or",
            Expr::And(_) => "and",
            Expr::Relational { .. } => "comparison",
            Expr::Additive { .. } => "additive",
            Expr::Multiplicative { .. } => "multiplicative",
            Expr::Union(_) => "union",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Number(f64),
    /// The reserved `System` word, referring to the implicit execution context.
    System,
    /// The contents of a quoted string, without the quotes.
    Literal(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// True for the `$name(...)` spelling.
    pub is_variable_style: bool,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// `/a/b`, `a/@b`, `../c[1]`
    Steps { is_absolute: bool, steps: Vec<Step> },
    /// `$( selector )`
    Scoped(Box<Selector>),
}

impl Selector {
    pub fn relative(steps: Vec<Step>) -> Self {
        Selector::Steps {
            is_absolute: false,
            steps,
        }
    }

    pub fn absolute(steps: Vec<Step>) -> Self {
        Selector::Steps {
            is_absolute: true,
            steps,
        }
    }
}

/// One `/`-separated segment of a selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Named {
        is_attribute: bool,
        name: QName,
        predicate: Option<Predicate>,
    },
    /// `..`
    Parent,
    /// `.`
    Current,
}

impl Step {
    /// A plain child step with no prefix and no predicate.
    pub fn child(local: impl Into<String>) -> Self {
        Step::Named {
            is_attribute: false,
            name: QName::new(local),
            predicate: None,
        }
    }

    /// A plain attribute step with no prefix and no predicate.
    pub fn attribute(local: impl Into<String>) -> Self {
        Step::Named {
            is_attribute: true,
            name: QName::new(local),
            predicate: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: LocalName,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: LocalName::Name(local.into()),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: LocalName::Name(local.into()),
        }
    }

    pub fn wildcard(prefix: Option<String>) -> Self {
        Self {
            prefix,
            local: LocalName::Wildcard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalName {
    /// `*`
    Wildcard,
    Name(String),
}

/// The bracketed qualifier attached to a named step.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `[3]`
    Index(i64),
    /// `[body]`, or `[]` when the body is `None`.
    Filter(Option<FilterBody>),
    /// `[body][3]`
    FilterThenIndex(Option<FilterBody>, i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterBody {
    Call(FunctionCall),
    Selector(Selector),
    /// Any other expression: an operator chain, or a bare constant, variable
    /// or group.
    Operator(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOp {
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditiveOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplicativeOp {
    Multiply,
    Divide,
    Modulo,
}
