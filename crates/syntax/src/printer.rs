//! Canonical text rendering of the AST.
//!
//! The output always re-parses to a structurally equal tree. Operators are
//! separated by single spaces, arguments by `", "`, and nothing else gets
//! whitespace.

use crate::ast::*;
use std::fmt::{self, Display, Write};

impl Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(c) => c.fmt(f),
            Expr::Variable(name) => write!(f, "${name}"),
            Expr::FunctionCall(call) => call.fmt(f),
            Expr::Group(inner) => write!(f, "({inner})"),
            Expr::Selector(selector) => selector.fmt(f),
            Expr::Or(operands) => write_separated(f, operands, " or "),
            Expr::And(operands) => write_separated(f, operands, " and "),
            Expr::Relational { op, left, right } => write!(f, "{left} {op} {right}"),
            Expr::Additive { first, rest } => {
                first.fmt(f)?;
                for (op, operand) in rest {
                    write!(f, " {op} {operand}")?;
                }
                Ok(())
            }
            Expr::Multiplicative { first, rest } => {
                first.fmt(f)?;
                for (op, operand) in rest {
                    write!(f, " {op} {operand}")?;
                }
                Ok(())
            }
            Expr::Union(selectors) => write_separated(f, selectors, " | "),
        }
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Number(n) => write!(f, "{n}"),
            Constant::System => f.write_str("System"),
            // No escapes exist, so pick the quote the text does not contain.
            Constant::Literal(s) if s.contains('\'') => write!(f, "\"{s}\""),
            Constant::Literal(s) => write!(f, "'{s}'"),
        }
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_variable_style {
            f.write_char('$')?;
        }
        write!(f, "{}(", self.name)?;
        write_separated(f, &self.args, ", ")?;
        f.write_char(')')
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Steps { is_absolute, steps } => {
                if *is_absolute {
                    f.write_char('/')?;
                }
                write_separated(f, steps, "/")
            }
            Selector::Scoped(inner) => write!(f, "$({inner})"),
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Parent => f.write_str(".."),
            Step::Current => f.write_char('.'),
            Step::Named {
                is_attribute,
                name,
                predicate,
            } => {
                if *is_attribute {
                    f.write_char('@')?;
                }
                name.fmt(f)?;
                match predicate {
                    Some(predicate) => predicate.fmt(f),
                    None => Ok(()),
                }
            }
        }
    }
}

impl Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}:")?;
        }
        self.local.fmt(f)
    }
}

impl Display for LocalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalName::Wildcard => f.write_char('*'),
            LocalName::Name(name) => f.write_str(name),
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Index(index) => write!(f, "[{index}]"),
            Predicate::Filter(body) => write_filter(f, body.as_ref()),
            Predicate::FilterThenIndex(body, index) => {
                write_filter(f, body.as_ref())?;
                write!(f, "[{index}]")
            }
        }
    }
}

impl Display for FilterBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterBody::Call(call) => call.fmt(f),
            FilterBody::Selector(selector) => selector.fmt(f),
            // `[3]` would read back as an index, so whole numbers keep a fraction.
            FilterBody::Operator(body) => match body.as_ref() {
                Expr::Constant(Constant::Number(n)) if n.fract() == 0.0 => write!(f, "{n:.1}"),
                other => other.fmt(f),
            },
        }
    }
}

impl Display for RelationalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationalOp::Less => "<",
            RelationalOp::Greater => ">",
            RelationalOp::LessEqual => "<=",
            RelationalOp::GreaterEqual => ">=",
            RelationalOp::Equal => "=",
            RelationalOp::NotEqual => "!=",
        })
    }
}

impl Display for AdditiveOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match self {
            AdditiveOp::Plus => '+',
            AdditiveOp::Minus => '-',
        })
    }
}

impl Display for MultiplicativeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MultiplicativeOp::Multiply => "*",
            MultiplicativeOp::Divide => "div",
            MultiplicativeOp::Modulo => "mod",
        })
    }
}

fn write_filter(f: &mut fmt::Formatter<'_>, body: Option<&FilterBody>) -> fmt::Result {
    match body {
        Some(body) => write!(f, "[{body}]"),
        None => f.write_str("[]"),
    }
}

fn write_separated<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        item.fmt(f)?;
    }
    Ok(())
}
