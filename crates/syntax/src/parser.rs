//! A recursive descent parser for map expressions.
//!
//! The parser consumes the token stream produced by the [`Scanner`](crate::Scanner)
//! and dispatches on at most three tokens of lookahead, so it never backtracks.
//!
//! # Operator Precedence
//!
//! From lowest to highest:
//! 1. `or`
//! 2. `and`
//! 3. `<`, `>`, `<=`, `>=`, `=`, `!=` (at most one per level)
//! 4. `+`, `-`
//! 5. `*`, `div`, `mod`
//!
//! Operands at every level are primaries: constants, variables, function
//! calls, selectors and parenthesized groups. A group is the only way to
//! embed one operator chain inside another. A union (`|`) is only formed when
//! the first primary is a selector, and never takes part in an operator chain.

use crate::ast::*;
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::scanner::scan;
use crate::token::{Span, Token, TokenKind};

// --- Main Public Parser ---

/// Parses an expression with the default [`ParserConfig`].
pub fn parse(text: &str) -> Result<Ast, ParseError> {
    ExpressionParser::default().parse(text)
}

/// Parses an expression with an explicit configuration.
pub fn parse_with_config(text: &str, config: &ParserConfig) -> Result<Ast, ParseError> {
    ExpressionParser::new(*config).parse(text)
}

/// A reusable parser front end. Holds only configuration, so one value can be
/// shared across threads and used for any number of independent parses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpressionParser {
    config: ParserConfig,
}

impl ExpressionParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, text: &str) -> Result<Ast, ParseError> {
        let result = scan(text).and_then(|tokens| {
            log::trace!("scanned {} tokens from {} bytes", tokens.len(), text.len());
            Parser::new(&tokens, self.config.max_depth).parse_main()
        });

        match &result {
            Ok(ast) => log::debug!("parsed {} over {} bytes", ast.root.kind_name(), text.len()),
            Err(e) => log::debug!("failed to parse '{}': {}", text, e),
        }
        result
    }
}

/// Depth charged for each filter level. A filter body re-enters the whole
/// selector and expression chain, so it uses several times the stack of a
/// group or a function argument.
const FILTER_DEPTH_COST: usize = 4;

// --- Token Access ---

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    eof: Token<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], max_depth: usize) -> Self {
        let eof = tokens
            .last()
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, "", 0));
        Self {
            tokens,
            pos: 0,
            eof,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Token<'a> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Token<'a> {
        self.tokens.get(self.pos + n).copied().unwrap_or(self.eof)
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn nth_kind(&self, n: usize) -> TokenKind {
        self.peek_nth(n).kind
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        (self.peek_kind() == kind).then(|| self.advance())
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'a>, ParseError> {
        self.eat(kind).ok_or_else(|| self.unexpected(expected))
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.peek();
        ParseError::syntax(found.span.start, expected, found.describe())
    }

    /// Runs `parse` one nesting level deeper, failing once the limit is hit.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.nested_by(1, parse)
    }

    fn nested_by<T>(
        &mut self,
        cost: usize,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth + cost > self.max_depth {
            return Err(ParseError::DepthExceeded {
                offset: self.peek().span.start,
                limit: self.max_depth,
            });
        }
        self.depth += cost;
        let result = parse(self);
        self.depth -= cost;
        result
    }

    // --- Expression Parsers ---

    /// main := exp EOF
    fn parse_main(&mut self) -> Result<Ast, ParseError> {
        let root = self.nested(Self::parse_exp)?;
        let end = self.expect(TokenKind::Eof, "end of input")?;
        Ok(Ast {
            root,
            span: Span::new(0, end.span.end),
        })
    }

    /// exp := primary ('|' selector)+ | primary operator-tail?
    fn parse_exp(&mut self) -> Result<Expr, ParseError> {
        match self.parse_primary()? {
            Expr::Selector(first) if self.peek_kind() == TokenKind::Pipe => {
                self.parse_union(first)
            }
            // A lone primary comes back unwrapped: every level collapses
            // when it sees no operator.
            primary => self.parse_or(primary),
        }
    }

    fn parse_union(&mut self, first: Selector) -> Result<Expr, ParseError> {
        let mut selectors = vec![first];
        while self.eat(TokenKind::Pipe).is_some() {
            selectors.push(self.parse_selector()?);
        }
        log::trace!("union of {} selectors", selectors.len());
        Ok(Expr::Union(selectors))
    }

    fn parse_or(&mut self, first: Expr) -> Result<Expr, ParseError> {
        let mut operands = vec![self.parse_and(first)?];
        while self.eat(TokenKind::Or).is_some() {
            let operand = self.parse_primary()?;
            operands.push(self.parse_and(operand)?);
        }
        if operands.len() > 1 {
            log::trace!("or-chain of {} operands", operands.len());
        }
        Ok(collapse(operands, Expr::Or))
    }

    fn parse_and(&mut self, first: Expr) -> Result<Expr, ParseError> {
        let mut operands = vec![self.parse_relational(first)?];
        while self.eat(TokenKind::And).is_some() {
            let operand = self.parse_primary()?;
            operands.push(self.parse_relational(operand)?);
        }
        if operands.len() > 1 {
            log::trace!("and-chain of {} operands", operands.len());
        }
        Ok(collapse(operands, Expr::And))
    }

    fn parse_relational(&mut self, first: Expr) -> Result<Expr, ParseError> {
        let left = self.parse_additive(first)?;
        let Some(op) = relational_op(self.peek_kind()) else {
            return Ok(left);
        };
        self.advance();
        let operand = self.parse_primary()?;
        let right = self.parse_additive(operand)?;

        if self.peek_kind().is_relational() {
            return Err(self.unexpected("a single comparison (comparisons do not chain)"));
        }
        log::trace!("comparison {:?}", op);
        Ok(Expr::Relational {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_additive(&mut self, first: Expr) -> Result<Expr, ParseError> {
        let first = self.parse_multiplicative(first)?;
        let mut rest = Vec::new();
        while let Some(op) = additive_op(self.peek_kind()) {
            self.advance();
            let operand = self.parse_primary()?;
            rest.push((op, self.parse_multiplicative(operand)?));
        }

        if rest.is_empty() {
            return Ok(first);
        }
        log::trace!("additive chain of {} operands", rest.len() + 1);
        Ok(Expr::Additive {
            first: Box::new(first),
            rest,
        })
    }

    fn parse_multiplicative(&mut self, first: Expr) -> Result<Expr, ParseError> {
        let mut rest = Vec::new();
        while let Some(op) = multiplicative_op(self.peek_kind()) {
            self.advance();
            rest.push((op, self.parse_primary()?));
        }

        if rest.is_empty() {
            return Ok(first);
        }
        log::trace!("multiplicative chain of {} operands", rest.len() + 1);
        Ok(Expr::Multiplicative {
            first: Box::new(first),
            rest,
        })
    }

    /// Shared by the top level and every operator level:
    /// constant | variableRef | functionCall | '(' exp ')' | selector
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Number | TokenKind::System | TokenKind::Literal => {
                self.parse_constant().map(Expr::Constant)
            }
            TokenKind::Dollar => match self.nth_kind(1) {
                TokenKind::Identifier if self.nth_kind(2) == TokenKind::LeftParen => {
                    self.parse_function_call().map(Expr::FunctionCall)
                }
                TokenKind::Identifier => {
                    self.advance();
                    let name = self.advance();
                    Ok(Expr::Variable(name.text.to_string()))
                }
                TokenKind::LeftParen => self.parse_selector().map(Expr::Selector),
                _ => {
                    let found = self.peek_nth(1);
                    Err(ParseError::syntax(
                        found.span.start,
                        "a variable name or '('",
                        found.describe(),
                    ))
                }
            },
            TokenKind::Identifier if self.nth_kind(1) == TokenKind::LeftParen => {
                self.parse_function_call().map(Expr::FunctionCall)
            }
            kind if kind.starts_selector() => self.parse_selector().map(Expr::Selector),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.nested(Self::parse_exp)?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(Expr::Group(Box::new(inner)))
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_constant(&mut self) -> Result<Constant, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number => number_value(&token).map(Constant::Number),
            TokenKind::System => Ok(Constant::System),
            // The quotes are single ASCII bytes on both ends.
            TokenKind::Literal => Ok(Constant::Literal(
                token.text[1..token.text.len() - 1].to_string(),
            )),
            _ => Err(ParseError::syntax(
                token.span.start,
                "a constant",
                token.describe(),
            )),
        }
    }

    /// functionCall := '$'? Identifier '(' (exp (',' exp)*)? ')'
    fn parse_function_call(&mut self) -> Result<FunctionCall, ParseError> {
        let is_variable_style = self.eat(TokenKind::Dollar).is_some();
        let name = self.expect(TokenKind::Identifier, "a function name")?;
        self.expect(TokenKind::LeftParen, "'('")?;

        let mut args = Vec::new();
        if self.peek_kind() != TokenKind::RightParen {
            loop {
                args.push(self.nested(Self::parse_exp)?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "',' or ')'")?;

        Ok(FunctionCall {
            name: name.text.to_string(),
            is_variable_style,
            args,
        })
    }

    // --- Selector Parsers ---

    /// selector := '/'? step ('/' step)* | '$' '(' selector ')'
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        if self.eat(TokenKind::Dollar).is_some() {
            self.expect(TokenKind::LeftParen, "'('")?;
            let inner = self.nested(Self::parse_selector)?;
            self.expect(TokenKind::RightParen, "')'")?;
            return Ok(Selector::Scoped(Box::new(inner)));
        }

        let is_absolute = self.eat(TokenKind::Slash).is_some();
        let mut steps = vec![self.parse_step()?];
        while self.eat(TokenKind::Slash).is_some() {
            steps.push(self.parse_step()?);
        }
        Ok(Selector::Steps { is_absolute, steps })
    }

    fn parse_step(&mut self) -> Result<Step, ParseError> {
        match self.peek_kind() {
            TokenKind::DotDot => {
                self.advance();
                Ok(Step::Parent)
            }
            TokenKind::Dot => {
                self.advance();
                Ok(Step::Current)
            }
            TokenKind::At | TokenKind::Identifier | TokenKind::Star => {
                let is_attribute = self.eat(TokenKind::At).is_some();
                let name = self.parse_node_name()?;
                let predicate = self.parse_predicate()?;
                Ok(Step::Named {
                    is_attribute,
                    name,
                    predicate,
                })
            }
            _ => Err(self.unexpected("a selector step")),
        }
    }

    /// nodeName := (Identifier ':')? (Identifier | '*')
    fn parse_node_name(&mut self) -> Result<QName, ParseError> {
        let prefix = if self.peek_kind() == TokenKind::Identifier
            && self.nth_kind(1) == TokenKind::Colon
        {
            let prefix = self.advance();
            self.advance();
            Some(prefix.text.to_string())
        } else {
            None
        };

        let local = match self.peek_kind() {
            TokenKind::Identifier => LocalName::Name(self.peek().text.to_string()),
            TokenKind::Star => LocalName::Wildcard,
            _ => return Err(self.unexpected("a node name or '*'")),
        };
        self.advance();
        Ok(QName { prefix, local })
    }

    /// (index | filter | filter index)?
    fn parse_predicate(&mut self) -> Result<Option<Predicate>, ParseError> {
        if self.peek_kind() != TokenKind::LeftBracket {
            return Ok(None);
        }

        if self.index_ahead() {
            let index = self.parse_index()?;
            if self.peek_kind() != TokenKind::LeftBracket {
                return Ok(Some(Predicate::Index(index)));
            }
            // `[1][2]`: the first bracket can only be a filter over the constant.
            let filter = FilterBody::Operator(Box::new(Expr::Constant(Constant::Number(
                index as f64,
            ))));
            let index = self.parse_index()?;
            return Ok(Some(Predicate::FilterThenIndex(Some(filter), index)));
        }

        let filter = self.parse_filter()?;
        if self.peek_kind() == TokenKind::LeftBracket {
            let index = self.parse_index()?;
            return Ok(Some(Predicate::FilterThenIndex(filter, index)));
        }
        Ok(Some(Predicate::Filter(filter)))
    }

    /// True when the next three tokens are `[`, a number without a fraction, `]`.
    fn index_ahead(&self) -> bool {
        self.peek_kind() == TokenKind::LeftBracket
            && self.nth_kind(1) == TokenKind::Number
            && self.nth_kind(2) == TokenKind::RightBracket
            && !self.peek_nth(1).text.contains('.')
    }

    /// index := '[' Number ']'
    fn parse_index(&mut self) -> Result<i64, ParseError> {
        self.expect(TokenKind::LeftBracket, "'['")?;
        let token = self.expect(TokenKind::Number, "a numeric index")?;
        let index = token.text.parse::<i64>().map_err(|_| {
            ParseError::syntax(token.span.start, "an integer index", token.describe())
        })?;
        self.expect(TokenKind::RightBracket, "']'")?;
        Ok(index)
    }

    /// filter := '[' (functionCall | selector | operatorExp)? ']'
    fn parse_filter(&mut self) -> Result<Option<FilterBody>, ParseError> {
        self.expect(TokenKind::LeftBracket, "'['")?;
        if self.eat(TokenKind::RightBracket).is_some() {
            return Ok(None);
        }

        let body = self.nested_by(FILTER_DEPTH_COST, Self::parse_exp)?;
        self.expect(TokenKind::RightBracket, "']'")?;

        Ok(Some(match body {
            Expr::FunctionCall(call) => FilterBody::Call(call),
            Expr::Selector(selector) => FilterBody::Selector(selector),
            other => FilterBody::Operator(Box::new(other)),
        }))
    }
}

// --- Helpers ---

fn collapse(mut operands: Vec<Expr>, wrap: fn(Vec<Expr>) -> Expr) -> Expr {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        wrap(operands)
    }
}

fn number_value(token: &Token<'_>) -> Result<f64, ParseError> {
    token
        .text
        .parse::<f64>()
        .map_err(|_| ParseError::syntax(token.span.start, "a number", token.describe()))
}

fn relational_op(kind: TokenKind) -> Option<RelationalOp> {
    match kind {
        TokenKind::Less => Some(RelationalOp::Less),
        TokenKind::Greater => Some(RelationalOp::Greater),
        TokenKind::LessEqual => Some(RelationalOp::LessEqual),
        TokenKind::GreaterEqual => Some(RelationalOp::GreaterEqual),
        TokenKind::Equal => Some(RelationalOp::Equal),
        TokenKind::NotEqual => Some(RelationalOp::NotEqual),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<AdditiveOp> {
    match kind {
        TokenKind::Plus => Some(AdditiveOp::Plus),
        TokenKind::Minus => Some(AdditiveOp::Minus),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<MultiplicativeOp> {
    match kind {
        TokenKind::Star => Some(MultiplicativeOp::Multiply),
        TokenKind::Div => Some(MultiplicativeOp::Divide),
        TokenKind::Mod => Some(MultiplicativeOp::Modulo),
        _ => None,
    }
}
