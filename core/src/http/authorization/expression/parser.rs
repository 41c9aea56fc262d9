//! Authorization expression parser.
//!
//! Parses role expressions such as `admin or moderator of :workshop` into an AST.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::OnceLock;

use regex::Regex;

use super::ast::{BinaryOp, Expression, ModelReference, UnaryOp};

/// Words that join a role to the model it is checked on.
const PREPOSITIONS: &[&str] = &["of", "for", "in", "on", "to", "at", "by"];

/// Deepest expression tree the parser builds. Groups, negations and each
/// chained `and`/`or` count as one level.
pub const MAX_DEPTH: usize = 256;

/// Error type for expression parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unexpected end of input
    UnexpectedEof,
    /// Unexpected character
    UnexpectedChar(char),
    /// Unexpected token
    UnexpectedToken(String),
    /// Unclosed parenthesis
    UnclosedParen,
    /// Unclosed string
    UnclosedString,
    /// Empty expression
    EmptyExpression,
    /// A scoped role with nothing after the preposition or inside the call
    MissingModel(String),
    /// Nesting deeper than the given limit
    TooDeep(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "unexpected end of expression"),
            ParseError::UnexpectedChar(c) => write!(f, "unexpected character: '{}'", c),
            ParseError::UnexpectedToken(t) => write!(f, "unexpected token: '{}'", t),
            ParseError::UnclosedParen => write!(f, "unclosed parenthesis"),
            ParseError::UnclosedString => write!(f, "unclosed string literal"),
            ParseError::EmptyExpression => write!(f, "empty expression"),
            ParseError::MissingModel(role) => write!(f, "missing model for role '{}'", role),
            ParseError::TooDeep(limit) => {
                write!(f, "expression nested deeper than {} levels", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Token types for the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Identifier (role, class name, preposition)
    Ident(String),
    /// `:name` model symbol
    Symbol(String),
    /// Quoted role name
    Quoted(String),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// AND operator
    And,
    /// OR operator
    Or,
    /// NOT operator
    Not,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{}", name),
            Token::Symbol(name) => write!(f, ":{}", name),
            Token::Quoted(name) => write!(f, "'{}'", name),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
        }
    }
}

/// A parsed authorization expression.
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::expression::AuthorizationExpression;
///
/// let expr = AuthorizationExpression::parse("admin or owner of :document").unwrap();
/// assert_eq!(expr.source(), "admin or owner of :document");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationExpression {
    /// The original expression string
    source: String,
    /// The parsed AST
    ast: Expression,
}

impl AuthorizationExpression {
    /// Parses an authorization expression string.
    ///
    /// # Returns
    /// A parsed `AuthorizationExpression` or a `ParseError`
    pub fn parse(expr: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(expr)?;
        if tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let ast = Parser::new(tokens).parse()?;

        Ok(AuthorizationExpression {
            source: expr.to_string(),
            ast,
        })
    }

    /// Returns the original expression string.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns a reference to the parsed AST.
    pub fn ast(&self) -> &Expression {
        &self.ast
    }

    /// Consumes self and returns the AST.
    pub fn into_ast(self) -> Expression {
        self.ast
    }
}

/// Returns true for identifiers naming a model class (leading uppercase letter).
fn is_class_name(ident: &str) -> bool {
    static CLASS_NAME: OnceLock<Regex> = OnceLock::new();
    CLASS_NAME
        .get_or_init(|| Regex::new(r"^[A-Z]\w*$").expect("class name pattern is valid"))
        .is_match(ident)
}

fn is_preposition(ident: &str) -> bool {
    let lower = ident.to_lowercase();
    PREPOSITIONS.contains(&lower.as_str())
}

/// Tokenizes an expression string into tokens.
fn tokenize(expr: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }

            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }

            // Quoted role names (single or double quotes)
            '\'' | '"' => {
                chars.next();
                tokens.push(parse_string(c, &mut chars)?);
            }

            // Model symbols
            ':' => {
                chars.next();
                match chars.peek() {
                    Some(&n) if n.is_alphabetic() || n == '_' => {
                        tokens.push(Token::Symbol(read_word(&mut chars)));
                    }
                    _ => return Err(ParseError::UnexpectedChar(':')),
                }
            }

            // Operators
            '&' => {
                chars.next();
                if chars.peek() == Some(&'&') {
                    chars.next();
                    tokens.push(Token::And);
                } else {
                    return Err(ParseError::UnexpectedChar('&'));
                }
            }
            '|' => {
                chars.next();
                if chars.peek() == Some(&'|') {
                    chars.next();
                    tokens.push(Token::Or);
                } else {
                    return Err(ParseError::UnexpectedChar('|'));
                }
            }
            '!' => {
                chars.next();
                tokens.push(Token::Not);
            }

            // Identifiers and keywords
            c if c.is_alphabetic() || c == '_' => {
                tokens.push(parse_identifier(&mut chars));
            }

            _ => {
                return Err(ParseError::UnexpectedChar(c));
            }
        }
    }

    Ok(tokens)
}

/// Parses a quoted role name; the opening quote is already consumed.
fn parse_string(quote: char, chars: &mut Peekable<Chars>) -> Result<Token, ParseError> {
    let mut value = String::new();

    loop {
        match chars.next() {
            Some(c) if c == quote => {
                return Ok(Token::Quoted(value));
            }
            Some('\\') => {
                if let Some(escaped) = chars.next() {
                    value.push(escaped);
                } else {
                    return Err(ParseError::UnclosedString);
                }
            }
            Some(c) => {
                value.push(c);
            }
            None => {
                return Err(ParseError::UnclosedString);
            }
        }
    }
}

fn read_word(chars: &mut Peekable<Chars>) -> String {
    let mut word = String::new();

    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }

    word
}

/// Parses an identifier or keyword. Keywords are case-insensitive.
fn parse_identifier(chars: &mut Peekable<Chars>) -> Token {
    let ident = read_word(chars);

    match ident.to_lowercase().as_str() {
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        _ => Token::Ident(ident),
    }
}

/// Recursive descent parser for authorization expressions.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn parse(&mut self) -> Result<Expression, ParseError> {
        let expr = self.parse_or()?;

        if let Some(token) = self.peek() {
            return Err(ParseError::UnexpectedToken(token.to_string()));
        }

        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Enters one more level of nesting.
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    /// Parse OR expressions (lowest precedence)
    fn parse_or(&mut self) -> Result<Expression, ParseError> {
        let base = self.depth;
        let mut left = self.parse_and()?;

        while matches!(self.peek(), Some(Token::Or)) {
            self.advance();
            self.descend()?;
            let right = self.parse_and()?;
            left = Expression::Binary {
                left: Box::new(left),
                op: BinaryOp::Or,
                right: Box::new(right),
            };
        }

        self.depth = base;
        Ok(left)
    }

    /// Parse AND expressions (higher precedence than OR)
    fn parse_and(&mut self) -> Result<Expression, ParseError> {
        let base = self.depth;
        let mut left = self.parse_unary()?;

        while matches!(self.peek(), Some(Token::And)) {
            self.advance();
            self.descend()?;
            let right = self.parse_unary()?;
            left = Expression::Binary {
                left: Box::new(left),
                op: BinaryOp::And,
                right: Box::new(right),
            };
        }

        self.depth = base;
        Ok(left)
    }

    /// Parse unary expressions (NOT)
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        if matches!(self.peek(), Some(Token::Not)) {
            self.advance();
            self.descend()?;
            let expr = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expression::Unary {
                op: UnaryOp::Not,
                expr: Box::new(expr),
            });
        }

        self.parse_primary()
    }

    /// Parse primary expressions (atoms, groups)
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        match self.peek().cloned() {
            Some(Token::LParen) => {
                self.advance();
                self.descend()?;
                let expr = self.parse_or()?;
                if !matches!(self.peek(), Some(Token::RParen)) {
                    return Err(ParseError::UnclosedParen);
                }
                self.advance();
                self.depth -= 1;
                Ok(Expression::Group(Box::new(expr)))
            }
            Some(Token::Symbol(name)) => {
                self.advance();
                Ok(Expression::Model(ModelReference::instance(name)))
            }
            Some(Token::Ident(name)) if is_class_name(&name) => {
                self.advance();
                Ok(Expression::Model(ModelReference::class(name)))
            }
            Some(Token::Ident(name)) => {
                self.advance();
                self.parse_role(name, false)
            }
            Some(Token::Quoted(name)) => {
                self.advance();
                self.parse_role(name, true)
            }
            Some(token) => Err(ParseError::UnexpectedToken(token.to_string())),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Parse the optional model scope following a role name.
    fn parse_role(&mut self, role: String, quoted: bool) -> Result<Expression, ParseError> {
        match self.peek() {
            Some(Token::Ident(word)) if is_preposition(word) => {
                self.advance();
                let model = self.parse_model(&role)?;
                Ok(Expression::ScopedRole { role, model })
            }
            Some(Token::LParen) => {
                self.advance();
                let model = self.parse_model(&role)?;
                if !matches!(self.peek(), Some(Token::RParen)) {
                    return Err(ParseError::UnclosedParen);
                }
                self.advance();
                Ok(Expression::ScopedRole { role, model })
            }
            _ => Ok(Expression::RoleCheck { role, quoted }),
        }
    }

    /// Parse the model operand of a scoped role.
    fn parse_model(&mut self, role: &str) -> Result<ModelReference, ParseError> {
        match self.peek().cloned() {
            Some(Token::Symbol(name)) => {
                self.advance();
                Ok(ModelReference::instance(name))
            }
            Some(Token::Ident(name)) if is_class_name(&name) => {
                self.advance();
                Ok(ModelReference::class(name))
            }
            Some(Token::Ident(name)) => {
                self.advance();
                Ok(ModelReference::instance(name))
            }
            Some(Token::RParen) | None => Err(ParseError::MissingModel(role.to_string())),
            Some(token) => Err(ParseError::UnexpectedToken(token.to_string())),
        }
    }
}
