//! Abstract Syntax Tree for authorization expressions.

/// Binary operators for combining expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Logical AND (both must be true)
    And,
    /// Logical OR (at least one must be true)
    Or,
}

/// Unary operators for modifying expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical NOT (inverts the result)
    Not,
}

/// Whether a model reference names a bound instance or a model class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// `:document` - an instance bound to the evaluation context
    Instance,
    /// `Document` - a registered model class
    Class,
}

/// A reference to a model, resolved at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReference {
    pub kind: ModelKind,
    pub name: String,
}

impl ModelReference {
    pub fn instance(name: impl Into<String>) -> Self {
        ModelReference {
            kind: ModelKind::Instance,
            name: name.into(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        ModelReference {
            kind: ModelKind::Class,
            name: name.into(),
        }
    }
}

/// An authorization expression AST node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A bare lowercase identifier or a quoted role name.
    /// e.g., `admin` -> RoleCheck { role: "admin", quoted: false }
    ///
    /// Unquoted checks may still resolve to a bound object at evaluation time.
    RoleCheck { role: String, quoted: bool },

    /// A standalone `:name` or `ClassName` atom.
    Model(ModelReference),

    /// A role checked on a specific model.
    /// e.g., `moderator of :workshop` or `owner(:document)`
    ScopedRole { role: String, model: ModelReference },

    /// A binary operation combining two expressions
    /// e.g., `admin and editor`
    Binary {
        left: Box<Expression>,
        op: BinaryOp,
        right: Box<Expression>,
    },

    /// A unary operation on an expression
    /// e.g., `not banned`
    Unary { op: UnaryOp, expr: Box<Expression> },

    /// A grouped expression (parentheses)
    Group(Box<Expression>),
}

impl Expression {
    /// Creates a new bare role check.
    pub fn role(name: impl Into<String>) -> Self {
        Expression::RoleCheck {
            role: name.into(),
            quoted: false,
        }
    }

    /// Creates a role check scoped to a model.
    pub fn scoped(role: impl Into<String>, model: ModelReference) -> Self {
        Expression::ScopedRole {
            role: role.into(),
            model,
        }
    }

    /// Creates a new AND expression.
    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op: BinaryOp::And,
            right: Box::new(right),
        }
    }

    /// Creates a new OR expression.
    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op: BinaryOp::Or,
            right: Box::new(right),
        }
    }

    /// Creates a new NOT expression.
    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: Expression) -> Self {
        Expression::Unary {
            op: UnaryOp::Not,
            expr: Box::new(expr),
        }
    }

    /// Creates a grouped expression.
    pub fn group(expr: Expression) -> Self {
        Expression::Group(Box::new(expr))
    }
}
