//! Syntax tree for the translated Python subset.
//!
//! The reader in [`crate::input::python`] lowers the concrete tree-sitter tree
//! into these types; the writer in [`crate::output::javascript`] walks them.
//! Every node kind without a dedicated variant is carried as
//! `Unsupported { kind }` so that translation can continue around it.

use serde::{Deserialize, Serialize};

/// A parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

/// Statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// `a = b = value`. Annotated declarations without a value have `value: None`.
    Assign {
        targets: Vec<Expr>,
        value: Option<Expr>,
    },
    /// `target op= value`
    AugAssign {
        target: Expr,
        op: BinaryOp,
        value: Expr,
    },
    FunctionDef(FunctionDef),
    ClassDef(ClassDef),
    Return(Option<Expr>),
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    /// Expression evaluated for its side effects.
    Expr(Expr),
    Break,
    Continue,
    Pass,
    /// A statement kind with no translation rule, named by its Python AST class.
    Unsupported {
        kind: String,
    },
}

/// Function definition, also used for methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params,
            body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    /// Plain or defaulted parameter.
    Positional,
    /// `*args`
    VarArgs,
    /// `**kwargs`
    KwArgs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<Expr>,
}

impl Param {
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Expr) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
            default: Some(default),
        }
    }

    pub fn var_args(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::VarArgs,
            default: None,
        }
    }

    pub fn kw_args(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::KwArgs,
            default: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<Expr>,
    pub body: Vec<Stmt>,
}

/// Expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Name(String),
    Constant(Constant),
    /// f-string: literal text interleaved with interpolated expressions.
    FormattedString(Vec<FStringPart>),
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    /// Positional arguments only; keyword arguments are not carried.
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `a and b and c` is a single node with three values.
    BoolOp {
        op: BoolOp,
        values: Vec<Expr>,
    },
    /// `left ops[0] comparators[0] ops[1] comparators[1] ...`
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Set(Vec<Expr>),
    Dict(Vec<DictItem>),
    Subscript {
        value: Box<Expr>,
        index: Box<Expr>,
    },
    /// `body if test else orelse`
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },
    Lambda {
        params: Vec<Param>,
        body: Box<Expr>,
    },
    /// `*value` in calls, collection displays and assignment targets.
    Starred(Box<Expr>),
    /// Explicit parentheses from the source.
    Paren(Box<Expr>),
    Unsupported {
        kind: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    None,
    Bool(bool),
    /// Integer literal, kept in its source spelling.
    Int(String),
    /// Float literal, kept in its source spelling.
    Float(String),
    /// Decoded string value. `formatted` marks an f-string with no interpolations.
    Str { value: String, formatted: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FStringPart {
    Literal(String),
    Interpolation(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DictItem {
    Pair { key: Expr, value: Expr },
    /// `**mapping`
    Spread(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
}

impl BinaryOp {
    /// Parse an operator token, with or without a trailing `=`.
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token.strip_suffix('=').unwrap_or(token) {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mult,
            "@" => Self::MatMult,
            "/" => Self::Div,
            "//" => Self::FloorDiv,
            "%" => Self::Mod,
            "**" => Self::Pow,
            "<<" => Self::LShift,
            ">>" => Self::RShift,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "&" => Self::BitAnd,
            _ => return None,
        };
        Some(op)
    }

    /// Python AST class name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mult => "Mult",
            Self::MatMult => "MatMult",
            Self::Div => "Div",
            Self::FloorDiv => "FloorDiv",
            Self::Mod => "Mod",
            Self::Pow => "Pow",
            Self::LShift => "LShift",
            Self::RShift => "RShift",
            Self::BitOr => "BitOr",
            Self::BitXor => "BitXor",
            Self::BitAnd => "BitAnd",
        }
    }

    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            Self::LShift | Self::RShift | Self::BitOr | Self::BitXor | Self::BitAnd
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    UAdd,
    USub,
    Not,
    Invert,
}

impl UnaryOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Self::UAdd),
            "-" => Some(Self::USub),
            "not" => Some(Self::Not),
            "~" => Some(Self::Invert),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOp {
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            "<" => Self::Lt,
            "<=" => Self::LtE,
            ">" => Self::Gt,
            ">=" => Self::GtE,
            "is" => Self::Is,
            "is not" => Self::IsNot,
            "in" => Self::In,
            "not in" => Self::NotIn,
            _ => return None,
        };
        Some(op)
    }
}

// Convenience constructors, mostly for building trees in tests.

impl Expr {
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name(id.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Constant(Constant::Int(value.to_string()))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Constant(Constant::Str {
            value: value.into(),
            formatted: false,
        })
    }

    pub fn bool(value: bool) -> Self {
        Expr::Constant(Constant::Bool(value))
    }

    pub fn none() -> Self {
        Expr::Constant(Constant::None)
    }

    pub fn attribute(value: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn compare(left: Expr, ops: Vec<CmpOp>, comparators: Vec<Expr>) -> Self {
        Expr::Compare {
            left: Box::new(left),
            ops,
            comparators,
        }
    }
}

impl Stmt {
    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign {
            targets: vec![target],
            value: Some(value),
        }
    }

    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }

    pub fn function(def: FunctionDef) -> Self {
        Stmt::FunctionDef(def)
    }

    pub fn return_stmt(value: Option<Expr>) -> Self {
        Stmt::Return(value)
    }

    pub fn if_stmt(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Self {
        Stmt::If { test, body, orelse }
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Stmt::Unsupported { kind: kind.into() }
    }
}
