//! Static lookup tables from Python spellings to JavaScript spellings.
//!
//! Every lookup is total: entries without a JavaScript counterpart resolve to
//! an explicit fallback variant instead of failing, and the writer turns
//! those fallbacks into placeholder comments.

use crate::ast::{BinaryOp, BoolOp, CmpOp, UnaryOp};

/// Name of the conventional instance parameter of a method.
pub const SELF_NAME: &str = "self";

/// JavaScript spelling of the current instance.
pub const THIS: &str = "this";

/// Method name that becomes a class constructor.
pub const INIT_NAME: &str = "__init__";

/// Builtin whose one- and two-argument calls become counting loops.
pub const RANGE_NAME: &str = "range";

/// Builtin whose zero-argument call refers to the parent class.
pub const SUPER_NAME: &str = "super";

/// Base class that adds nothing when extended.
pub const OBJECT_NAME: &str = "object";

pub const FLOOR_HELPER: &str = "Math.floor";
pub const POWER_HELPER: &str = "Math.pow";

pub const TRUE_LITERAL: &str = "true";
pub const FALSE_LITERAL: &str = "false";
pub const NULL_LITERAL: &str = "null";

/// How a binary (or augmented) operator is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryRule {
    /// `left op right`
    Infix(&'static str),
    /// `Math.floor(left / right)`
    FloorQuotient,
    /// `Math.pow(left, right)`
    Power,
    /// No JavaScript counterpart.
    Unmapped,
}

pub fn binary_rule(op: BinaryOp) -> BinaryRule {
    match op {
        BinaryOp::Add => BinaryRule::Infix("+"),
        BinaryOp::Sub => BinaryRule::Infix("-"),
        BinaryOp::Mult => BinaryRule::Infix("*"),
        BinaryOp::Div => BinaryRule::Infix("/"),
        BinaryOp::Mod => BinaryRule::Infix("%"),
        BinaryOp::LShift => BinaryRule::Infix("<<"),
        BinaryOp::RShift => BinaryRule::Infix(">>"),
        BinaryOp::BitOr => BinaryRule::Infix("|"),
        BinaryOp::BitXor => BinaryRule::Infix("^"),
        BinaryOp::BitAnd => BinaryRule::Infix("&"),
        BinaryOp::FloorDiv => BinaryRule::FloorQuotient,
        BinaryOp::Pow => BinaryRule::Power,
        BinaryOp::MatMult => BinaryRule::Unmapped,
    }
}

/// How a comparison operator is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareRule {
    Infix(&'static str),
    /// `right.includes(left)`
    Contains,
    /// `!right.includes(left)`
    NotContains,
}

pub fn compare_rule(op: CmpOp) -> CompareRule {
    match op {
        CmpOp::Eq | CmpOp::Is => CompareRule::Infix("==="),
        CmpOp::NotEq | CmpOp::IsNot => CompareRule::Infix("!=="),
        CmpOp::Lt => CompareRule::Infix("<"),
        CmpOp::LtE => CompareRule::Infix("<="),
        CmpOp::Gt => CompareRule::Infix(">"),
        CmpOp::GtE => CompareRule::Infix(">="),
        CmpOp::In => CompareRule::Contains,
        CmpOp::NotIn => CompareRule::NotContains,
    }
}

pub fn bool_operator(op: BoolOp) -> &'static str {
    match op {
        BoolOp::And => "&&",
        BoolOp::Or => "||",
    }
}

pub fn unary_operator(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::UAdd => "+",
        UnaryOp::USub => "-",
        UnaryOp::Not => "!",
        UnaryOp::Invert => "~",
    }
}

/// How a call to a Python builtin is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinRule {
    /// Call the JavaScript function of this name instead.
    Rename(&'static str),
    /// `len(x)` becomes the property access `x.length`.
    LengthProperty,
}

const BUILTINS: &[(&str, BuiltinRule)] = &[
    ("print", BuiltinRule::Rename("console.log")),
    ("len", BuiltinRule::LengthProperty),
    ("str", BuiltinRule::Rename("String")),
    ("int", BuiltinRule::Rename("parseInt")),
    ("float", BuiltinRule::Rename("parseFloat")),
];

/// Rewrite rule for a builtin, if `name` is one.
pub fn builtin(name: &str) -> Option<BuiltinRule> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, rule)| *rule)
}

/// Class names are capitalized by convention, and calling one constructs an instance.
pub fn is_constructor_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
