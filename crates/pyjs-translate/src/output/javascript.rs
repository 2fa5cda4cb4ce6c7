//! JavaScript writer for the Python syntax tree.
//!
//! Expression translators return unterminated fragments. Statement
//! translators return terminated fragments whose first line carries no
//! indentation (the enclosing block adds it) and whose later lines are
//! already indented for their depth.

use crate::ast::*;
use crate::indent::Indentation;
use crate::tables::{self, BinaryRule, BuiltinRule, CompareRule};
use crate::traits::Writer;
use crate::translate::TranslateOptions;

/// Static instance of the JavaScript writer.
pub static JAVASCRIPT_WRITER: JavaScriptWriterImpl = JavaScriptWriterImpl;

/// JavaScript writer implementing the Writer trait.
pub struct JavaScriptWriterImpl;

impl Writer for JavaScriptWriterImpl {
    fn language(&self) -> &'static str {
        "javascript"
    }

    fn extension(&self) -> &'static str {
        "js"
    }

    fn write(&self, module: &Module) -> String {
        JavaScriptWriter::emit(module)
    }
}

/// Emits the syntax tree as JavaScript source code.
///
/// Holds the indentation state for one translation; create a new writer
/// for every module.
#[derive(Debug, Default)]
pub struct JavaScriptWriter {
    indent: Indentation,
}

impl JavaScriptWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &TranslateOptions) -> Self {
        Self {
            indent: Indentation::new(options.indent_width),
        }
    }

    /// Emit a module with default options.
    pub fn emit(module: &Module) -> String {
        Self::new().write_module(module)
    }

    pub fn emit_with(module: &Module, options: &TranslateOptions) -> String {
        Self::with_options(options).write_module(module)
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.indent.depth()
    }

    /// Translate every top-level statement, one per line. Empty fragments are skipped.
    pub fn write_module(&mut self, module: &Module) -> String {
        let lines: Vec<String> = module
            .body
            .iter()
            .map(|stmt| self.write_stmt(stmt))
            .filter(|line| !line.is_empty())
            .collect();
        lines.join("\n")
    }

    /// Translate one statement.
    pub fn write_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Assign { targets, value } => self.write_assign(targets, value.as_ref()),
            Stmt::AugAssign { target, op, value } => self.write_aug_assign(target, *op, value),
            Stmt::FunctionDef(def) => self.write_function(def),
            Stmt::ClassDef(class) => self.write_class(class),
            Stmt::Return(Some(value)) => format!("return {};", self.write_bare(value)),
            Stmt::Return(None) => "return;".to_string(),
            Stmt::If { test, body, orelse } => self.write_if(test, body, orelse),
            Stmt::For {
                target,
                iter,
                body,
                orelse,
            } => {
                let header = self.for_header(target, iter);
                let block = self.write_block(&header, body);
                self.with_loop_else(block, "For", orelse)
            }
            Stmt::While { test, body, orelse } => {
                let header = format!("while ({})", self.write_bare(test));
                let block = self.write_block(&header, body);
                self.with_loop_else(block, "While", orelse)
            }
            Stmt::Expr(Expr::Unsupported { kind }) => self.unsupported_stmt(kind),
            // A statement starting with `{` would read as a block.
            Stmt::Expr(expr) if matches!(strip_parens(expr), Expr::Dict(_)) => {
                format!("({});", self.write_bare(expr))
            }
            Stmt::Expr(expr) => format!("{};", self.write_bare(expr)),
            Stmt::Break => "break;".to_string(),
            Stmt::Continue => "continue;".to_string(),
            Stmt::Pass => String::new(),
            Stmt::Unsupported { kind } => self.unsupported_stmt(kind),
        }
    }

    /// Translate one expression.
    pub fn write_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Name(id) => id.clone(),
            Expr::Constant(constant) => self.write_constant(constant),
            Expr::FormattedString(parts) => self.write_template(parts),
            Expr::Attribute { value, attr } => format!("{}.{}", self.write_receiver(value), attr),
            Expr::Call { func, args } => self.write_call(func, args),
            Expr::BinOp { left, op, right } => self.write_binary(left, *op, right),
            Expr::UnaryOp { op, operand } => {
                format!("{}{}", tables::unary_operator(*op), self.grouped(operand))
            }
            Expr::BoolOp { op, values } => {
                let separator = format!(" {} ", tables::bool_operator(*op));
                values
                    .iter()
                    .map(|value| self.operand(value))
                    .collect::<Vec<_>>()
                    .join(separator.as_str())
            }
            Expr::Compare {
                left,
                ops,
                comparators,
            } => self.write_compare(left, ops, comparators),
            Expr::List(elements) | Expr::Tuple(elements) => {
                format!("[{}]", self.write_list(elements))
            }
            Expr::Set(elements) => format!("new Set([{}])", self.write_list(elements)),
            Expr::Dict(items) => self.write_dict(items),
            Expr::Subscript { value, index } => {
                format!("{}[{}]", self.write_expr(value), self.write_bare(index))
            }
            Expr::IfExp { test, body, orelse } => format!(
                "({} ? {} : {})",
                self.write_bare(test),
                self.write_bare(body),
                self.write_bare(orelse)
            ),
            Expr::Lambda { params, body } => {
                let body = match body.as_ref() {
                    // An object literal body would read as a block.
                    dict @ Expr::Dict(_) => format!("({})", self.write_expr(dict)),
                    other => self.write_bare(other),
                };
                format!("({}) => {}", self.write_params(params), body)
            }
            Expr::Starred(value) => format!("...{}", self.write_expr(value)),
            Expr::Paren(inner) => format!("({})", self.write_bare(inner)),
            Expr::Unsupported { kind } => self.unsupported_expr(kind),
        }
    }

    /// Translate an expression in a position that is already delimited,
    /// dropping redundant source parentheses.
    fn write_bare(&self, expr: &Expr) -> String {
        match expr {
            Expr::Paren(inner) => self.write_bare(inner),
            other => self.write_expr(other),
        }
    }

    /// Translate an expression, parenthesizing it unless it is atomic.
    fn grouped(&self, expr: &Expr) -> String {
        match expr {
            // Rewritten to a helper call, which is already atomic.
            Expr::BinOp { op, .. } if !matches!(tables::binary_rule(*op), BinaryRule::Infix(_)) => {
                self.write_expr(expr)
            }
            Expr::BinOp { .. }
            | Expr::BoolOp { .. }
            | Expr::Compare { .. }
            | Expr::UnaryOp { .. }
            | Expr::Lambda { .. } => format!("({})", self.write_expr(expr)),
            other => self.write_expr(other),
        }
    }

    /// Operand of an infix operator. Arrow functions extend as far right as
    /// possible, so they are parenthesized.
    fn operand(&self, expr: &Expr) -> String {
        match expr {
            Expr::Lambda { .. } => self.grouped(expr),
            other => self.write_expr(other),
        }
    }

    fn write_list(&self, elements: &[Expr]) -> String {
        elements
            .iter()
            .map(|element| self.write_bare(element))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn write_constant(&self, constant: &Constant) -> String {
        match constant {
            Constant::None => tables::NULL_LITERAL.to_string(),
            Constant::Bool(true) => tables::TRUE_LITERAL.to_string(),
            Constant::Bool(false) => tables::FALSE_LITERAL.to_string(),
            Constant::Int(spelling) | Constant::Float(spelling) => spelling.clone(),
            Constant::Str {
                value,
                formatted: false,
            } => escape_string(value),
            Constant::Str {
                value,
                formatted: true,
            } => format!("`{}`", escape_template(value)),
        }
    }

    fn write_template(&self, parts: &[FStringPart]) -> String {
        let mut out = String::from("`");
        for part in parts {
            match part {
                FStringPart::Literal(text) => out.push_str(&escape_template(text)),
                FStringPart::Interpolation(expr) => {
                    out.push_str("${");
                    out.push_str(&self.write_bare(expr));
                    out.push('}');
                }
            }
        }
        out.push('`');
        out
    }

    /// Receiver of an attribute access or method call.
    fn write_receiver(&self, value: &Expr) -> String {
        match value {
            Expr::Name(id) if id == tables::SELF_NAME => tables::THIS.to_string(),
            _ if is_super_call(value) => tables::SUPER_NAME.to_string(),
            other => self.write_expr(other),
        }
    }

    fn write_args(&self, args: &[Expr]) -> String {
        self.write_list(args)
    }

    fn write_call(&self, func: &Expr, args: &[Expr]) -> String {
        match func {
            // super().__init__(...) calls the parent constructor.
            Expr::Attribute { value, attr } if attr == tables::INIT_NAME && is_super_call(value) => {
                format!("{}({})", tables::SUPER_NAME, self.write_args(args))
            }
            Expr::Attribute { value, attr } => {
                format!(
                    "{}.{}({})",
                    self.write_receiver(value),
                    attr,
                    self.write_args(args)
                )
            }
            Expr::Name(name) => match (tables::builtin(name), args) {
                (Some(BuiltinRule::LengthProperty), [arg]) => {
                    format!("{}.length", self.grouped(strip_parens(arg)))
                }
                (Some(BuiltinRule::Rename(target)), _) => {
                    format!("{}({})", target, self.write_args(args))
                }
                _ if tables::is_constructor_name(name) => {
                    format!("new {}({})", name, self.write_args(args))
                }
                _ => format!("{}({})", name, self.write_args(args)),
            },
            other => format!("{}({})", self.write_expr(other), self.write_args(args)),
        }
    }

    fn write_binary(&self, left: &Expr, op: BinaryOp, right: &Expr) -> String {
        match tables::binary_rule(op) {
            BinaryRule::Infix(symbol) => {
                format!("{} {} {}", self.operand(left), symbol, self.operand(right))
            }
            BinaryRule::FloorQuotient => format!(
                "{}({} / {})",
                tables::FLOOR_HELPER,
                self.grouped(strip_parens(left)),
                self.grouped(strip_parens(right))
            ),
            BinaryRule::Power => format!(
                "{}({}, {})",
                tables::POWER_HELPER,
                self.write_bare(left),
                self.write_bare(right)
            ),
            BinaryRule::Unmapped => self.unsupported_operator(op),
        }
    }

    /// Comparisons fold pairwise from the left: `a < b < c` keeps the shape
    /// `a < b < c` instead of expanding to a conjunction.
    fn write_compare(&self, left: &Expr, ops: &[CmpOp], comparators: &[Expr]) -> String {
        let mut result = self.comparison_operand(left);

        for (op, comparator) in ops.iter().zip(comparators) {
            result = match tables::compare_rule(*op) {
                CompareRule::Infix(symbol) => {
                    format!("{} {} {}", result, symbol, self.comparison_operand(comparator))
                }
                CompareRule::Contains => {
                    format!("{}.includes({})", self.grouped(strip_parens(comparator)), result)
                }
                CompareRule::NotContains => {
                    format!("!{}.includes({})", self.grouped(strip_parens(comparator)), result)
                }
            };
        }

        result
    }

    /// Bitwise operators bind looser than comparisons in JavaScript.
    fn comparison_operand(&self, expr: &Expr) -> String {
        match expr {
            Expr::BinOp { op, .. } if op.is_bitwise() => self.grouped(expr),
            other => self.operand(other),
        }
    }

    fn write_dict(&self, items: &[DictItem]) -> String {
        if items.is_empty() {
            return "{}".to_string();
        }
        let entries: Vec<String> = items
            .iter()
            .map(|item| match item {
                DictItem::Pair { key, value } => {
                    format!("{}: {}", self.write_key(key), self.write_bare(value))
                }
                DictItem::Spread(value) => format!("...{}", self.write_expr(value)),
            })
            .collect();
        format!("{{{}}}", entries.join(", "))
    }

    fn write_key(&self, key: &Expr) -> String {
        match key {
            Expr::Constant(
                Constant::Str {
                    formatted: false, ..
                }
                | Constant::Int(_)
                | Constant::Float(_),
            ) => self.write_expr(key),
            other => format!("[{}]", self.write_bare(other)),
        }
    }

    fn write_params(&self, params: &[Param]) -> String {
        let mut listed = Vec::new();
        let mut dropped = Vec::new();

        for param in params {
            match (param.kind, &param.default) {
                (ParamKind::Positional, Some(default)) => {
                    listed.push(format!("{} = {}", param.name, self.write_bare(default)));
                }
                (ParamKind::Positional, None) => listed.push(param.name.clone()),
                (ParamKind::VarArgs, _) => listed.push(format!("...{}", param.name)),
                (ParamKind::KwArgs, _) => {
                    dropped.push(self.unsupported_expr(&format!("**{}", param.name)));
                }
            }
        }

        // A rest parameter must come last, so the placeholder is not a list item.
        let mut out = listed.join(", ");
        for placeholder in dropped {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&placeholder);
        }
        out
    }

    fn write_assign(&mut self, targets: &[Expr], value: Option<&Expr>) -> String {
        let Some(target) = targets.first() else {
            return self.unsupported_stmt("Assign");
        };
        if targets.len() > 1 {
            tracing::debug!(
                dropped = targets.len() - 1,
                "multiple assignment targets, only the first is translated"
            );
        }

        let Some(value) = value else {
            return match target {
                Expr::Name(name) => format!("let {};", name),
                _ => {
                    tracing::debug!("annotation without value on a non-name target skipped");
                    String::new()
                }
            };
        };
        let value = self.write_bare(value);

        match target {
            Expr::Name(name) => format!("let {} = {};", name, value),
            Expr::Tuple(_) | Expr::List(_) if is_binding_pattern(target) => {
                format!("let {} = {};", self.write_expr(target), value)
            }
            Expr::Tuple(_) | Expr::List(_) | Expr::Attribute { .. } | Expr::Subscript { .. } => {
                format!("{} = {};", self.write_expr(target), value)
            }
            _ => self.unsupported_stmt("Assign"),
        }
    }

    fn write_aug_assign(&mut self, target: &Expr, op: BinaryOp, value: &Expr) -> String {
        let target = self.write_expr(target);
        match tables::binary_rule(op) {
            BinaryRule::Infix(symbol) => {
                format!("{} {}= {};", target, symbol, self.write_bare(value))
            }
            BinaryRule::FloorQuotient => format!(
                "{} = {}({} / {});",
                target,
                tables::FLOOR_HELPER,
                target,
                self.grouped(strip_parens(value))
            ),
            BinaryRule::Power => format!(
                "{} = {}({}, {});",
                target,
                tables::POWER_HELPER,
                target,
                self.write_bare(value)
            ),
            BinaryRule::Unmapped => {
                tracing::debug!(operator = op.name(), "unmapped augmented operator");
                format!("// Unsupported operator: {}", op.name())
            }
        }
    }

    fn write_function(&mut self, def: &FunctionDef) -> String {
        let header = format!("function {}({})", def.name, self.write_params(&def.params));
        self.write_block(&header, &def.body)
    }

    fn write_if(&mut self, test: &Expr, body: &[Stmt], orelse: &[Stmt]) -> String {
        let header = format!("if ({})", self.write_bare(test));
        let block = self.write_block(&header, body);

        match orelse {
            [] => block,
            // elif: keep the chain flat
            [nested @ Stmt::If { .. }] => format!("{} else {}", block, self.write_stmt(nested)),
            _ => format!("{} {}", block, self.write_block("else", orelse)),
        }
    }

    fn for_header(&self, target: &Expr, iter: &Expr) -> String {
        if let (Expr::Name(var), Some((start, stop))) = (target, range_bounds(iter)) {
            let start = start.map_or_else(|| "0".to_string(), |start| self.write_bare(start));
            let stop = self.write_bare(stop);
            return format!("for (let {var} = {start}; {var} < {stop}; {var}++)");
        }

        format!(
            "for (let {} of {})",
            self.write_bare(target),
            self.write_bare(iter)
        )
    }

    /// Loops with an `else` clause keep the loop and mark the dropped clause.
    fn with_loop_else(&self, block: String, kind: &str, orelse: &[Stmt]) -> String {
        if orelse.is_empty() {
            return block;
        }
        let placeholder = self.unsupported_stmt(&format!("{kind}.orelse"));
        format!("{}\n{}{}", block, self.indent.prefix(), placeholder)
    }

    fn write_class(&mut self, class: &ClassDef) -> String {
        let mut header = format!("class {}", class.name);

        let bases: Vec<&Expr> = class
            .bases
            .iter()
            .filter(|base| !matches!(base, Expr::Name(name) if name == tables::OBJECT_NAME))
            .collect();
        if let Some(base) = bases.first() {
            header.push_str(" extends ");
            header.push_str(&self.write_expr(base));
        }
        if bases.len() > 1 {
            tracing::debug!(
                class = %class.name,
                "multiple inheritance, only the first base is extended"
            );
        }

        self.nested(&header, |writer| {
            class
                .body
                .iter()
                .filter_map(|member| match member {
                    Stmt::FunctionDef(def) => Some(writer.write_method(def)),
                    _ => {
                        tracing::debug!(class = %class.name, "non-method class member skipped");
                        None
                    }
                })
                .collect()
        })
    }

    /// A method drops its instance parameter; the initializer becomes the constructor.
    fn write_method(&mut self, def: &FunctionDef) -> String {
        let params = def.params.get(1..).unwrap_or_default();
        let name = if def.name == tables::INIT_NAME {
            "constructor"
        } else {
            def.name.as_str()
        };
        let header = format!("{}({})", name, self.write_params(params));
        self.write_block(&header, &def.body)
    }

    fn write_block(&mut self, header: &str, body: &[Stmt]) -> String {
        self.nested(header, |writer| {
            body.iter().map(|stmt| writer.write_stmt(stmt)).collect()
        })
    }

    /// Render `header {`, the child fragments one level deeper, and the
    /// closing brace at the current depth.
    fn nested(&mut self, header: &str, children: impl FnOnce(&mut Self) -> Vec<String>) -> String {
        self.indent.increase();
        let child_prefix = self.indent.prefix();
        let lines = children(self);
        self.indent.decrease();

        let mut out = format!("{header} {{\n");
        for line in lines.iter().filter(|line| !line.is_empty()) {
            out.push_str(&child_prefix);
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.indent.prefix());
        out.push('}');
        out
    }

    fn unsupported_stmt(&self, kind: &str) -> String {
        tracing::debug!(kind, "unsupported statement");
        format!("// Unsupported: {kind}")
    }

    fn unsupported_expr(&self, kind: &str) -> String {
        tracing::debug!(kind, "unsupported expression");
        format!("/* Unsupported: {kind} */")
    }

    fn unsupported_operator(&self, op: BinaryOp) -> String {
        tracing::debug!(operator = op.name(), "unmapped operator");
        format!("/* Unsupported operator: {} */", op.name())
    }
}

fn strip_parens(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(inner) => strip_parens(inner),
        other => other,
    }
}

/// `super()` with no arguments.
fn is_super_call(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Call { func, args } if args.is_empty()
            && matches!(func.as_ref(), Expr::Name(name) if name == tables::SUPER_NAME)
    )
}

/// Start and stop of `range(stop)` or `range(start, stop)`.
fn range_bounds(iter: &Expr) -> Option<(Option<&Expr>, &Expr)> {
    let Expr::Call { func, args } = iter else {
        return None;
    };
    if !matches!(func.as_ref(), Expr::Name(name) if name == tables::RANGE_NAME)
        || args.iter().any(|arg| matches!(arg, Expr::Starred(_)))
    {
        return None;
    }
    match args.as_slice() {
        [stop] => Some((None, stop)),
        [start, stop] => Some((Some(start), stop)),
        // Stepped ranges iterate generically.
        _ => None,
    }
}

/// Whether an assignment target can be written as a `let` destructuring pattern.
fn is_binding_pattern(target: &Expr) -> bool {
    match target {
        Expr::Name(_) => true,
        Expr::Starred(inner) => matches!(inner.as_ref(), Expr::Name(_)),
        Expr::Tuple(elements) | Expr::List(elements) => elements.iter().all(is_binding_pattern),
        Expr::Paren(inner) => is_binding_pattern(inner),
        _ => false,
    }
}

/// Escape a string as a double-quoted JavaScript literal.
fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            c => push_escaped(&mut out, c),
        }
    }
    out.push('"');
    out
}

/// Escape literal text for use inside a template literal.
fn escape_template(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => push_escaped(&mut out, c),
        }
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{2028}' => out.push_str("\\u2028"),
        '\u{2029}' => out.push_str("\\u2029"),
        c if c.is_control() && (c as u32) < 0x100 => {
            out.push_str(&format!("\\x{:02x}", c as u32));
        }
        c => out.push(c),
    }
}
