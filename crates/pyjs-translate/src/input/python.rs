//! Tree-sitter based Python reader.

use crate::ast::*;
use crate::traits::{ReadError, Reader};
use tree_sitter::{Node, Parser, Tree};

/// Static instance of the Python reader.
pub static PYTHON_READER: PythonReader = PythonReader;

/// Python reader using tree-sitter.
pub struct PythonReader;

impl Reader for PythonReader {
    fn language(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py", "pyw"]
    }

    fn read(&self, source: &str) -> Result<Module, ReadError> {
        read_python(source)
    }
}

/// Parse Python source into a syntax tree.
///
/// Source that does not parse cleanly is rejected as a whole with
/// [`ReadError::Syntax`]; no partial tree is returned.
pub fn read_python(source: &str) -> Result<Module, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_python::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(source);
    ctx.read_module(&tree)
}

/// Python AST class name for a grammar node kind with no translation rule.
fn python_kind_name(kind: &'static str) -> &'static str {
    match kind {
        "import_statement" => "Import",
        "import_from_statement" | "future_import_statement" => "ImportFrom",
        "try_statement" => "Try",
        "with_statement" => "With",
        "raise_statement" => "Raise",
        "assert_statement" => "Assert",
        "delete_statement" => "Delete",
        "global_statement" => "Global",
        "nonlocal_statement" => "Nonlocal",
        "match_statement" => "Match",
        "type_alias_statement" => "TypeAlias",
        "list_comprehension" => "ListComp",
        "dictionary_comprehension" => "DictComp",
        "set_comprehension" => "SetComp",
        "generator_expression" => "GeneratorExp",
        "await" => "Await",
        "yield" => "Yield",
        "slice" => "Slice",
        "named_expression" => "NamedExpr",
        "ellipsis" => "Ellipsis",
        "dictionary_splat" => "DictSplat",
        "keyword_argument" => "keyword",
        other => other,
    }
}

struct ReadContext<'a> {
    source: &'a str,
}

impl<'a> ReadContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &'a str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(name)
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: format!("{} with a `{}` field", node.kind(), name),
                got: self.node_text(node).to_string(),
            })
    }

    /// Named children, skipping comments.
    fn named_children<'t>(&self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    fn read_module(&self, tree: &Tree) -> Result<Module, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            return Err(self.syntax_error(root));
        }

        Ok(Module::new(self.read_block_stmts(root)?))
    }

    /// Locate the first error or missing node and describe it.
    fn syntax_error(&self, root: Node) -> ReadError {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.is_error() || node.is_missing() {
                let position = node.start_position();
                let message = if node.is_missing() {
                    format!("missing `{}`", node.kind())
                } else {
                    "invalid syntax".to_string()
                };
                return ReadError::Syntax {
                    message,
                    line: position.row + 1,
                    column: position.column + 1,
                };
            }
            if node.has_error() {
                let mut cursor = node.walk();
                let children: Vec<_> = node.children(&mut cursor).collect();
                // Reverse so the leftmost child is visited first.
                stack.extend(children.into_iter().rev());
            }
        }

        let end = root.end_position();
        ReadError::Syntax {
            message: "invalid syntax".to_string(),
            line: end.row + 1,
            column: end.column + 1,
        }
    }

    fn legacy_syntax(&self, node: Node, what: &str) -> ReadError {
        let position = node.start_position();
        ReadError::Syntax {
            message: format!("{what} `{}` is not valid Python 3", self.node_text(node)),
            line: position.row + 1,
            column: position.column + 1,
        }
    }

    fn read_block_stmts(&self, node: Node) -> Result<Vec<Stmt>, ReadError> {
        let mut stmts = Vec::new();
        for child in self.named_children(node) {
            if let Some(stmt) = self.read_stmt(child)? {
                stmts.push(stmt);
            }
        }
        Ok(stmts)
    }

    fn read_stmt(&self, node: Node) -> Result<Option<Stmt>, ReadError> {
        let stmt = match node.kind() {
            "comment" => return Ok(None),

            "expression_statement" => self.read_expression_statement(node)?,
            "assignment" => self.read_assignment(node)?,
            "augmented_assignment" => self.read_augmented_assignment(node)?,

            "if_statement" => self.read_if_statement(node)?,
            "while_statement" => self.read_while_statement(node)?,
            "for_statement" => self.read_for_statement(node)?,
            "return_statement" => self.read_return_statement(node)?,

            "break_statement" => Stmt::Break,
            "continue_statement" => Stmt::Continue,
            "pass_statement" => Stmt::Pass,

            "function_definition" => Stmt::FunctionDef(self.read_function_definition(node)?),
            "class_definition" => self.read_class_definition(node)?,

            // Decorators are dropped; the definition itself is kept.
            "decorated_definition" => {
                let def = self.field(node, "definition")?;
                return self.read_stmt(def);
            }

            // The grammar still accepts these Python 2 forms.
            "print_statement" | "exec_statement" => {
                return Err(self.legacy_syntax(node, "Python 2 statement"));
            }

            // A bare expression outside an `expression_statement`.
            _ => match self.read_expr(node)? {
                Expr::Unsupported { kind } => Stmt::Unsupported { kind },
                expr => Stmt::Expr(expr),
            },
        };
        Ok(Some(stmt))
    }

    fn read_expression_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let parts = self.named_children(node);
        match parts.as_slice() {
            [single] => match single.kind() {
                "assignment" => self.read_assignment(*single),
                "augmented_assignment" => self.read_augmented_assignment(*single),
                _ => Ok(Stmt::Expr(self.read_expr(*single)?)),
            },
            // `a, b` as a bare statement
            _ => Ok(Stmt::Expr(Expr::Tuple(self.read_exprs(&parts)?))),
        }
    }

    fn read_assignment(&self, node: Node) -> Result<Stmt, ReadError> {
        // `a = b = 1` nests as assignment(a, assignment(b, 1))
        let mut targets = Vec::new();
        let mut current = node;
        loop {
            let left = self.field(current, "left")?;
            targets.push(self.read_expr(left)?);

            match current.child_by_field_name("right") {
                Some(right) if right.kind() == "assignment" => current = right,
                Some(right) => {
                    return Ok(Stmt::Assign {
                        targets,
                        value: Some(self.read_expr(right)?),
                    });
                }
                // `x: int` declares without assigning
                None => return Ok(Stmt::Assign { targets, value: None }),
            }
        }
    }

    fn read_augmented_assignment(&self, node: Node) -> Result<Stmt, ReadError> {
        let left = self.field(node, "left")?;
        let right = self.field(node, "right")?;
        let op_node = self.field(node, "operator")?;

        let op = BinaryOp::from_token(op_node.kind()).ok_or_else(|| ReadError::UnexpectedNode {
            expected: "augmented assignment operator".into(),
            got: op_node.kind().to_string(),
        })?;

        Ok(Stmt::AugAssign {
            target: self.read_expr(left)?,
            op,
            value: self.read_expr(right)?,
        })
    }

    fn read_if_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let test = self.read_expr(self.field(node, "condition")?)?;
        let body = self.read_block_stmts(self.field(node, "consequence")?)?;

        // `alternative` repeats: zero or more elif clauses, then an optional else.
        let mut cursor = node.walk();
        let alternatives: Vec<_> = node
            .children_by_field_name("alternative", &mut cursor)
            .collect();

        // Fold from the last clause so each elif nests the rest of the chain.
        let mut orelse = Vec::new();
        for alt in alternatives.into_iter().rev() {
            match alt.kind() {
                "else_clause" => orelse = self.read_else_clause(alt)?,
                "elif_clause" => {
                    let test = self.read_expr(self.field(alt, "condition")?)?;
                    let body = self.read_block_stmts(self.field(alt, "consequence")?)?;
                    orelse = vec![Stmt::If {
                        test,
                        body,
                        orelse: std::mem::take(&mut orelse),
                    }];
                }
                _ => {}
            }
        }

        Ok(Stmt::If { test, body, orelse })
    }

    fn read_else_clause(&self, node: Node) -> Result<Vec<Stmt>, ReadError> {
        self.read_block_stmts(self.field(node, "body")?)
    }

    fn read_loop_else(&self, node: Node) -> Result<Vec<Stmt>, ReadError> {
        match node.child_by_field_name("alternative") {
            Some(alt) => self.read_else_clause(alt),
            None => Ok(Vec::new()),
        }
    }

    fn read_while_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        Ok(Stmt::While {
            test: self.read_expr(self.field(node, "condition")?)?,
            body: self.read_block_stmts(self.field(node, "body")?)?,
            orelse: self.read_loop_else(node)?,
        })
    }

    fn read_for_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        Ok(Stmt::For {
            target: self.read_expr(self.field(node, "left")?)?,
            iter: self.read_expr(self.field(node, "right")?)?,
            body: self.read_block_stmts(self.field(node, "body")?)?,
            orelse: self.read_loop_else(node)?,
        })
    }

    fn read_return_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let value = self
            .named_children(node)
            .first()
            .map(|child| self.read_expr(*child))
            .transpose()?;
        Ok(Stmt::Return(value))
    }

    fn read_function_definition(&self, node: Node) -> Result<FunctionDef, ReadError> {
        let name = self.node_text(self.field(node, "name")?);
        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.read_parameters(p))
            .transpose()?
            .unwrap_or_default();
        let body = self.read_block_stmts(self.field(node, "body")?)?;

        Ok(FunctionDef::new(name, params, body))
    }

    fn read_class_definition(&self, node: Node) -> Result<Stmt, ReadError> {
        let name = self.node_text(self.field(node, "name")?).to_string();
        let bases = match node.child_by_field_name("superclasses") {
            Some(list) => self.read_arguments(list)?,
            None => Vec::new(),
        };
        let body = self.read_block_stmts(self.field(node, "body")?)?;

        Ok(Stmt::ClassDef(ClassDef { name, bases, body }))
    }

    /// Parameters of a `def` or a `lambda`. Type annotations are dropped.
    fn read_parameters(&self, node: Node) -> Result<Vec<Param>, ReadError> {
        let mut params = Vec::new();

        for child in self.named_children(node) {
            match child.kind() {
                "identifier" => params.push(Param::positional(self.node_text(child))),
                "default_parameter" | "typed_default_parameter" => {
                    let name = self.node_text(self.field(child, "name")?);
                    let value = self.read_expr(self.field(child, "value")?)?;
                    params.push(Param::with_default(name, value));
                }
                "typed_parameter" => {
                    if let Some(inner) = self.named_children(child).first() {
                        if let Some(param) = self.read_plain_parameter(*inner) {
                            params.push(param);
                        }
                    }
                }
                _ => {
                    if let Some(param) = self.read_plain_parameter(child) {
                        params.push(param);
                    }
                }
            }
        }

        Ok(params)
    }

    fn read_plain_parameter(&self, node: Node) -> Option<Param> {
        match node.kind() {
            "identifier" => Some(Param::positional(self.node_text(node))),
            "list_splat_pattern" => Some(Param::var_args(self.splat_name(node))),
            "dictionary_splat_pattern" => Some(Param::kw_args(self.splat_name(node))),
            // bare `*` and `/` separators carry no name
            _ => None,
        }
    }

    fn splat_name(&self, node: Node) -> &'a str {
        match self.named_children(node).first() {
            Some(name) => self.node_text(*name),
            None => self.node_text(node).trim_start_matches('*'),
        }
    }

    fn read_exprs(&self, nodes: &[Node]) -> Result<Vec<Expr>, ReadError> {
        nodes.iter().map(|node| self.read_expr(*node)).collect()
    }

    fn read_expr(&self, node: Node) -> Result<Expr, ReadError> {
        match node.kind() {
            "integer" | "float" => {
                let text = self.node_text(node);
                if text.ends_with(['j', 'J']) {
                    return Ok(Expr::Unsupported {
                        kind: "Complex".into(),
                    });
                }
                if node.kind() == "integer" {
                    Ok(Expr::Constant(Constant::Int(text.to_string())))
                } else {
                    Ok(Expr::Constant(Constant::Float(text.to_string())))
                }
            }

            "string" => self.read_string(node),
            "concatenated_string" => self.read_concatenated_string(node),

            "true" => Ok(Expr::bool(true)),
            "false" => Ok(Expr::bool(false)),
            "none" => Ok(Expr::none()),

            "identifier" => Ok(Expr::name(self.node_text(node))),

            "binary_operator" => self.read_binary_operator(node),
            "comparison_operator" => self.read_comparison_operator(node),
            "boolean_operator" => self.read_boolean_operator(node),
            "unary_operator" => self.read_unary_operator(node),
            "not_operator" => {
                let arg = self.field(node, "argument")?;
                Ok(Expr::unary(UnaryOp::Not, self.read_expr(arg)?))
            }

            "call" => self.read_call(node),
            "attribute" => self.read_attribute(node),
            "subscript" => self.read_subscript(node),

            "list" | "list_pattern" => {
                Ok(Expr::List(self.read_exprs(&self.named_children(node))?))
            }
            "tuple" | "tuple_pattern" | "pattern_list" | "expression_list" => {
                Ok(Expr::Tuple(self.read_exprs(&self.named_children(node))?))
            }
            "set" => Ok(Expr::Set(self.read_exprs(&self.named_children(node))?)),
            "dictionary" => self.read_dictionary(node),

            "list_splat" | "list_splat_pattern" => {
                let inner = self.named_children(node);
                match inner.first() {
                    Some(value) => Ok(Expr::Starred(Box::new(self.read_expr(*value)?))),
                    None => Ok(Expr::Unsupported {
                        kind: "Starred".into(),
                    }),
                }
            }

            "parenthesized_expression" => {
                let inner = self.named_children(node);
                let inner = inner.first().ok_or_else(|| ReadError::UnexpectedNode {
                    expected: "expression inside parentheses".into(),
                    got: self.node_text(node).to_string(),
                })?;
                Ok(Expr::Paren(Box::new(self.read_expr(*inner)?)))
            }

            "conditional_expression" => self.read_conditional_expression(node),
            "lambda" => self.read_lambda(node),

            kind => Ok(Expr::Unsupported {
                kind: python_kind_name(kind).to_string(),
            }),
        }
    }

    fn read_binary_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let left = self.field(node, "left")?;
        let right = self.field(node, "right")?;
        let op_node = self.field(node, "operator")?;

        let op = BinaryOp::from_token(op_node.kind()).ok_or_else(|| ReadError::UnexpectedNode {
            expected: "binary operator".into(),
            got: op_node.kind().to_string(),
        })?;

        Ok(Expr::binary(self.read_expr(left)?, op, self.read_expr(right)?))
    }

    fn read_comparison_operator(&self, node: Node) -> Result<Expr, ReadError> {
        // Operands are named children; operators are anonymous tokens between them.
        let mut operands = Vec::new();
        let mut ops = Vec::new();
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            if child.kind() == "comment" {
                continue;
            }
            if child.is_named() {
                operands.push(self.read_expr(child)?);
            } else if child.kind() == "<>" {
                return Err(self.legacy_syntax(child, "operator"));
            } else {
                let op = CmpOp::from_token(child.kind()).ok_or_else(|| {
                    ReadError::UnexpectedNode {
                        expected: "comparison operator".into(),
                        got: child.kind().to_string(),
                    }
                })?;
                ops.push(op);
            }
        }

        if operands.len() != ops.len() + 1 || ops.is_empty() {
            return Err(ReadError::UnexpectedNode {
                expected: "alternating comparison operands and operators".into(),
                got: self.node_text(node).to_string(),
            });
        }

        let left = operands.remove(0);
        Ok(Expr::compare(left, ops, operands))
    }

    fn read_boolean_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let op_node = self.field(node, "operator")?;
        let op = BoolOp::from_token(op_node.kind()).ok_or_else(|| ReadError::UnexpectedNode {
            expected: "`and` or `or`".into(),
            got: op_node.kind().to_string(),
        })?;

        let left = self.read_expr(self.field(node, "left")?)?;
        let right = self.read_expr(self.field(node, "right")?)?;

        // `a and b and c` nests to the left; flatten into one node.
        let mut values = match left {
            Expr::BoolOp {
                op: inner,
                values,
            } if inner == op => values,
            other => vec![other],
        };
        values.push(right);

        Ok(Expr::BoolOp { op, values })
    }

    fn read_unary_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let op_node = self.field(node, "operator")?;
        let arg = self.field(node, "argument")?;

        let op = UnaryOp::from_token(op_node.kind()).ok_or_else(|| ReadError::UnexpectedNode {
            expected: "unary operator".into(),
            got: op_node.kind().to_string(),
        })?;

        Ok(Expr::unary(op, self.read_expr(arg)?))
    }

    fn read_call(&self, node: Node) -> Result<Expr, ReadError> {
        let callee = self.read_expr(self.field(node, "function")?)?;
        let args = match node.child_by_field_name("arguments") {
            Some(list) if list.kind() == "argument_list" => self.read_arguments(list)?,
            // `f(x for x in xs)`
            Some(other) => vec![self.read_expr(other)?],
            None => Vec::new(),
        };

        Ok(Expr::call(callee, args))
    }

    /// Positional arguments; keyword arguments and `**mapping` are dropped.
    fn read_arguments(&self, node: Node) -> Result<Vec<Expr>, ReadError> {
        let mut args = Vec::new();
        for child in self.named_children(node) {
            match child.kind() {
                "keyword_argument" | "dictionary_splat" => {}
                _ => args.push(self.read_expr(child)?),
            }
        }
        Ok(args)
    }

    fn read_attribute(&self, node: Node) -> Result<Expr, ReadError> {
        let object = self.read_expr(self.field(node, "object")?)?;
        let attribute = self.node_text(self.field(node, "attribute")?);
        Ok(Expr::attribute(object, attribute))
    }

    fn read_subscript(&self, node: Node) -> Result<Expr, ReadError> {
        let value = self.read_expr(self.field(node, "value")?)?;

        let mut cursor = node.walk();
        let subscripts: Vec<_> = node
            .children_by_field_name("subscript", &mut cursor)
            .collect();
        let index = match subscripts.as_slice() {
            [single] => self.read_expr(*single)?,
            // `a[i, j]`
            many => Expr::Tuple(self.read_exprs(many)?),
        };

        Ok(Expr::Subscript {
            value: Box::new(value),
            index: Box::new(index),
        })
    }

    fn read_dictionary(&self, node: Node) -> Result<Expr, ReadError> {
        let mut items = Vec::new();

        for child in self.named_children(node) {
            match child.kind() {
                "pair" => {
                    let key = self.read_expr(self.field(child, "key")?)?;
                    let value = self.read_expr(self.field(child, "value")?)?;
                    items.push(DictItem::Pair { key, value });
                }
                "dictionary_splat" => {
                    if let Some(inner) = self.named_children(child).first() {
                        items.push(DictItem::Spread(self.read_expr(*inner)?));
                    }
                }
                _ => {}
            }
        }

        Ok(Expr::Dict(items))
    }

    fn read_conditional_expression(&self, node: Node) -> Result<Expr, ReadError> {
        // Pattern: body if test else orelse
        let children = self.named_children(node);
        match children.as_slice() {
            [body, test, orelse] => Ok(Expr::IfExp {
                test: Box::new(self.read_expr(*test)?),
                body: Box::new(self.read_expr(*body)?),
                orelse: Box::new(self.read_expr(*orelse)?),
            }),
            _ => Err(ReadError::UnexpectedNode {
                expected: "conditional expression with three parts".into(),
                got: self.node_text(node).to_string(),
            }),
        }
    }

    fn read_lambda(&self, node: Node) -> Result<Expr, ReadError> {
        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.read_parameters(p))
            .transpose()?
            .unwrap_or_default();
        let body = self.read_expr(self.field(node, "body")?)?;

        Ok(Expr::Lambda {
            params,
            body: Box::new(body),
        })
    }

    fn read_concatenated_string(&self, node: Node) -> Result<Expr, ReadError> {
        let mut parts = Vec::new();
        let mut formatted = false;

        for child in self.named_children(node) {
            match self.read_expr(child)? {
                Expr::Constant(Constant::Str {
                    value,
                    formatted: tagged,
                }) => {
                    formatted |= tagged;
                    push_literal(&mut parts, value);
                }
                Expr::FormattedString(inner) => {
                    formatted = true;
                    for part in inner {
                        match part {
                            FStringPart::Literal(text) => push_literal(&mut parts, text),
                            interpolation => parts.push(interpolation),
                        }
                    }
                }
                other => return Ok(other),
            }
        }

        Ok(string_expr(parts, formatted))
    }

    /// Read a single string literal, splitting out f-string interpolations.
    fn read_string(&self, node: Node) -> Result<Expr, ReadError> {
        let text = self.node_text(node);
        let prefix_len = text
            .find(|c: char| c == '"' || c == '\'')
            .unwrap_or(0);
        let prefix = text[..prefix_len].to_ascii_lowercase();
        let rest = &text[prefix_len..];
        let quote_len = if rest.starts_with("\"\"\"") || rest.starts_with("'''") {
            3
        } else {
            1
        };

        let raw = prefix.contains('r');
        let formatted = prefix.contains('f');

        let content_start = node.start_byte() + prefix_len + quote_len;
        let content_end = node.end_byte().saturating_sub(quote_len).max(content_start);

        let mut parts = Vec::new();
        let mut position = content_start;

        if formatted {
            for child in self.named_children(node) {
                if child.kind() != "interpolation" {
                    continue;
                }
                let literal = self.source.get(position..child.start_byte()).unwrap_or("");
                push_literal(&mut parts, decode_literal(literal, raw, formatted));
                parts.push(FStringPart::Interpolation(self.read_interpolation(child)?));
                position = child.end_byte();
            }
        }

        let tail = self.source.get(position..content_end).unwrap_or("");
        push_literal(&mut parts, decode_literal(tail, raw, formatted));

        Ok(string_expr(parts, formatted))
    }

    /// The expression inside `{...}`; conversions and format specs are dropped.
    fn read_interpolation(&self, node: Node) -> Result<Expr, ReadError> {
        if let Some(expr) = node.child_by_field_name("expression") {
            return self.read_expr(expr);
        }
        let children = self.named_children(node);
        let expr = children
            .iter()
            .find(|child| !matches!(child.kind(), "type_conversion" | "format_specifier"))
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: "expression inside interpolation".into(),
                got: self.node_text(node).to_string(),
            })?;
        self.read_expr(*expr)
    }
}

fn push_literal(parts: &mut Vec<FStringPart>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(FStringPart::Literal(last)) = parts.last_mut() {
        last.push_str(&text);
    } else {
        parts.push(FStringPart::Literal(text));
    }
}

/// Collapse string parts into a plain literal when nothing is interpolated.
fn string_expr(parts: Vec<FStringPart>, formatted: bool) -> Expr {
    let has_interpolation = parts
        .iter()
        .any(|part| matches!(part, FStringPart::Interpolation(_)));

    if has_interpolation {
        return Expr::FormattedString(parts);
    }

    let value = parts
        .into_iter()
        .filter_map(|part| match part {
            FStringPart::Literal(text) => Some(text),
            FStringPart::Interpolation(_) => None,
        })
        .collect();
    Expr::Constant(Constant::Str { value, formatted })
}

fn decode_literal(text: &str, raw: bool, formatted: bool) -> String {
    let text = if formatted {
        text.replace("{{", "{").replace("}}", "}")
    } else {
        text.to_string()
    };
    if raw { text } else { decode_escapes(&text) }
}

/// Decode Python escape sequences. Unknown escapes are kept verbatim.
fn decode_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            'x' | 'u' | 'U' => {
                let len = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.clone().take(len).collect();
                let decoded = (digits.len() == len)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        for _ in 0..len {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
            '0'..='7' => {
                let mut digits = String::from(next);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                match u32::from_str_radix(&digits, 8).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => {
                        out.push('\\');
                        out.push_str(&digits);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(source: &str) -> Module {
        read_python(source).unwrap()
    }

    fn single_expr(source: &str) -> Expr {
        match read(source).body.remove(0) {
            Stmt::Expr(expr) => expr,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_assignment() {
        let module = read("x = 42");
        assert_eq!(module.body, vec![Stmt::assign(Expr::name("x"), Expr::int(42))]);
    }

    #[test]
    fn test_chained_assignment_keeps_all_targets() {
        let module = read("a = b = 1");
        match &module.body[0] {
            Stmt::Assign { targets, value } => {
                assert_eq!(targets, &vec![Expr::name("a"), Expr::name("b")]);
                assert_eq!(value, &Some(Expr::int(1)));
            }
            other => panic!("expected Assign, got {other:?}"),
        }
    }

    #[test]
    fn test_annotated_declaration_without_value() {
        let module = read("count: int");
        assert_eq!(
            module.body,
            vec![Stmt::Assign {
                targets: vec![Expr::name("count")],
                value: None,
            }]
        );
    }

    #[test]
    fn test_augmented_assignment() {
        let module = read("total **= 2");
        assert_eq!(
            module.body,
            vec![Stmt::AugAssign {
                target: Expr::name("total"),
                op: BinaryOp::Pow,
                value: Expr::int(2),
            }]
        );
    }

    #[test]
    fn test_function_with_defaults_and_splats() {
        let module = read("def f(a, b=2, *rest, **opts):\n    return a");
        match &module.body[0] {
            Stmt::FunctionDef(def) => {
                assert_eq!(def.name, "f");
                assert_eq!(
                    def.params,
                    vec![
                        Param::positional("a"),
                        Param::with_default("b", Expr::int(2)),
                        Param::var_args("rest"),
                        Param::kw_args("opts"),
                    ]
                );
                assert_eq!(def.body, vec![Stmt::Return(Some(Expr::name("a")))]);
            }
            other => panic!("expected FunctionDef, got {other:?}"),
        }
    }

    #[test]
    fn test_typed_parameters_drop_annotations() {
        let module = read("def f(a: int, b: str = \"x\") -> None:\n    pass");
        match &module.body[0] {
            Stmt::FunctionDef(def) => {
                assert_eq!(
                    def.params,
                    vec![
                        Param::positional("a"),
                        Param::with_default("b", Expr::string("x")),
                    ]
                );
                assert_eq!(def.body, vec![Stmt::Pass]);
            }
            other => panic!("expected FunctionDef, got {other:?}"),
        }
    }

    #[test]
    fn test_elif_chain_nests_in_orelse() {
        let source = "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n";
        let module = read(source);
        match &module.body[0] {
            Stmt::If { test, orelse, .. } => {
                assert_eq!(test, &Expr::name("a"));
                match orelse.as_slice() {
                    [Stmt::If { test, orelse, .. }] => {
                        assert_eq!(test, &Expr::name("b"));
                        assert_eq!(orelse, &vec![Stmt::assign(Expr::name("x"), Expr::int(3))]);
                    }
                    other => panic!("expected nested If, got {other:?}"),
                }
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn test_comparison_chain_operators() {
        let expr = single_expr("a < b not in c");
        assert_eq!(
            expr,
            Expr::compare(
                Expr::name("a"),
                vec![CmpOp::Lt, CmpOp::NotIn],
                vec![Expr::name("b"), Expr::name("c")],
            )
        );
    }

    #[test]
    fn test_boolean_operator_flattens() {
        let expr = single_expr("a and b and c");
        assert_eq!(
            expr,
            Expr::BoolOp {
                op: BoolOp::And,
                values: vec![Expr::name("a"), Expr::name("b"), Expr::name("c")],
            }
        );
    }

    #[test]
    fn test_mixed_boolean_operators_stay_nested() {
        let expr = single_expr("a or b and c");
        assert_eq!(
            expr,
            Expr::BoolOp {
                op: BoolOp::Or,
                values: vec![
                    Expr::name("a"),
                    Expr::BoolOp {
                        op: BoolOp::And,
                        values: vec![Expr::name("b"), Expr::name("c")],
                    },
                ],
            }
        );
    }

    #[test]
    fn test_fstring_parts() {
        let expr = single_expr("f\"Hi {name}, {n + 1}!\"");
        assert_eq!(
            expr,
            Expr::FormattedString(vec![
                FStringPart::Literal("Hi ".into()),
                FStringPart::Interpolation(Expr::name("name")),
                FStringPart::Literal(", ".into()),
                FStringPart::Interpolation(Expr::binary(
                    Expr::name("n"),
                    BinaryOp::Add,
                    Expr::int(1),
                )),
                FStringPart::Literal("!".into()),
            ])
        );
    }

    #[test]
    fn test_fstring_without_interpolation_is_tagged() {
        let expr = single_expr("f'{{plain}}'");
        assert_eq!(
            expr,
            Expr::Constant(Constant::Str {
                value: "{plain}".into(),
                formatted: true,
            })
        );
    }

    #[test]
    fn test_string_escapes_decode() {
        assert_eq!(single_expr(r#""a\tb\n\x41\u00e9""#), Expr::string("a\tb\nAé"));
        assert_eq!(single_expr(r#"r"a\tb""#), Expr::string("a\\tb"));
        assert_eq!(single_expr(r#"'it\'s'"#), Expr::string("it's"));
    }

    #[test]
    fn test_concatenated_strings_merge() {
        assert_eq!(single_expr("\"ab\" 'cd'"), Expr::string("abcd"));
        match single_expr("\"x=\" f\"{x}\"") {
            Expr::FormattedString(parts) => {
                assert_eq!(
                    parts,
                    vec![
                        FStringPart::Literal("x=".into()),
                        FStringPart::Interpolation(Expr::name("x")),
                    ]
                );
            }
            other => panic!("expected FormattedString, got {other:?}"),
        }
    }

    #[test]
    fn test_triple_quoted_string() {
        assert_eq!(single_expr("\"\"\"doc\nline\"\"\""), Expr::string("doc\nline"));
    }

    #[test]
    fn test_parentheses_are_preserved() {
        let expr = single_expr("(a + b) * c");
        assert_eq!(
            expr,
            Expr::binary(
                Expr::Paren(Box::new(Expr::binary(
                    Expr::name("a"),
                    BinaryOp::Add,
                    Expr::name("b"),
                ))),
                BinaryOp::Mult,
                Expr::name("c"),
            )
        );
    }

    #[test]
    fn test_call_drops_keyword_arguments() {
        let expr = single_expr("print(\"a\", x, end=\"\")");
        assert_eq!(
            expr,
            Expr::call(Expr::name("print"), vec![Expr::string("a"), Expr::name("x")])
        );
    }

    #[test]
    fn test_class_definition() {
        let source = "class Dog(Animal):\n    def bark(self):\n        return 1\n";
        match &read(source).body[0] {
            Stmt::ClassDef(class) => {
                assert_eq!(class.name, "Dog");
                assert_eq!(class.bases, vec![Expr::name("Animal")]);
                assert_eq!(class.body.len(), 1);
                assert!(matches!(&class.body[0], Stmt::FunctionDef(f) if f.name == "bark"));
            }
            other => panic!("expected ClassDef, got {other:?}"),
        }
    }

    #[test]
    fn test_decorated_function_reads_definition() {
        let module = read("@cache\ndef f():\n    return 1\n");
        assert!(matches!(&module.body[0], Stmt::FunctionDef(f) if f.name == "f"));
    }

    #[test]
    fn test_unsupported_statements_are_named() {
        let module = read("import os\nfrom x import y\nraise ValueError()\nglobal g\n");
        assert_eq!(
            module.body,
            vec![
                Stmt::unsupported("Import"),
                Stmt::unsupported("ImportFrom"),
                Stmt::unsupported("Raise"),
                Stmt::unsupported("Global"),
            ]
        );
    }

    #[test]
    fn test_unsupported_expressions_are_named() {
        assert_eq!(
            single_expr("[x for x in xs]"),
            Expr::Unsupported {
                kind: "ListComp".into()
            }
        );
        match single_expr("xs[1:2]") {
            Expr::Subscript { index, .. } => {
                assert_eq!(*index, Expr::Unsupported { kind: "Slice".into() });
            }
            other => panic!("expected Subscript, got {other:?}"),
        }
    }

    #[test]
    fn test_comments_are_dropped() {
        let module = read("# leading\nx = 1  # trailing\n");
        assert_eq!(module.body.len(), 1);
    }

    #[test]
    fn test_for_else_is_kept() {
        let module = read("for i in xs:\n    pass\nelse:\n    done()\n");
        match &module.body[0] {
            Stmt::For { orelse, .. } => assert_eq!(orelse.len(), 1),
            other => panic!("expected For, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = read_python("x = 1\ny = = 2\n").unwrap_err();
        match err {
            ReadError::Syntax { line, .. } => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_python2_print_is_rejected() {
        let err = read_python("x = 1\nprint 'hi'\n").unwrap_err();
        match err {
            ReadError::Syntax { line, column, .. } => assert_eq!((line, column), (2, 1)),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_python2_exec_is_rejected() {
        let err = read_python("def f():\n    exec 'x = 1'\n").unwrap_err();
        assert!(matches!(err, ReadError::Syntax { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn test_legacy_not_equal_is_rejected() {
        let err = read_python("x = a <> b").unwrap_err();
        match err {
            ReadError::Syntax {
                message,
                line,
                column,
            } => {
                assert_eq!((line, column), (1, 7));
                assert!(message.contains("<>"), "{message}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_reader_metadata() {
        assert_eq!(PYTHON_READER.language(), "python");
        assert!(PYTHON_READER.extensions().contains(&"py"));
    }
}
