//! Statement and expression lowering

use crate::board::render_board;
use crate::error::CodegenError;
use crate::format::{copy_string, flag, limit_literal, recopy_string, string_literal};
use crate::{CBackend, EPILOGUE, PROLOGUE};
use gd_ast::{Ast, NodeId, NodeKind, NodeValue, Visitor};
use log::{debug, trace, warn};

/// C-level type a Griddy value lowers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    /// `int`, shared by integers, booleans and arithmetic
    Integer,
    /// Heap allocated `char *`
    Text,
    /// `struct Piece`
    Piece,
    /// `struct Piece *[h][w]`
    Board,
}

impl ValueType {
    fn describe(self) -> &'static str {
        match self {
            Self::Integer => "an integer",
            Self::Text => "a string",
            Self::Piece => "a piece",
            Self::Board => "a board",
        }
    }
}

fn required_child(ast: &Ast, node: NodeId, index: usize, what: &str) -> Result<NodeId, CodegenError> {
    ast.child(node, index)
        .ok_or_else(|| CodegenError::malformed(ast, node, format!("missing {what}")))
}

fn required_ident<'a>(ast: &'a Ast, node: NodeId, what: &str) -> Result<&'a str, CodegenError> {
    ast.ident_name(node)
        .ok_or_else(|| CodegenError::malformed(ast, node, format!("{what} is not an identifier")))
}

/// Type of a literal or declaration node
fn classify(ast: &Ast, value: NodeId, context: &str) -> Result<ValueType, CodegenError> {
    match ast.kind(value) {
        NodeKind::Integer | NodeKind::Boolean | NodeKind::Expr => Ok(ValueType::Integer),
        NodeKind::String => Ok(ValueType::Text),
        NodeKind::Piece | NodeKind::Access => Ok(ValueType::Piece),
        NodeKind::Board => Ok(ValueType::Board),
        NodeKind::Empty => match ast.text(value) {
            Some("number" | "boolean") => Ok(ValueType::Integer),
            Some("string") => Ok(ValueType::Text),
            _ => Err(CodegenError::unsupported(ast, value, context)),
        },
        NodeKind::Unrefined => Err(CodegenError::internal(ast, value)),
        NodeKind::Start
        | NodeKind::Output
        | NodeKind::Game
        | NodeKind::Assign
        | NodeKind::Operator
        | NodeKind::Ident
        | NodeKind::Place
        | NodeKind::Pair
        | NodeKind::List => Err(CodegenError::unsupported(ast, value, context)),
    }
}

impl CBackend<'_> {
    /// Type of `value`, looking through identifiers to the value they are bound to
    ///
    /// Also returns the node the type was read from.
    fn value_type(&self, ast: &Ast, value: NodeId, context: &str) -> Result<(ValueType, NodeId), CodegenError> {
        let effective = match ast.ident_name(value) {
            Some(name) => self.resolver.effective_value(value, name)?,
            None => value,
        };
        Ok((classify(ast, effective, context)?, effective))
    }

    fn expect_type(
        &self,
        ast: &Ast,
        value: NodeId,
        expected: ValueType,
        context: &str,
    ) -> Result<NodeId, CodegenError> {
        let (found, effective) = self.value_type(ast, value, context)?;
        if found == expected {
            Ok(effective)
        } else {
            Err(CodegenError::unsupported(
                ast,
                value,
                format!("{context} expects {}", expected.describe()),
            ))
        }
    }

    /// Lower one statement of the setup or game section
    fn visit_statement(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        match ast.kind(node) {
            NodeKind::Assign | NodeKind::Output | NodeKind::Place => self.visit_node(ast, node, out),
            NodeKind::Unrefined => Err(CodegenError::internal(ast, node)),
            _ => Err(CodegenError::unsupported(ast, node, "statement")),
        }
    }

    fn declare(&mut self, ast: &Ast, name: &str, value: NodeId, out: &mut String) -> Result<(), CodegenError> {
        let context = format!("assignment to `{name}`");
        match ast.kind(value) {
            NodeKind::String => {
                out.push_str(&format!("char *{name};\n"));
                out.push_str(&copy_string(name, ast.text(value).unwrap_or_default()));
            }
            NodeKind::Integer | NodeKind::Boolean | NodeKind::Expr => {
                out.push_str(&format!("int {name} = "));
                self.visit_node(ast, value, out)?;
                out.push_str(";\n");
            }
            NodeKind::Empty => {
                self.visit_node(ast, value, out)?;
                // Strings start as an empty heap buffer so realloc, strlen and printf are defined
                let initial = match classify(ast, value, &context)? {
                    ValueType::Text => "calloc(1, sizeof(char))",
                    ValueType::Integer | ValueType::Piece | ValueType::Board => "0",
                };
                out.push_str(&format!("{name} = {initial};\n"));
            }
            NodeKind::Board => {
                let (width, height) = dimensions(ast, value)?;
                out.push_str(&format!(
                    "struct Piece *{name}[{height}][{width}];\n\
                     for (int y = 0; y < {height}; y++)\n\
                     for (int x = 0; x < {width}; x++)\n\
                     {name}[y][x] = &empty_piece;\n"
                ));
            }
            NodeKind::Piece => self.declare_piece(ast, name, value, out)?,
            NodeKind::Access => {
                out.push_str(&format!("struct Piece {name};\n{name} = "));
                self.visit_node(ast, value, out)?;
                out.push_str(";\n");
            }
            NodeKind::Ident => {
                let alias = required_ident(ast, value, "assigned value")?;
                match self.value_type(ast, value, &context)?.0 {
                    ValueType::Integer => out.push_str(&format!("int {name} = {alias};\n")),
                    ValueType::Text => out.push_str(&format!(
                        "char *{name};\n\
                         {name} = calloc(strlen({alias}) + 1, sizeof(char));\n\
                         strcpy({name}, {alias});\n"
                    )),
                    ValueType::Piece => out.push_str(&format!("struct Piece {name};\n{name} = {alias};\n")),
                    ValueType::Board => return Err(CodegenError::unsupported(ast, value, context)),
                }
            }
            NodeKind::Unrefined => return Err(CodegenError::internal(ast, value)),
            _ => return Err(CodegenError::unsupported(ast, value, context)),
        }
        Ok(())
    }

    fn reassign(
        &mut self,
        ast: &Ast,
        target: NodeId,
        name: &str,
        value: NodeId,
        out: &mut String,
    ) -> Result<(), CodegenError> {
        let context = format!("re-assignment of `{name}`");
        match ast.kind(value) {
            NodeKind::Empty | NodeKind::Piece => return Err(CodegenError::unsupported(ast, value, context)),
            NodeKind::Unrefined => return Err(CodegenError::internal(ast, value)),
            _ => {}
        }

        let previous_value = self.resolver.effective_value(target, name)?;
        let previous = classify(ast, previous_value, &context)?;
        let (current, _) = self.value_type(ast, value, &context)?;
        if previous != current {
            return Err(CodegenError::unsupported(
                ast,
                value,
                format!("{context}, declared as {}", previous.describe()),
            ));
        }

        match (current, ast.kind(value)) {
            (ValueType::Board, _) => {
                warn!("board `{name}` re-assigned at {}; keeping the original board", ast.span(value));
                out.push_str("/* Board re-assignment is not supported */\n");
            }
            (ValueType::Text, NodeKind::String) => {
                out.push_str(&recopy_string(name, ast.text(value).unwrap_or_default()));
            }
            (ValueType::Text, _) => {
                let alias = required_ident(ast, value, "assigned value")?;
                out.push_str(&format!(
                    "{name} = realloc({name}, strlen({alias}) + 1);\nstrcpy({name}, {alias});\n"
                ));
            }
            (ValueType::Integer | ValueType::Piece, _) => {
                out.push_str(&format!("{name} = "));
                self.visit_node(ast, value, out)?;
                out.push_str(";\n");
            }
        }
        Ok(())
    }

    fn declare_piece(&mut self, ast: &Ast, name: &str, value: NodeId, out: &mut String) -> Result<(), CodegenError> {
        out.push_str(&format!("struct Piece {name};\n"));
        let properties: &[(NodeId, NodeId)] = match ast.value(value) {
            NodeValue::Properties(properties) => properties.as_slice(),
            _ => &[],
        };

        // Property values are literals; the per-player copies are built from them before lowering
        let mut written = Vec::new();
        for &(key, property_value) in properties {
            let property = required_ident(ast, key, "piece property")?;
            let field = format!("{name}.{property}");
            match (property, ast.kind(property_value)) {
                // Placement data lives in the structural model
                ("start" | "moves", _) => continue,
                ("name", NodeKind::String) => {
                    out.push_str(&copy_string(&field, ast.text(property_value).unwrap_or_default()));
                }
                ("limit", NodeKind::Integer) | ("capture" | "placeable" | "can_jump", NodeKind::Boolean) => {
                    out.push_str(&format!("{field} = "));
                    self.visit_node(ast, property_value, out)?;
                    out.push_str(";\n");
                }
                (_, NodeKind::Unrefined) => return Err(CodegenError::internal(ast, property_value)),
                _ => {
                    return Err(CodegenError::unsupported(
                        ast,
                        property_value,
                        format!("property `{property}` of piece `{name}`"),
                    ));
                }
            }
            written.push(property);
        }

        let defaults = self.structure.setup.defaults();
        if !written.contains(&"name") {
            out.push_str(&copy_string(&format!("{name}.name"), name));
        }
        if !written.contains(&"limit") {
            out.push_str(&format!("{name}.limit = {};\n", limit_literal(defaults.limit)));
        }
        for (property, default) in [
            ("capture", defaults.capture),
            ("placeable", defaults.placeable),
            ("can_jump", defaults.can_jump),
        ] {
            if !written.contains(&property) {
                out.push_str(&format!("{name}.{property} = {};\n", flag(default)));
            }
        }
        out.push_str(&format!("{name}.count = 0;\n"));
        Ok(())
    }
}

fn dimensions(ast: &Ast, board: NodeId) -> Result<(u32, u32), CodegenError> {
    match *ast.value(board) {
        NodeValue::Dimensions { width, height } => Ok((width, height)),
        _ => Err(CodegenError::malformed(ast, board, "board without dimensions")),
    }
}

impl Visitor for CBackend<'_> {
    type Error = CodegenError;

    fn visit_start(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        debug!("lowering program with {} nodes", ast.len());
        out.push_str(PROLOGUE);

        let mut setup = String::new();
        let mut game = String::new();
        for &child in ast.children(node) {
            if ast.kind(child) == NodeKind::Game {
                self.visit_node(ast, child, &mut game)?;
            } else {
                self.visit_statement(ast, child, &mut setup)?;
            }
        }
        self.structure.setup.body.push_str(&setup);
        self.structure.game.body.push_str(&game);

        out.push_str(&self.structure.render(&self.format)?);
        out.push_str(EPILOGUE);
        Ok(())
    }

    fn visit_game(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        for &child in ast.children(node) {
            self.visit_statement(ast, child, out)?;
        }
        Ok(())
    }

    fn visit_output(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        let arg = required_child(ast, node, 0, "output argument")?;
        trace!("output of {}", ast.describe(arg));
        if matches!(ast.kind(arg), NodeKind::Empty | NodeKind::Piece | NodeKind::Board) {
            return Err(CodegenError::unsupported(ast, arg, "output"));
        }
        let (value_type, effective) = self.value_type(ast, arg, "output")?;
        match value_type {
            ValueType::Integer => {
                out.push_str("printf(\"%d\\n\", ");
                self.visit_node(ast, arg, out)?;
                out.push_str(");\n");
            }
            ValueType::Text => {
                out.push_str("printf(\"%s\\n\", ");
                self.visit_node(ast, arg, out)?;
                out.push_str(");\n");
            }
            ValueType::Piece => {
                out.push_str("printf(\"%s\\n\", ");
                self.visit_node(ast, arg, out)?;
                out.push_str(".name);\n");
            }
            ValueType::Board => {
                let Some(board) = ast.ident_name(arg) else {
                    return Err(CodegenError::unsupported(ast, arg, "output"));
                };
                let (width, height) = dimensions(ast, effective)?;
                out.push_str(&render_board(board, width, height));
            }
        }
        Ok(())
    }

    fn visit_assign(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        let target = required_child(ast, node, 0, "assignment target")?;
        let value = required_child(ast, node, 1, "assignment value")?;
        let name = required_ident(ast, target, "assignment target")?;

        if self.resolver.is_declared_in_scope(target, name) {
            trace!("re-assigning `{name}` to {}", ast.describe(value));
            self.reassign(ast, target, name, value, out)
        } else {
            trace!("declaring `{name}` as {}", ast.describe(value));
            self.declare(ast, name, value, out)
        }
    }

    fn visit_expr(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        out.push('(');
        for &child in ast.children(node) {
            match ast.kind(child) {
                NodeKind::Ident => {
                    self.expect_type(ast, child, ValueType::Integer, "expression operand")?;
                }
                NodeKind::Operator | NodeKind::Integer | NodeKind::Boolean | NodeKind::Expr => {}
                NodeKind::Unrefined => return Err(CodegenError::internal(ast, child)),
                _ => return Err(CodegenError::unsupported(ast, child, "expression operand")),
            }
            self.visit_node(ast, child, out)?;
        }
        out.push(')');
        Ok(())
    }

    fn visit_empty(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        match classify(ast, node, "declaration")? {
            ValueType::Integer => out.push_str("int "),
            ValueType::Text => out.push_str("char *"),
            ValueType::Piece | ValueType::Board => {
                return Err(CodegenError::unsupported(ast, node, "declaration"));
            }
        }
        Ok(())
    }

    fn visit_board(&mut self, _ast: &Ast, _node: NodeId, _out: &mut String) -> Result<(), CodegenError> {
        // Boards are declared by the assignment that binds them
        Ok(())
    }

    fn visit_operator(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        let symbol = ast
            .text(node)
            .ok_or_else(|| CodegenError::malformed(ast, node, "operator without a symbol"))?;
        out.push_str(symbol);
        Ok(())
    }

    fn visit_string(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        out.push_str(&string_literal(ast.text(node).unwrap_or_default()));
        Ok(())
    }

    fn visit_ident(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        out.push_str(required_ident(ast, node, "identifier")?);
        Ok(())
    }

    fn visit_integer(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        match *ast.value(node) {
            NodeValue::Integer(value) => {
                out.push_str(&value.to_string());
                Ok(())
            }
            _ => Err(CodegenError::malformed(ast, node, "integer without a value")),
        }
    }

    fn visit_boolean(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        match *ast.value(node) {
            NodeValue::Boolean(value) => {
                out.push_str(flag(value));
                Ok(())
            }
            _ => Err(CodegenError::malformed(ast, node, "boolean without a value")),
        }
    }

    fn visit_access(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        let position = required_child(ast, node, 0, "cell position")?;
        let board_ref = required_child(ast, node, 1, "board")?;
        let x = required_child(ast, position, 0, "column")?;
        let y = required_child(ast, position, 1, "row")?;
        let board = required_ident(ast, board_ref, "accessed board")?;
        self.expect_type(ast, board_ref, ValueType::Board, "cell access")?;
        self.expect_type(ast, x, ValueType::Integer, "cell column")?;
        self.expect_type(ast, y, ValueType::Integer, "cell row")?;

        out.push_str(&format!("(*{board}["));
        self.visit_node(ast, y, out)?;
        out.push_str("-1][");
        self.visit_node(ast, x, out)?;
        out.push_str("-1])");
        Ok(())
    }

    fn visit_place(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), CodegenError> {
        let piece_ref = required_child(ast, node, 0, "placed piece")?;
        let board_ref = required_child(ast, node, 1, "board")?;
        let position = required_child(ast, node, 2, "cell position")?;
        let x = required_child(ast, position, 0, "column")?;
        let y = required_child(ast, position, 1, "row")?;
        let piece = required_ident(ast, piece_ref, "placed piece")?;
        let board = required_ident(ast, board_ref, "board")?;
        self.expect_type(ast, piece_ref, ValueType::Piece, "placement")?;
        self.expect_type(ast, board_ref, ValueType::Board, "placement")?;
        self.expect_type(ast, x, ValueType::Integer, "placement column")?;
        self.expect_type(ast, y, ValueType::Integer, "placement row")?;
        trace!("placing `{piece}` on `{board}`");

        out.push_str(&format!("if ({piece}.count < {piece}.limit) {{\n{board}["));
        self.visit_node(ast, y, out)?;
        out.push_str("-1][");
        self.visit_node(ast, x, out)?;
        out.push_str(&format!("-1] = &{piece};\n{piece}.count++;\n}}\n"));
        Ok(())
    }

    fn visit_piece(&mut self, ast: &Ast, node: NodeId, _out: &mut String) -> Result<(), CodegenError> {
        Err(CodegenError::unsupported(ast, node, "piece literal outside an assignment"))
    }

    fn visit_pair(&mut self, ast: &Ast, node: NodeId, _out: &mut String) -> Result<(), CodegenError> {
        Err(CodegenError::unsupported(ast, node, "expression"))
    }

    fn visit_list(&mut self, ast: &Ast, node: NodeId, _out: &mut String) -> Result<(), CodegenError> {
        Err(CodegenError::unsupported(ast, node, "expression"))
    }

    fn visit_unrefined(&mut self, ast: &Ast, node: NodeId, _out: &mut String) -> Result<(), CodegenError> {
        Err(CodegenError::internal(ast, node))
    }
}
