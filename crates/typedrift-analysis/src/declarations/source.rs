//! Tree-sitter front end for baseline declaration sources.
//!
//! Parses a TypeScript source and extracts every class and enum
//! declaration as a flat syntactic member list. Categorization into
//! member bags happens in [`super::members`]; this module only records
//! what the syntax says.

use std::path::Path;

use tree_sitter::{Node, Parser};

use typedrift_core::errors::SourceError;
use typedrift_core::types::member_bag::EnumValue;
use typedrift_core::types::DeclarationKind;

/// A member key as written in the baseline source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKey {
    /// A plain identifier or quoted string name.
    Ident(String),
    /// A computed key of the recognized `Symbol.<name>` pattern.
    WellKnownSymbol(String),
    /// Any other computed or exotic key form; dropped with a warning
    /// during extraction, never silently miscategorized.
    Unsupported(String),
}

/// What kind of member a syntax node declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Constructor { param_count: usize },
    Method,
    Getter,
    Setter,
    Field,
}

/// One member of a class declaration, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMemberSyntax {
    pub key: MemberKey,
    pub kind: MemberKind,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_optional: bool,
}

/// One class or enum declaration lifted out of a baseline source file.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationSyntax {
    pub identifier: String,
    pub kind: DeclarationKind,
    pub is_abstract: bool,
    /// Class members; empty for enums.
    pub members: Vec<ClassMemberSyntax>,
    /// Enum entries with resolved values; empty for classes.
    pub entries: Vec<(String, EnumValue)>,
    /// Non-fatal notes recorded while reading this declaration.
    pub warns: Vec<String>,
}

/// Parse a baseline source and return its declarations, in source order.
///
/// A source tree-sitter cannot parse cleanly is a file-level fatal error:
/// the whole file's declaration set is aborted, no partial results.
pub fn parse_declarations(
    source: &str,
    path: &Path,
) -> Result<Vec<DeclarationSyntax>, SourceError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .map_err(|e| SourceError::GrammarUnavailable {
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| SourceError::Unparseable {
            path: path.to_path_buf(),
            message: "tree-sitter returned no tree".to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(SourceError::Unparseable {
            path: path.to_path_buf(),
            message: "syntax errors in declaration source".to_string(),
        });
    }

    let bytes = source.as_bytes();
    let mut declarations = Vec::new();
    collect_declarations(root, bytes, &mut declarations);
    Ok(declarations)
}

fn collect_declarations(node: Node, source: &[u8], out: &mut Vec<DeclarationSyntax>) {
    match node.kind() {
        "class_declaration" => {
            if let Some(decl) = read_class(node, source, false) {
                out.push(decl);
            }
            return;
        }
        "abstract_class_declaration" => {
            if let Some(decl) = read_class(node, source, true) {
                out.push(decl);
            }
            return;
        }
        "enum_declaration" => {
            if let Some(decl) = read_enum(node, source) {
                out.push(decl);
            }
            return;
        }
        _ => {}
    }

    // Declarations sit at the top level or directly under export/ambient
    // statements; nothing deeper is a baseline declaration.
    if matches!(
        node.kind(),
        "program" | "export_statement" | "ambient_declaration"
    ) {
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                collect_declarations(child, source, out);
            }
        }
    }
}

// ---- Classes ----

fn read_class(node: Node, source: &[u8], is_abstract: bool) -> Option<DeclarationSyntax> {
    let identifier = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))?;

    let mut members = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        for i in 0..body.child_count() {
            if let Some(child) = body.child(i) {
                match child.kind() {
                    "method_definition" | "method_signature" => {
                        if let Some(member) = read_method(child, source, false) {
                            members.push(member);
                        }
                    }
                    "abstract_method_signature" => {
                        if let Some(member) = read_method(child, source, true) {
                            members.push(member);
                        }
                    }
                    "public_field_definition" => {
                        if let Some(member) = read_field(child, source) {
                            members.push(member);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    Some(DeclarationSyntax {
        identifier,
        kind: DeclarationKind::Class,
        is_abstract,
        members,
        entries: Vec::new(),
        warns: Vec::new(),
    })
}

fn read_method(node: Node, source: &[u8], is_abstract: bool) -> Option<ClassMemberSyntax> {
    let key = read_member_key(node, source)?;

    let kind = if matches!(&key, MemberKey::Ident(name) if name == "constructor") {
        MemberKind::Constructor {
            param_count: count_parameters(node),
        }
    } else if has_child_token(node, "get") {
        MemberKind::Getter
    } else if has_child_token(node, "set") {
        MemberKind::Setter
    } else {
        MemberKind::Method
    };

    Some(ClassMemberSyntax {
        key,
        kind,
        is_static: has_child_token(node, "static"),
        is_abstract: is_abstract || has_child_token(node, "abstract"),
        is_optional: has_child_token(node, "?"),
    })
}

fn read_field(node: Node, source: &[u8]) -> Option<ClassMemberSyntax> {
    let key = read_member_key(node, source)?;
    Some(ClassMemberSyntax {
        key,
        kind: MemberKind::Field,
        is_static: has_child_token(node, "static"),
        is_abstract: has_child_token(node, "abstract"),
        is_optional: has_child_token(node, "?"),
    })
}

/// Read the declared key of a class member. Private (`#name`) members are
/// never observable on the live side, so they yield `None` and are
/// skipped entirely, like abstract members.
fn read_member_key(node: Node, source: &[u8]) -> Option<MemberKey> {
    let name_node = node.child_by_field_name("name")?;
    match name_node.kind() {
        "property_identifier" | "identifier" => {
            Some(MemberKey::Ident(node_text(name_node, source)))
        }
        "string" => Some(MemberKey::Ident(strip_quotes(&node_text(name_node, source)))),
        "private_property_identifier" => None,
        "computed_property_name" => {
            let inner = node_text(name_node, source);
            let trimmed = inner.trim_matches(|c| c == '[' || c == ']');
            match trimmed.strip_prefix("Symbol.") {
                Some(symbol) if is_identifier(symbol) => {
                    Some(MemberKey::WellKnownSymbol(symbol.to_string()))
                }
                _ => Some(MemberKey::Unsupported(inner)),
            }
        }
        _ => Some(MemberKey::Unsupported(node_text(name_node, source))),
    }
}

fn count_parameters(node: Node) -> usize {
    let Some(params) = node.child_by_field_name("parameters") else {
        return 0;
    };
    let mut count = 0;
    for i in 0..params.child_count() {
        if let Some(child) = params.child(i) {
            if matches!(
                child.kind(),
                "required_parameter" | "optional_parameter" | "rest_parameter"
            ) {
                count += 1;
            }
        }
    }
    count
}

// ---- Enums ----

fn read_enum(node: Node, source: &[u8]) -> Option<DeclarationSyntax> {
    let identifier = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))?;

    let mut entries = Vec::new();
    let mut warns = Vec::new();
    // Auto-increment counter for value-less members, following enum
    // semantics: starts at 0, resumes after every explicit numeric value,
    // and is lost after a string value.
    let mut counter: Option<f64> = Some(0.0);

    if let Some(body) = node.child_by_field_name("body") {
        for i in 0..body.child_count() {
            if let Some(child) = body.child(i) {
                match child.kind() {
                    "enum_assignment" => {
                        let Some(name) = child
                            .child_by_field_name("name")
                            .map(|n| enum_key_text(n, source))
                        else {
                            continue;
                        };
                        match child.child_by_field_name("value").and_then(|v| read_enum_value(v, source)) {
                            Some(value) => {
                                counter = match &value {
                                    EnumValue::Num(n) => Some(n + 1.0),
                                    EnumValue::Str(_) => None,
                                };
                                entries.push((name, value));
                            }
                            None => {
                                warns.push(format!(
                                    "{identifier}.{name}: unsupported initializer, member skipped"
                                ));
                                counter = None;
                            }
                        }
                    }
                    "property_identifier" | "string" => {
                        let name = enum_key_text(child, source);
                        match counter {
                            Some(value) => {
                                entries.push((name, EnumValue::Num(value)));
                                counter = Some(value + 1.0);
                            }
                            None => {
                                warns.push(format!(
                                    "{identifier}.{name}: no computable value, member skipped"
                                ));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    Some(DeclarationSyntax {
        identifier,
        kind: DeclarationKind::Enum,
        is_abstract: false,
        members: Vec::new(),
        entries,
        warns,
    })
}

fn enum_key_text(node: Node, source: &[u8]) -> String {
    let text = node_text(node, source);
    if node.kind() == "string" {
        strip_quotes(&text)
    } else {
        text
    }
}

fn read_enum_value(node: Node, source: &[u8]) -> Option<EnumValue> {
    match node.kind() {
        "number" => parse_number(&node_text(node, source)).map(EnumValue::Num),
        "string" => Some(EnumValue::Str(strip_quotes(&node_text(node, source)))),
        "unary_expression" => {
            let text = node_text(node, source);
            let negated = text.strip_prefix('-')?;
            parse_number(negated.trim()).map(|n| EnumValue::Num(-n))
        }
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('_', "");
    if let Some(hex) = cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }
    cleaned.parse::<f64>().ok()
}

// ---- Utilities ----

fn node_text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}

fn strip_quotes(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn has_child_token(node: Node, token: &str) -> bool {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == token {
                return true;
            }
        }
    }
    false
}
