//! PHP front end: parse with tree-sitter and decode call expressions into [`CallNode`]s.
//!
//! Decoding happens once, here. The matcher never sees a tree-sitter node.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::Error;
use crate::types::{Argument, CallNode, NodeId};

/// Maximum source file size (16 MiB).
const MAX_FILE_SIZE: usize = 16 * 1024 * 1024;

/// Parse PHP source into a tree-sitter tree.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the source is too large, the language
/// cannot be set, or parsing fails.
pub fn parse_source(file_path: &Path, source: &str, language: &Language) -> Result<Tree, Error> {
    if source.len() > MAX_FILE_SIZE {
        return Err(Error::ParseFailed {
            file: file_path.to_path_buf(),
            reason: format!("{} bytes exceeds the {MAX_FILE_SIZE} byte limit", source.len()),
        });
    }

    let mut parser = Parser::new();
    parser.set_language(language).map_err(|e| {
        return Error::ParseFailed {
            file: file_path.to_path_buf(),
            reason: e.to_string(),
        };
    })?;

    return parser.parse(source, None).ok_or_else(|| {
        return Error::ParseFailed {
            file: file_path.to_path_buf(),
            reason: "tree-sitter returned None".to_string(),
        };
    });
}

/// Decode every call expression in the tree, in document order.
/// Calls nested inside arguments are decoded too.
pub fn collect_calls(root: Node<'_>, source: &str) -> Vec<CallNode> {
    let mut calls = Vec::new();
    let mut cursor = root.walk();

    // Pre-order walk without recursion; PHP files can nest deeply.
    loop {
        if let Some(call) = decode_call(cursor.node(), source) {
            calls.push(call);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return calls;
            }
        }
    }
}

/// Decode one node into a call shape, or `None` if it is not a candidate.
pub fn decode_call(node: Node<'_>, source: &str) -> Option<CallNode> {
    return match node.kind() {
        "function_call_expression" => {
            let function = node.child_by_field_name("function")?;
            if !is_name_like(function) {
                return None;
            }
            Some(CallNode::FunctionCall {
                args: decode_arguments(node, source),
                name: node_text(function, source)?.to_string(),
                node: node_id(node),
            })
        },
        "member_call_expression" | "nullsafe_member_call_expression" => {
            let name = node.child_by_field_name("name")?;
            if name.kind() != "name" {
                return None;
            }
            Some(CallNode::MethodCall {
                args: decode_arguments(node, source),
                method: node_text(name, source)?.to_string(),
                node: node_id(node),
            })
        },
        "scoped_call_expression" => {
            let scope = node.child_by_field_name("scope")?;
            let name = node.child_by_field_name("name")?;
            if !is_name_like(scope) || name.kind() != "name" {
                return None;
            }
            Some(CallNode::StaticCall {
                args: decode_arguments(node, source),
                class: node_text(scope, source)?.to_string(),
                method: node_text(name, source)?.to_string(),
                node: node_id(node),
            })
        },
        _ => None,
    };
}

/// Whether a callee or scope node is a literal identifier rather than an expression.
fn is_name_like(node: Node<'_>) -> bool {
    return matches!(node.kind(), "name" | "qualified_name" | "relative_name");
}

/// Location and byte range of a node.
fn node_id(node: Node<'_>) -> NodeId {
    let start = node.start_position();
    return NodeId {
        byte_range: node.start_byte()..node.end_byte(),
        column: start.column,
        row: start.row,
    };
}

/// Source text covered by a node.
fn node_text<'a>(node: Node<'_>, source: &'a str) -> Option<&'a str> {
    return source.get(node.start_byte()..node.end_byte());
}

/// Decode the `arguments` field of a call, in source order.
/// First-class callable syntax `f(...)` has no arguments.
fn decode_arguments(call: Node<'_>, source: &str) -> Vec<Argument> {
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };

    let mut cursor = arguments.walk();
    return arguments
        .named_children(&mut cursor)
        .filter(|child| return child.kind() == "argument")
        .map(|child| return decode_argument(child, source))
        .collect();
}

/// Classify one `argument` node.
fn decode_argument(argument: Node<'_>, source: &str) -> Argument {
    if let Some(name) = argument.child_by_field_name("name") {
        return Argument::Named {
            name: node_text(name, source).unwrap_or_default().to_string(),
        };
    }

    let mut cursor = argument.walk();
    let Some(value) = argument.named_children(&mut cursor).last() else {
        return Argument::Other;
    };

    return match value.kind() {
        "variadic_unpacking" => Argument::Spread,
        "string" => node_text(value, source)
            .and_then(unescape_single_quoted)
            .map_or(Argument::Other, Argument::StringLiteral),
        "encapsed_string" if is_plain_encapsed(value) => node_text(value, source)
            .and_then(unescape_double_quoted)
            .map_or(Argument::Other, Argument::StringLiteral),
        _ => Argument::Other,
    };
}

/// Whether a double-quoted string has no interpolation.
fn is_plain_encapsed(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    return node
        .named_children(&mut cursor)
        .all(|child| return matches!(child.kind(), "string" | "string_content" | "string_value" | "escape_sequence"));
}

/// Strip an optional binary prefix and the surrounding quotes.
fn strip_quotes(text: &str, quote: char) -> Option<&str> {
    let text = text.strip_prefix(['b', 'B']).unwrap_or(text);
    return text.strip_prefix(quote)?.strip_suffix(quote);
}

/// Value of a single-quoted literal: only `\\` and `\'` are escapes.
fn unescape_single_quoted(text: &str) -> Option<String> {
    let body = strip_quotes(text, '\'')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && (next == '\\' || next == '\'')
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    return Some(out);
}

/// Value of an interpolation-free double-quoted literal.
/// Unknown escapes are kept verbatim, as PHP does. Returns `None` when an
/// escape yields a byte outside ASCII or is malformed, so the literal is
/// treated as dynamic.
fn unescape_double_quoted(text: &str) -> Option<String> {
    let body = strip_quotes(text, '"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&next) = chars.peek() else {
            out.push('\\');
            continue;
        };
        let decoded = match next {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'v' => '\u{0b}',
            'e' => '\u{1b}',
            'f' => '\u{0c}',
            '\\' | '$' | '"' => next,
            '0'..='7' => {
                let value = take_digits(&mut chars, 8, 3);
                out.push(ascii_char(value & 0xFF)?);
                continue;
            },
            'x' if second_char(&chars).is_some_and(|digit| return digit.is_ascii_hexdigit()) => {
                chars.next();
                out.push(ascii_char(take_digits(&mut chars, 16, 2))?);
                continue;
            },
            'u' if second_char(&chars) == Some('{') => {
                chars.next();
                chars.next();
                if !chars.peek().is_some_and(char::is_ascii_hexdigit) {
                    return None;
                }
                let value = take_digits(&mut chars, 16, usize::MAX);
                if chars.next() != Some('}') {
                    return None;
                }
                out.push(char::from_u32(value)?);
                continue;
            },
            _ => {
                out.push('\\');
                continue;
            },
        };
        out.push(decoded);
        chars.next();
    }
    return Some(out);
}

/// The character after the next one, without consuming either.
fn second_char(chars: &Peekable<Chars<'_>>) -> Option<char> {
    let mut ahead = chars.clone();
    ahead.next();
    return ahead.next();
}

/// Consume up to `max` digits in `radix` and return their value.
fn take_digits(chars: &mut Peekable<Chars<'_>>, radix: u32, max: usize) -> u32 {
    let mut value: u32 = 0;
    let mut taken = 0;
    while taken < max {
        let Some(digit) = chars.peek().and_then(|c| return c.to_digit(radix)) else {
            break;
        };
        value = value.saturating_mul(radix).saturating_add(digit);
        chars.next();
        taken = taken.saturating_add(1);
    }
    return value;
}

/// A byte value as a character, if it is ASCII.
fn ascii_char(value: u32) -> Option<char> {
    return u8::try_from(value).ok().filter(u8::is_ascii).map(char::from);
}
