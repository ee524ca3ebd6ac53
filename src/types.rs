/// Core domain types: decoded call nodes, page references, diagnostics.
use std::ops::Range;
use std::path::PathBuf;

/// Identity of a syntax node inside one source file.
/// Opaque to the rule; the host uses it to report a source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Byte offset range of the node in the source file.
    pub byte_range: Range<usize>,
    /// Zero-based column of the node start.
    pub column: usize,
    /// Zero-based row of the node start.
    pub row: usize,
}

impl NodeId {
    /// Node identity with no meaningful location, for hosts that build
    /// call nodes by hand.
    pub const fn detached() -> Self {
        return Self {
            byte_range: 0..0,
            column: 0,
            row: 0,
        };
    }
}

/// One call argument, reduced to what the matcher needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// `name: value` argument. Never counts as positional.
    Named {
        /// Parameter name before the colon.
        name: String,
    },
    /// Any expression that is not a plain string literal.
    Other,
    /// `...$args` unpacking.
    Spread,
    /// A string literal with no interpolation, already unescaped.
    StringLiteral(String),
}

impl Argument {
    /// The literal value, if this argument is a plain positional string.
    pub fn as_literal(&self) -> Option<&str> {
        return match self {
            Argument::StringLiteral(value) => Some(value.as_str()),
            Argument::Named { .. } | Argument::Other | Argument::Spread => None,
        };
    }
}

/// The closed set of call shapes the matcher cares about.
/// Every other syntax node is "not a candidate".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallNode {
    /// `helper(...)`
    FunctionCall {
        /// Arguments in source order.
        args: Vec<Argument>,
        /// Callee name as written, possibly namespace-qualified.
        name: String,
        /// The call expression node.
        node: NodeId,
    },
    /// `$object->method(...)` or `$object?->method(...)`
    MethodCall {
        /// Arguments in source order.
        args: Vec<Argument>,
        /// Method identifier.
        method: String,
        /// The call expression node.
        node: NodeId,
    },
    /// `Class::method(...)`
    StaticCall {
        /// Arguments in source order.
        args: Vec<Argument>,
        /// Class name as written, possibly namespace-qualified.
        class: String,
        /// Method identifier.
        method: String,
        /// The call expression node.
        node: NodeId,
    },
}

impl CallNode {
    /// Arguments of the call regardless of shape.
    pub fn args(&self) -> &[Argument] {
        return match self {
            CallNode::FunctionCall { args, .. }
            | CallNode::MethodCall { args, .. }
            | CallNode::StaticCall { args, .. } => args,
        };
    }

    /// Identity of the call expression node.
    pub fn node(&self) -> &NodeId {
        return match self {
            CallNode::FunctionCall { node, .. }
            | CallNode::MethodCall { node, .. }
            | CallNode::StaticCall { node, .. } => node,
        };
    }
}

/// A literal page name found at a recognised call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReference {
    /// Zero-based argument index the name was read from.
    pub arg_position: usize,
    /// The call expression that referenced the page.
    pub node: NodeId,
    /// Page name exactly as written, dot or slash delimited.
    pub raw_name: String,
}

/// Output of the rule: one per unresolved page reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable message naming the missing page.
    pub message: String,
    /// The call expression that referenced the missing page.
    pub node: NodeId,
}

impl Diagnostic {
    /// Diagnostic for a page that resolved to no file.
    pub fn missing_page(reference: &PageReference) -> Self {
        return Self {
            message: format!("Page \"{}\" does not exist on disk.", reference.raw_name),
            node: reference.node.clone(),
        };
    }
}

/// A diagnostic placed in a source file by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Finding {
    /// One-based column of the call expression.
    pub column: usize,
    /// PHP file containing the call, relative to the project root.
    pub file: PathBuf,
    /// One-based line of the call expression.
    pub line: usize,
    /// Diagnostic message.
    pub message: String,
}

impl Ord for Finding {
    /// Compare findings by (file, line, column, message) for stable reports.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        return (&self.file, self.line, self.column, &self.message).cmp(&(
            &other.file,
            other.line,
            other.column,
            &other.message,
        ));
    }
}

impl PartialOrd for Finding {
    /// Delegate to `Ord` implementation.
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        return Some(self.cmp(other));
    }
}
