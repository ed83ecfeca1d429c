//! Canonical re-indentation of permissive JSON.
//!
//! The writer walks the [`SyntaxTree`](super::syntax::SyntaxTree) and copies
//! every token verbatim; only whitespace is regenerated. Members go on their
//! own line, empty collections stay inline and a line comment forces whatever
//! follows it onto a new line. Recursion follows the tree, whose nesting the
//! parser bounds at [`MAX_DEPTH`](super::syntax::MAX_DEPTH).

use std::str::FromStr;

use super::JsonError;
use super::syntax::{NodeKind, SyntaxNode, SyntaxTree};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indentation {
    #[default]
    TwoSpaces,
    FourSpaces,
    Tabs,
}

impl Indentation {
    pub fn unit(self) -> &'static str {
        match self {
            Indentation::TwoSpaces => "  ",
            Indentation::FourSpaces => "    ",
            Indentation::Tabs => "\t",
        }
    }
}

impl FromStr for Indentation {
    type Err = JsonError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "2" => Ok(Indentation::TwoSpaces),
            "4" => Ok(Indentation::FourSpaces),
            "tab" | "tabs" => Ok(Indentation::Tabs),
            other => Err(JsonError::Indentation(other.to_string())),
        }
    }
}

/// Reformat options.
#[derive(Debug, Clone, Default)]
pub struct ReformatConfig {
    /// Indent unit per nesting level (default: two spaces)
    pub indentation: Indentation,
}

/// Re-indents permissive JSON with two spaces per level.
///
/// # Example
/// ```
/// use devtools_core::json::reformat::reformat;
/// assert_eq!(reformat("{a: [], 'b': ObjectId(\"x\"),}"), "{\n  a: [],\n  'b': ObjectId(\"x\"),\n}");
/// ```
pub fn reformat(text: &str) -> String {
    reformat_with(text, &ReformatConfig::default())
}

pub fn reformat_with(text: &str, config: &ReformatConfig) -> String {
    let tree = SyntaxTree::parse(text);
    let mut writer = Writer {
        tree: &tree,
        out: String::with_capacity(text.len()),
        depth: 0,
        unit: config.indentation.unit(),
        line_comment: false,
    };
    writer.node(tree.root());
    writer.out
}

struct Writer<'a> {
    tree: &'a SyntaxTree,
    out: String,
    depth: usize,
    unit: &'static str,
    /// Set while the current line ends in a `//` comment.
    line_comment: bool,
}

impl Writer<'_> {
    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.depth {
            self.out.push_str(self.unit);
        }
        self.line_comment = false;
    }

    fn token(&mut self, text: &str) {
        if self.line_comment {
            self.newline();
        }
        self.out.push_str(text);
    }

    /// Token that must not fuse with the previous one.
    fn separate_token(&mut self, text: &str) {
        if !self.line_comment && !self.at_line_start() {
            self.out.push(' ');
        }
        self.token(text);
    }

    fn comment(&mut self, text: &str) {
        if !self.at_line_start() {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.line_comment = true;
    }

    fn at_line_start(&self) -> bool {
        self.out.chars().last().is_none_or(char::is_whitespace)
    }

    fn node(&mut self, node: &SyntaxNode) {
        let tree = self.tree;
        let text = tree.text(node);
        match node.kind() {
            NodeKind::Document => self.document(node),
            NodeKind::Object => self.collection(node, "{", "}"),
            NodeKind::Array => self.collection(node, "[", "]"),
            NodeKind::ObjectValue
            | NodeKind::LastObjectValue
            | NodeKind::ArrayValue
            | NodeKind::LastArrayValue => self.member(node),
            NodeKind::ObjectKey => {
                self.token(text);
                self.out.push_str(": ");
            }
            NodeKind::LineComment => self.comment(text),
            NodeKind::Error => self.separate_token(text),
            _ => self.token(text),
        }
    }

    /// Top-level comments keep their line: one written after the previous
    /// token on the same source line trails it, any other starts a new line.
    fn document(&mut self, node: &SyntaxNode) {
        let tree = self.tree;
        let source = tree.source();
        let mut previous_end = None;
        for child in node.children() {
            if child.kind() == NodeKind::LineComment && !self.out.is_empty() {
                let same_line = previous_end.is_some_and(|end| {
                    !source[end..child.span().from].contains(['\n', '\r'])
                });
                if !same_line {
                    self.newline();
                }
            }
            self.node(child);
            previous_end = Some(child.span().to);
        }
    }

    fn collection(&mut self, node: &SyntaxNode, open: &str, close: &str) {
        self.token(open);
        if node.children().is_empty() {
            self.out.push_str(close);
            return;
        }
        self.depth += 1;
        for child in node.children() {
            self.newline();
            self.node(child);
        }
        self.depth -= 1;
        self.newline();
        self.out.push_str(close);
    }

    fn member(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            self.node(child);
        }
    }
}
