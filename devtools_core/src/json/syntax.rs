//! Syntax tree for the permissive JSON grammar.
//!
//! The parser is a recursive descent over the token stream that never gives
//! up: unexpected tokens turn into `Error` nodes, unclosed collections are
//! closed at the end of input and missing separators are recorded as
//! zero-width error spans. Nothing is interpreted; every node only points
//! back into the source text.
//!
//! Collections nest at most [`MAX_DEPTH`] levels. A deeper collection is
//! consumed up to its balancing bracket as a single `Error` node, so the
//! parser, the writer and the tree's own drop stay within a bounded stack.

use serde::Serialize;

use super::lexer::{Token, TokenKind, tokenize};

/// Deepest collection nesting kept as structure; same limit as serde_json.
pub const MAX_DEPTH: usize = 128;

/// Byte range into the parsed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    fn at(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Document,
    Object,
    Array,
    /// Object member followed by a comma.
    ObjectValue,
    /// Object member without a trailing comma.
    LastObjectValue,
    ArrayValue,
    LastArrayValue,
    ObjectKey,
    String,
    Number,
    Boolean,
    Null,
    Identifier,
    /// `Name(...)`, kept as one opaque literal.
    FunctionCall,
    /// `new Name(...)`, kept as one opaque literal.
    Instantiation,
    Comma,
    LineComment,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    kind: NodeKind,
    span: Span,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    fn leaf(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    fn branch(kind: NodeKind, children: Vec<SyntaxNode>, fallback: Span) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => Span::new(first.span.from, last.span.to),
            _ => fallback,
        };
        Self {
            kind,
            span,
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }
}

/// Parsed source plus its tree and any recovery points.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    root: SyntaxNode,
    errors: Vec<Span>,
}

impl SyntaxTree {
    /// Parses permissive JSON text. Never fails; see [`SyntaxTree::errors`].
    ///
    /// # Example
    /// ```
    /// use devtools_core::json::syntax::{NodeKind, SyntaxTree};
    /// let tree = SyntaxTree::parse("{a: ObjectId('x'),}");
    /// let object = &tree.root().children()[0];
    /// assert_eq!(object.kind(), NodeKind::Object);
    /// let member = &object.children()[0];
    /// assert_eq!(member.kind(), NodeKind::ObjectValue);
    /// assert_eq!(tree.text(&member.children()[1]), "ObjectId('x')");
    /// assert!(tree.errors().is_empty());
    /// ```
    pub fn parse(source: &str) -> Self {
        let mut parser = Parser {
            source,
            tokens: tokenize(source),
            pos: 0,
            depth: 0,
            errors: Vec::new(),
        };
        let root = parser.document();
        if !parser.errors.is_empty() {
            tracing::debug!(errors = parser.errors.len(), "recovered from malformed JSON");
        }
        Self {
            source: source.to_string(),
            root,
            errors: parser.errors,
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: &SyntaxNode) -> &str {
        &self.source[node.span.from..node.span.to]
    }

    /// Places where the parser had to recover, in source order.
    pub fn errors(&self) -> &[Span] {
        &self.errors
    }
}

/// Shorthand for [`SyntaxTree::parse`].
pub fn parse(source: &str) -> SyntaxTree {
    SyntaxTree::parse(source)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    /// Collections currently open.
    depth: usize,
    errors: Vec<Span>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|token| token.kind)
    }

    fn peek_nth(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|token| token.kind)
    }

    /// First token kind after any comments.
    fn peek_significant(&self) -> Option<TokenKind> {
        self.tokens[self.pos..]
            .iter()
            .map(|token| token.kind)
            .find(|kind| *kind != TokenKind::LineComment)
    }

    fn bump(&mut self) -> Span {
        let span = self.tokens[self.pos].span;
        self.pos += 1;
        span
    }

    fn previous_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .map(|idx| self.tokens[idx].span.to)
            .unwrap_or(0)
    }

    fn current_start(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|token| token.span.from)
            .unwrap_or(self.source.len())
    }

    fn error_token(&mut self) -> SyntaxNode {
        let span = self.bump();
        self.errors.push(span);
        SyntaxNode::leaf(NodeKind::Error, span)
    }

    fn comments(&mut self, into: &mut Vec<SyntaxNode>) {
        while self.peek() == Some(TokenKind::LineComment) {
            let span = self.bump();
            into.push(SyntaxNode::leaf(NodeKind::LineComment, span));
        }
    }

    /// Comments that start on the line of the previous token.
    fn trailing_comments(&mut self, into: &mut Vec<SyntaxNode>) {
        while self.peek() == Some(TokenKind::LineComment) {
            let gap = &self.source[self.previous_end()..self.current_start()];
            if gap.contains('\n') || gap.contains('\r') {
                break;
            }
            let span = self.bump();
            into.push(SyntaxNode::leaf(NodeKind::LineComment, span));
        }
    }

    fn document(&mut self) -> SyntaxNode {
        let mut children = Vec::new();
        self.comments(&mut children);
        if self.peek().is_some() {
            children.push(self.value());
        }
        loop {
            self.comments(&mut children);
            if self.peek().is_none() {
                break;
            }
            children.push(self.error_token());
        }
        SyntaxNode {
            kind: NodeKind::Document,
            span: Span::new(0, self.source.len()),
            children,
        }
    }

    fn value(&mut self) -> SyntaxNode {
        let Some(kind) = self.peek() else {
            let span = Span::at(self.source.len());
            self.errors.push(span);
            return SyntaxNode::leaf(NodeKind::Error, span);
        };
        match kind {
            TokenKind::LeftBrace | TokenKind::LeftBracket if self.depth >= MAX_DEPTH => self.too_deep(),
            TokenKind::LeftBrace => self.collection(NodeKind::Object),
            TokenKind::LeftBracket => self.collection(NodeKind::Array),
            TokenKind::String => SyntaxNode::leaf(NodeKind::String, self.bump()),
            TokenKind::Number => SyntaxNode::leaf(NodeKind::Number, self.bump()),
            TokenKind::True | TokenKind::False => SyntaxNode::leaf(NodeKind::Boolean, self.bump()),
            TokenKind::Null => SyntaxNode::leaf(NodeKind::Null, self.bump()),
            TokenKind::Identifier if self.peek_nth(1) == Some(TokenKind::LeftParen) => {
                self.call(NodeKind::FunctionCall)
            }
            TokenKind::New
                if self.peek_nth(1) == Some(TokenKind::Identifier)
                    && self.peek_nth(2) == Some(TokenKind::LeftParen) =>
            {
                self.call(NodeKind::Instantiation)
            }
            TokenKind::Identifier | TokenKind::New => {
                SyntaxNode::leaf(NodeKind::Identifier, self.bump())
            }
            _ => self.error_token(),
        }
    }

    /// Consumes a call up to its balancing parenthesis as one opaque span.
    fn call(&mut self, kind: NodeKind) -> SyntaxNode {
        let start = self.bump().from;
        while self.peek() != Some(TokenKind::LeftParen) {
            self.bump();
        }
        let mut depth = 0usize;
        let mut end = start;
        while let Some(token) = self.peek() {
            end = self.bump().to;
            match token {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        return SyntaxNode::leaf(kind, Span::new(start, end));
                    }
                }
                _ => {}
            }
        }
        self.errors.push(Span::at(end));
        SyntaxNode::leaf(kind, Span::new(start, end))
    }

    /// Consumes an over-deep collection up to its balancing bracket.
    fn too_deep(&mut self) -> SyntaxNode {
        let start = self.current_start();
        let mut depth = 0usize;
        let mut end = start;
        while let Some(token) = self.peek() {
            end = self.bump().to;
            match token {
                TokenKind::LeftBrace | TokenKind::LeftBracket => depth += 1,
                TokenKind::RightBrace | TokenKind::RightBracket => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        let span = Span::new(start, end);
        tracing::debug!(from = start, to = end, "collection nested too deep");
        self.errors.push(span);
        SyntaxNode::leaf(NodeKind::Error, span)
    }

    fn collection(&mut self, kind: NodeKind) -> SyntaxNode {
        self.depth += 1;
        let node = self.collection_body(kind);
        self.depth -= 1;
        node
    }

    fn collection_body(&mut self, kind: NodeKind) -> SyntaxNode {
        let close = if kind == NodeKind::Object {
            TokenKind::RightBrace
        } else {
            TokenKind::RightBracket
        };
        let start = self.bump().from;
        let mut children = Vec::new();
        let mut needs_separator = false;
        let end = loop {
            self.comments(&mut children);
            match self.peek() {
                None => {
                    let end = self.previous_end();
                    self.errors.push(Span::at(end));
                    break end;
                }
                Some(token) if token == close => break self.bump().to,
                Some(
                    TokenKind::Comma
                    | TokenKind::RightBrace
                    | TokenKind::RightBracket
                    | TokenKind::RightParen
                    | TokenKind::Colon,
                ) => children.push(self.error_token()),
                Some(_) if kind == NodeKind::Object && !self.at_key() => {
                    children.push(self.error_token())
                }
                Some(_) => {
                    if needs_separator {
                        self.errors.push(Span::at(self.current_start()));
                    }
                    let member = self.member(kind == NodeKind::Object);
                    needs_separator = matches!(
                        member.kind,
                        NodeKind::LastObjectValue | NodeKind::LastArrayValue
                    );
                    children.push(member);
                }
            }
        };
        SyntaxNode {
            kind,
            span: Span::new(start, end),
            children,
        }
    }

    fn at_key(&self) -> bool {
        matches!(
            self.peek(),
            Some(
                TokenKind::String
                    | TokenKind::Identifier
                    | TokenKind::Number
                    | TokenKind::True
                    | TokenKind::False
                    | TokenKind::Null
                    | TokenKind::New
            )
        )
    }

    fn member(&mut self, in_object: bool) -> SyntaxNode {
        let mut children = Vec::new();
        if in_object {
            let key = self.bump();
            children.push(SyntaxNode::leaf(NodeKind::ObjectKey, key));
            self.comments(&mut children);
            if self.peek() == Some(TokenKind::Colon) {
                self.bump();
            } else {
                self.errors.push(Span::at(self.previous_end()));
            }
            self.comments(&mut children);
            match self.peek() {
                None | Some(TokenKind::Comma | TokenKind::RightBrace) => {
                    self.errors.push(Span::at(self.previous_end()));
                }
                Some(_) => children.push(self.value()),
            }
        } else {
            children.push(self.value());
        }

        let separated = self.peek_significant() == Some(TokenKind::Comma);
        if separated {
            self.comments(&mut children);
            let comma = self.bump();
            children.push(SyntaxNode::leaf(NodeKind::Comma, comma));
        }
        self.trailing_comments(&mut children);

        let kind = match (in_object, separated) {
            (true, true) => NodeKind::ObjectValue,
            (true, false) => NodeKind::LastObjectValue,
            (false, true) => NodeKind::ArrayValue,
            (false, false) => NodeKind::LastArrayValue,
        };
        let fallback = Span::at(self.previous_end());
        SyntaxNode::branch(kind, children, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(nodes: &[SyntaxNode]) -> Vec<NodeKind> {
        nodes.iter().map(SyntaxNode::kind).collect()
    }

    #[test]
    fn members_carry_their_separator() {
        let tree = parse("[1, 2, 3,]");
        let array = &tree.root().children()[0];
        assert_eq!(
            kinds(array.children()),
            [NodeKind::ArrayValue, NodeKind::ArrayValue, NodeKind::ArrayValue]
        );
        assert_eq!(
            kinds(array.children()[2].children()),
            [NodeKind::Number, NodeKind::Comma]
        );

        let tree = parse("[1, 2]");
        let array = &tree.root().children()[0];
        assert_eq!(array.children()[1].kind(), NodeKind::LastArrayValue);
    }

    #[test]
    fn object_members_keep_key_text() {
        let tree = parse(r#"{'a': 1, $set: {b: true}, "c": null}"#);
        let object = &tree.root().children()[0];
        let keys: Vec<&str> = object
            .children()
            .iter()
            .map(|member| tree.text(&member.children()[0]))
            .collect();
        assert_eq!(keys, ["'a'", "$set", r#""c""#]);
        assert_eq!(object.children()[2].kind(), NodeKind::LastObjectValue);
        assert!(tree.errors().is_empty());
    }

    #[test]
    fn constructor_calls_are_opaque() {
        let tree = parse(r#"[ISODate("2022-08-18T03:55:31Z"), new Date("x(y)"), NumberLong(1)]"#);
        let array = &tree.root().children()[0];
        let values: Vec<(NodeKind, &str)> = array
            .children()
            .iter()
            .map(|member| {
                let value = &member.children()[0];
                (value.kind(), tree.text(value))
            })
            .collect();
        assert_eq!(
            values,
            [
                (NodeKind::FunctionCall, r#"ISODate("2022-08-18T03:55:31Z")"#),
                (NodeKind::Instantiation, r#"new Date("x(y)")"#),
                (NodeKind::FunctionCall, "NumberLong(1)"),
            ]
        );
    }

    #[test]
    fn same_line_comments_trail_the_member() {
        let tree = parse("[1, // one\n// two\n2]");
        let array = &tree.root().children()[0];
        assert_eq!(
            kinds(array.children()),
            [NodeKind::ArrayValue, NodeKind::LineComment, NodeKind::LastArrayValue]
        );
        assert_eq!(
            kinds(array.children()[0].children()),
            [NodeKind::Number, NodeKind::Comma, NodeKind::LineComment]
        );
    }

    #[test]
    fn spans_point_into_source() {
        let source = "  {\"a\": [1]}  ";
        let tree = parse(source);
        let object = &tree.root().children()[0];
        assert_eq!(object.span(), Span::new(2, 12));
        assert_eq!(tree.text(object), "{\"a\": [1]}");
        assert_eq!(tree.root().span(), Span::new(0, source.len()));
    }

    #[test]
    fn recovers_from_partial_input() {
        for source in ["", "{", "[1, 2", "{a:", "{a 1}", "[1 2]", "}", "{,}", "[ObjectId(\"x\"", "'open", "{[1]}"] {
            let tree = parse(source);
            assert_eq!(tree.root().kind(), NodeKind::Document, "for {source:?}");
            if !source.is_empty() {
                assert!(!tree.errors().is_empty(), "expected recovery for {source:?}");
            }
        }
    }

    fn nesting(tree: &SyntaxTree) -> (usize, &SyntaxNode) {
        let mut depth = 0;
        let mut node = &tree.root().children()[0];
        loop {
            match node.kind() {
                NodeKind::Object | NodeKind::Array => depth += 1,
                _ => return (depth, node),
            }
            let member = &node.children()[0];
            node = member.children().last().unwrap();
        }
    }

    #[test]
    fn deep_nesting_is_cut_off_as_one_error() {
        let source = "[".repeat(100_000);
        let tree = parse(&source);
        let (depth, innermost) = nesting(&tree);
        assert_eq!(depth, MAX_DEPTH);
        assert_eq!(innermost.kind(), NodeKind::Error);
        assert_eq!(innermost.span(), Span::new(MAX_DEPTH, source.len()));
        assert!(tree.errors().contains(&innermost.span()));
    }

    #[test]
    fn balanced_deep_nesting_resumes_after_the_cut() {
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 2), "]".repeat(MAX_DEPTH + 2));
        let tree = parse(&format!("{{a: {deep}, b: 1}}"));
        let object = &tree.root().children()[0];
        assert_eq!(object.children().len(), 2);
        assert_eq!(tree.text(&object.children()[1].children()[0]), "b");
        assert_eq!(tree.errors().len(), 1);
    }
}
