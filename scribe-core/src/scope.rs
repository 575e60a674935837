//! Lexical scope tracking.

use std::fmt;

/// The kind of an open scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Class,
    Interface,
    Method,
    Constructor,
    /// A statement block (`if`, `for`, `try`, initializers).
    Block,
}

impl ScopeKind {
    /// Whether this scope declares a type.
    pub fn is_type(&self) -> bool {
        matches!(self, Self::Class | Self::Interface)
    }

    /// Whether closing this scope ends a declaration unit.
    ///
    /// Blocks are statements, so their closing brace is not followed by a
    /// separator line.
    pub fn is_declaration(&self) -> bool {
        !matches!(self, Self::Block)
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Block => "block",
        };
        f.write_str(name)
    }
}

/// One open lexical scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    kind: ScopeKind,
    owner: Option<String>,
    is_empty: bool,
}

impl ScopeFrame {
    /// Create a frame with no owning type name.
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            owner: None,
            is_empty: true,
        }
    }

    /// Create a type frame owned by the given simple type name.
    pub fn owned(kind: ScopeKind, owner: impl Into<String>) -> Self {
        Self {
            kind,
            owner: Some(owner.into()),
            is_empty: true,
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// The simple name of the type this frame declares, if any.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Whether nothing has been emitted inside this scope yet.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }
}

/// Stack of open scopes; its depth is the indentation depth.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ScopeFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<ScopeFrame> {
        self.frames.pop()
    }

    /// The innermost open scope.
    pub fn top(&self) -> Option<&ScopeFrame> {
        self.frames.last()
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The innermost enclosing type declaration, if any.
    pub fn enclosing_type(&self) -> Option<&ScopeFrame> {
        self.frames.iter().rev().find(|f| f.kind.is_type())
    }

    /// Record that a line was emitted inside the innermost scope.
    pub fn mark_used(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.is_empty = false;
        }
    }

    /// Iterate from the outermost to the innermost scope.
    pub fn iter(&self) -> impl Iterator<Item = &ScopeFrame> {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_tracks_depth() {
        let mut stack = ScopeStack::new();
        assert!(stack.is_empty());

        stack.push(ScopeFrame::owned(ScopeKind::Class, "Foo"));
        stack.push(ScopeFrame::new(ScopeKind::Method));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top().map(ScopeFrame::kind), Some(ScopeKind::Method));

        let popped = stack.pop().unwrap();
        assert_eq!(popped.kind(), ScopeKind::Method);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_enclosing_type_skips_inner_scopes() {
        let mut stack = ScopeStack::new();
        stack.push(ScopeFrame::owned(ScopeKind::Class, "Outer"));
        stack.push(ScopeFrame::new(ScopeKind::Method));
        stack.push(ScopeFrame::new(ScopeKind::Block));

        let owner = stack.enclosing_type().and_then(ScopeFrame::owner);
        assert_eq!(owner, Some("Outer"));
    }

    #[test]
    fn test_mark_used_only_touches_top() {
        let mut stack = ScopeStack::new();
        stack.push(ScopeFrame::owned(ScopeKind::Class, "Foo"));
        stack.push(ScopeFrame::new(ScopeKind::Method));
        stack.mark_used();

        let frames: Vec<_> = stack.iter().map(ScopeFrame::is_empty).collect();
        assert_eq!(frames, vec![true, false]);
    }

    #[test]
    fn test_kind_classification() {
        assert!(ScopeKind::Class.is_type());
        assert!(ScopeKind::Interface.is_type());
        assert!(!ScopeKind::Constructor.is_type());
        assert!(ScopeKind::Method.is_declaration());
        assert!(!ScopeKind::Block.is_declaration());
        assert_eq!(ScopeKind::Constructor.to_string(), "constructor");
    }
}
