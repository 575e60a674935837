//! Line-oriented writer that keeps indentation in step with open scopes.

use tracing::trace;

use crate::{Error, Indent, Result, ScopeFrame, ScopeStack, Sink};

/// Streams indented lines into a [`Sink`] while tracking open scopes.
///
/// Indentation is never set directly: it is always the depth of the
/// scope stack, so opening and closing scopes are the only way to change
/// it. Nothing is buffered; each call writes its lines immediately.
///
/// Closing a declaration scope schedules a separator blank line. It is
/// written only if more content follows inside the enclosing scope, so
/// consecutive closing braces never get blank lines between them. When
/// the outermost scope closes the blank line is written straight away.
///
/// # Example
///
/// ```
/// use scribe_core::{CodeWriter, ScopeFrame, ScopeKind};
///
/// let mut writer = CodeWriter::new(String::new());
/// writer.open("class Foo {", ScopeFrame::owned(ScopeKind::Class, "Foo")).unwrap();
/// writer.open("void run() {", ScopeFrame::new(ScopeKind::Method)).unwrap();
/// writer.push_line("go();").unwrap();
/// writer.close().unwrap();
/// writer.close().unwrap();
///
/// assert_eq!(
///     writer.into_inner(),
///     "class Foo {\n    void run() {\n        go();\n    }\n}\n\n"
/// );
/// ```
#[derive(Debug)]
pub struct CodeWriter<S> {
    sink: S,
    indent: Indent,
    unit: String,
    scopes: ScopeStack,
    separator_pending: bool,
    started: bool,
}

impl<S: Sink> CodeWriter<S> {
    /// Create a writer with the default indentation.
    pub fn new(sink: S) -> Self {
        Self::with_indent(sink, Indent::default())
    }

    /// Create a writer with the specified indentation.
    pub fn with_indent(sink: S, indent: Indent) -> Self {
        Self {
            sink,
            indent,
            unit: indent.unit(),
            scopes: ScopeStack::new(),
            separator_pending: false,
            started: false,
        }
    }

    /// Write a line at the current indentation.
    pub fn push_line(&mut self, s: &str) -> Result<&mut Self> {
        self.flush_separator()?;
        self.write_indent()?;
        self.sink.append(s)?;
        self.sink.append("\n")?;
        self.scopes.mark_used();
        self.started = true;
        Ok(self)
    }

    /// Write a blank line (no indentation).
    ///
    /// A pending separator is absorbed rather than doubled.
    pub fn push_blank(&mut self) -> Result<&mut Self> {
        self.separator_pending = false;
        self.sink.append("\n")?;
        self.started = true;
        Ok(self)
    }

    /// Write `header` and open a scope one level deeper.
    pub fn open(&mut self, header: &str, frame: ScopeFrame) -> Result<&mut Self> {
        self.push_line(header)?;
        trace!(kind = %frame.kind(), depth = self.scopes.depth() + 1, "scope opened");
        self.scopes.push(frame);
        Ok(self)
    }

    /// Close the innermost scope, writing its closing brace.
    ///
    /// Returns the frame that was closed.
    pub fn close(&mut self) -> Result<ScopeFrame> {
        let frame = self
            .scopes
            .pop()
            .ok_or_else(|| Error::scope_mismatch("end", "there is no open scope to close"))?;

        self.separator_pending = false;
        self.push_line("}")?;
        trace!(kind = %frame.kind(), depth = self.scopes.depth(), empty = frame.is_empty(), "scope closed");

        if frame.kind().is_declaration() {
            if self.scopes.is_empty() {
                self.sink.append("\n")?;
            } else {
                self.separator_pending = true;
            }
        }
        Ok(frame)
    }

    /// Current indentation depth (number of open scopes).
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    /// The open scopes, outermost first.
    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    /// Whether anything has been written yet.
    pub fn has_output(&self) -> bool {
        self.started
    }

    /// The indentation in use.
    pub fn indent(&self) -> Indent {
        self.indent
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn flush_separator(&mut self) -> Result<()> {
        if self.separator_pending {
            self.separator_pending = false;
            self.sink.append("\n")?;
        }
        Ok(())
    }

    fn write_indent(&mut self) -> Result<()> {
        for _ in 0..self.scopes.depth() {
            self.sink.append(&self.unit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IoSink, ScopeKind};

    fn class(name: &str) -> ScopeFrame {
        ScopeFrame::owned(ScopeKind::Class, name)
    }

    fn method() -> ScopeFrame {
        ScopeFrame::new(ScopeKind::Method)
    }

    #[test]
    fn test_basic_line() {
        let mut writer = CodeWriter::new(String::new());
        writer.push_line("int x = 1;").unwrap();
        assert_eq!(writer.into_inner(), "int x = 1;\n");
    }

    #[test]
    fn test_indentation_follows_scopes() {
        let mut writer = CodeWriter::new(String::new());
        writer.open("class A {", class("A")).unwrap();
        writer.push_line("int x;").unwrap();
        writer.close().unwrap();

        assert_eq!(writer.into_inner(), "class A {\n    int x;\n}\n\n");
    }

    #[test]
    fn test_custom_indent() {
        let mut writer = CodeWriter::with_indent(String::new(), Indent::Tab);
        writer.open("class A {", class("A")).unwrap();
        writer.push_line("int x;").unwrap();
        writer.close().unwrap();

        assert_eq!(writer.into_inner(), "class A {\n\tint x;\n}\n\n");
    }

    #[test]
    fn test_empty_scope_has_no_inner_blank() {
        let mut writer = CodeWriter::new(String::new());
        writer.open("class A {", class("A")).unwrap();
        let frame = writer.close().unwrap();

        assert!(frame.is_empty());
        assert_eq!(writer.into_inner(), "class A {\n}\n\n");
    }

    #[test]
    fn test_nested_closes_are_not_double_blanked() {
        let mut writer = CodeWriter::new(String::new());
        writer.open("class A {", class("A")).unwrap();
        writer.open("void a() {", method()).unwrap();
        writer.close().unwrap();
        writer.close().unwrap();

        assert_eq!(
            writer.into_inner(),
            "class A {\n    void a() {\n    }\n}\n\n"
        );
    }

    #[test]
    fn test_separator_between_siblings() {
        let mut writer = CodeWriter::new(String::new());
        writer.open("class A {", class("A")).unwrap();
        writer.open("void a() {", method()).unwrap();
        writer.close().unwrap();
        writer.open("void b() {", method()).unwrap();
        writer.close().unwrap();
        writer.close().unwrap();

        assert_eq!(
            writer.into_inner(),
            "class A {\n    void a() {\n    }\n\n    void b() {\n    }\n}\n\n"
        );
    }

    #[test]
    fn test_block_close_has_no_separator() {
        let mut writer = CodeWriter::new(String::new());
        writer.open("void a() {", method()).unwrap();
        writer
            .open("if (x) {", ScopeFrame::new(ScopeKind::Block))
            .unwrap();
        writer.push_line("y();").unwrap();
        writer.close().unwrap();
        writer.push_line("z();").unwrap();
        writer.close().unwrap();

        assert_eq!(
            writer.into_inner(),
            "void a() {\n    if (x) {\n        y();\n    }\n    z();\n}\n\n"
        );
    }

    #[test]
    fn test_close_without_scope_is_mismatch() {
        let mut writer = CodeWriter::new(String::new());
        let err = writer.close().unwrap_err();
        assert!(matches!(err, Error::ScopeMismatch { .. }));
        assert_eq!(writer.into_inner(), "");
    }

    #[test]
    fn test_depth_is_neutral_across_pairs() {
        let mut writer = CodeWriter::new(String::new());
        writer.open("class A {", class("A")).unwrap();
        let before = writer.depth();
        writer.open("void a() {", method()).unwrap();
        assert_eq!(writer.depth(), before + 1);
        writer.close().unwrap();
        assert_eq!(writer.depth(), before);
    }

    #[test]
    fn test_blank_absorbs_pending_separator() {
        let mut writer = CodeWriter::new(String::new());
        writer.open("class A {", class("A")).unwrap();
        writer.open("void a() {", method()).unwrap();
        writer.close().unwrap();
        writer.push_blank().unwrap();
        writer.push_line("int x;").unwrap();
        writer.close().unwrap();

        assert_eq!(
            writer.into_inner(),
            "class A {\n    void a() {\n    }\n\n    int x;\n}\n\n"
        );
    }

    #[test]
    fn test_has_output() {
        let mut writer = CodeWriter::new(String::new());
        assert!(!writer.has_output());
        writer.push_blank().unwrap();
        assert!(writer.has_output());
    }

    #[test]
    fn test_writes_through_io_sink() {
        let mut writer = CodeWriter::new(IoSink::new(Vec::new()));
        writer.push_line("x();").unwrap();
        assert_eq!(writer.into_inner().into_inner(), b"x();\n");
    }
}
