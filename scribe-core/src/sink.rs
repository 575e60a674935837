//! Append-only text destinations.

use std::io;

/// Something text can be appended to.
///
/// Writers never read back or rewind what they emitted, so appending is
/// the only capability required.
pub trait Sink {
    /// Append `text` to the destination.
    fn append(&mut self, text: &str) -> io::Result<()>;
}

impl Sink for String {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn append(&mut self, text: &str) -> io::Result<()> {
        (**self).append(text)
    }
}

/// Adapts any [`io::Write`] (files, stdout, sockets) into a [`Sink`].
///
/// # Example
///
/// ```
/// use scribe_core::{IoSink, Sink};
///
/// let mut sink = IoSink::new(Vec::new());
/// sink.append("package a;\n").unwrap();
/// assert_eq!(sink.into_inner(), b"package a;\n");
/// ```
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

impl<W: io::Write> IoSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Get a reference to the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())
    }
}
