/// A documentation comment waiting for its declaration.
///
/// One line renders as `/** text */`; more render as a block with a
/// leading ` * ` on each line. Embedded newlines split lines, and `*/`
/// is escaped so it cannot terminate the comment early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Javadoc {
    lines: Vec<String>,
}

impl Javadoc {
    pub fn new<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let lines = lines
            .into_iter()
            .flat_map(|line| {
                let line: String = line.into();
                line.split('\n')
                    .map(|l| l.trim_end().replace("*/", "*&#47;"))
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the comment as source lines, without indentation.
    pub fn render(&self) -> Vec<String> {
        match self.lines.as_slice() {
            [] => Vec::new(),
            [single] => vec![format!("/** {single} */")],
            lines => {
                let mut out = Vec::with_capacity(lines.len() + 2);
                out.push("/**".to_string());
                for line in lines {
                    if line.is_empty() {
                        out.push(" *".to_string());
                    } else {
                        out.push(format!(" * {line}"));
                    }
                }
                out.push(" */".to_string());
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let doc = Javadoc::new(["JavaWriterTest is a test class"]);
        assert_eq!(doc.render(), vec!["/** JavaWriterTest is a test class */"]);
    }

    #[test]
    fn test_multi_line_block() {
        let doc = Javadoc::new(["Summary.", "", "@author scribe"]);
        assert_eq!(
            doc.render(),
            vec!["/**", " * Summary.", " *", " * @author scribe", " */"]
        );
    }

    #[test]
    fn test_embedded_newlines_split() {
        let doc = Javadoc::new(["first\nsecond"]);
        assert_eq!(doc.render(), vec!["/**", " * first", " * second", " */"]);
    }

    #[test]
    fn test_comment_terminator_is_escaped() {
        let doc = Javadoc::new(["ends */ early"]);
        assert_eq!(doc.render(), vec!["/** ends *&#47; early */"]);
    }

    #[test]
    fn test_empty() {
        let doc = Javadoc::new(Vec::<String>::new());
        assert!(doc.is_empty());
        assert!(doc.render().is_empty());
    }
}
