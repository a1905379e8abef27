/// A line that ends the header on its own, whatever follows.
const HEADER_BREAK: &str = "///";

/// Cursor over the lines of a document header.
///
/// Lines are seen with trailing whitespace removed. The reader never looks past a
/// [`HEADER_BREAK`] line: from there on it behaves as if the input ended.
#[derive(Debug)]
pub(crate) struct LineReader<'a, L> {
    lines: &'a [L],
    position: usize,
}

impl<'a, L: AsRef<str>> LineReader<'a, L> {
    pub(crate) fn new(lines: &'a [L]) -> Self {
        Self { lines, position: 0 }
    }

    /// The current line, `None` at the end of the header.
    pub(crate) fn peek(&self) -> Option<&'a str> {
        let line = self.raw_line(self.position)?;
        (line != HEADER_BREAK).then_some(line)
    }

    /// The current line, unless the header ends here or the line is blank.
    pub(crate) fn peek_content(&self) -> Option<&'a str> {
        self.peek().filter(|line| !line.is_empty())
    }

    pub(crate) fn advance(&mut self) {
        if self.position < self.lines.len() {
            self.position += 1;
        }
    }

    /// 1-based number of the current line.
    pub(crate) fn line_number(&self) -> usize {
        self.position + 1
    }

    pub(crate) fn skip_blank_lines(&mut self) {
        while self.peek().is_some_and(str::is_empty) {
            self.advance();
        }
    }

    /// Skip line comments (`// ...`) and block comments (a line of four or more `/`
    /// through the next identical line).
    pub(crate) fn skip_comment_lines(&mut self) {
        while let Some(line) = self.peek() {
            if is_block_comment_delimiter(line) {
                self.advance();
                while let Some(inner) = self.raw_line(self.position) {
                    self.advance();
                    if inner == line {
                        break;
                    }
                }
            } else if line.starts_with("//") && !line.starts_with(HEADER_BREAK) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Everything from the current line on.
    pub(crate) fn remaining(&self) -> &'a [L] {
        self.lines.get(self.position..).unwrap_or_default()
    }

    fn raw_line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).map(|line| line.as_ref().trim_end())
    }
}

fn is_block_comment_delimiter(line: &str) -> bool {
    line.len() >= 4 && line.chars().all(|c| c == '/')
}
