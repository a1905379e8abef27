//! Indentation normalization for verbatim block content.
//!
//! Listing and literal blocks may ask for their content to be re-indented through the
//! `indent` block attribute, and for tabs to be expanded through `tabsize`.
use std::str::FromStr;

use crate::{DocumentAttributes, ElementAttributes, Error};

/// Target indentation of a verbatim block. The default strips the common
/// indentation entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indent {
    /// Keep the original indentation (`indent=-1`). Tabs are still expanded.
    Preserve,
    /// Strip the common indentation and indent every line by this many columns.
    Columns(usize),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Columns(0)
    }
}

impl FromStr for Indent {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value == "-1" {
            return Ok(Indent::Preserve);
        }
        value
            .parse::<usize>()
            .map(Indent::Columns)
            .map_err(|_| Error::InvalidIndent(value.to_string()))
    }
}

/// The indentation settings of one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndentOptions {
    pub indent: Indent,
    /// Tab stop width used to expand tabs; `0` leaves tabs alone.
    pub tab_size: usize,
}

impl IndentOptions {
    /// Read the `indent` and `tabsize` attributes of a block.
    ///
    /// A block without `tabsize` uses the document's `tabsize`, if any. A block without
    /// `indent` keeps its indentation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndent`] or [`Error::InvalidTabSize`] when the values
    /// are not whole numbers.
    pub fn from_attributes(
        attributes: &ElementAttributes,
        document_attributes: &DocumentAttributes,
    ) -> Result<Self, Error> {
        let indent = attributes
            .get("indent")
            .map(Indent::from_str)
            .transpose()?
            .unwrap_or(Indent::Preserve);
        let tab_size = attributes
            .get("tabsize")
            .or_else(|| document_attributes.get("tabsize"))
            .map(|value| {
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| Error::InvalidTabSize(value.to_string()))
            })
            .transpose()?
            .unwrap_or_default();
        Ok(Self { indent, tab_size })
    }
}

/// Normalize the indentation of `lines` in place.
///
/// With `tab_size > 0` every tab is first expanded to the next tab stop, counting
/// columns from the start of the line. Then, unless `indent` is
/// [`Indent::Preserve`], the smallest indentation among the non-blank lines is
/// removed and replaced by `indent` columns. Blank lines come out empty.
#[tracing::instrument(level = "trace", skip(lines), fields(lines = lines.len()))]
pub fn adjust_indentation(lines: &mut [String], indent: Indent, tab_size: usize) {
    if lines.is_empty() {
        return;
    }

    if tab_size > 0 {
        for line in lines.iter_mut().filter(|line| line.contains('\t')) {
            *line = expand_tabs(line, tab_size);
        }
    }

    let Indent::Columns(target) = indent else {
        return;
    };

    let block_indent = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| leading_spaces(line))
        .min()
        .unwrap_or_default();
    let new_indent = " ".repeat(target);

    for line in lines.iter_mut() {
        if is_blank(line) {
            line.clear();
            continue;
        }
        let content = line.get(block_indent..).unwrap_or_default();
        *line = format!("{new_indent}{content}");
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn expand_tabs(line: &str, tab_size: usize) -> String {
    let mut result = String::with_capacity(line.len() + tab_size);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let spaces = tab_size - column % tab_size;
            result.extend(std::iter::repeat_n(' ', spaces));
            column += spaces;
        } else {
            result.push(c);
            column += 1;
        }
    }
    result
}
