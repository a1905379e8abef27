//! The revision line, the line after the author line:
//!
//! ```text
//! v2.9, 01-09-2024: Fall incarnation
//! ```
use crate::HeaderMetadata;

/// A recognized revision line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevisionLine {
    /// ` :remark`
    RemarkOnly(String),
    /// `vNUMBER[, DATE][: REMARK]` or `NUMBER, [DATE][: REMARK]`.
    Versioned {
        number: String,
        date: Option<String>,
        remark: Option<String>,
    },
    /// `DATE[: REMARK]`. The date is free text.
    Dated {
        date: String,
        remark: Option<String>,
    },
}

impl RevisionLine {
    /// The `revnumber`, `revdate` and `revremark` keys present in this line.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let (number, date, remark) = match self {
            RevisionLine::RemarkOnly(remark) => (None, None, Some(remark.as_str())),
            RevisionLine::Versioned {
                number,
                date,
                remark,
            } => (Some(number.as_str()), date.as_deref(), remark.as_deref()),
            RevisionLine::Dated { date, remark } => (None, Some(date.as_str()), remark.as_deref()),
        };
        [
            ("revnumber", number),
            ("revdate", date),
            ("revremark", remark),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
    }

    #[must_use]
    pub fn metadata(&self) -> HeaderMetadata {
        let mut metadata = HeaderMetadata::new();
        for (key, value) in self.fields() {
            metadata.insert_text(key, value);
        }
        metadata
    }
}

/// Parse a revision line. Returns `None` when the line cannot be one, in which case
/// it is left for the document body.
#[tracing::instrument(level = "trace")]
pub fn parse_revision_line(line: &str) -> Option<RevisionLine> {
    let (number, rest) = match split_number(line) {
        Some((number, rest)) => (Some(number), rest),
        None => (None, line),
    };
    let (component, remark) = split_remark(rest, number.is_none())?;
    let component = component.trim();
    let remark = remark.map(|remark| remark.trim_end().to_string());

    let revision = match number {
        Some(number) => RevisionLine::Versioned {
            number: number.trim_end().to_string(),
            date: (!component.is_empty()).then(|| component.to_string()),
            remark,
        },
        None => {
            if let Some(number) = component
                .strip_prefix('v')
                .or_else(|| component.strip_prefix('V'))
            {
                RevisionLine::Versioned {
                    number: number.to_string(),
                    date: None,
                    remark,
                }
            } else if !component.is_empty() {
                RevisionLine::Dated {
                    date: component.to_string(),
                    remark,
                }
            } else {
                RevisionLine::RemarkOnly(remark?)
            }
        }
    };
    tracing::debug!(?revision, "found revision line");
    Some(revision)
}

/// Split `[prefix]NUMBER,` off the front of the line.
///
/// The number starts after the leading run of characters that are neither ASCII digits
/// nor `{`, and ends at the first comma from there. A line without such a comma puts
/// an empty number before the last comma inside that leading run instead. A comma
/// directly followed by `:` never ends the number.
fn split_number(line: &str) -> Option<(&str, &str)> {
    let prefix_len = line
        .find(|c: char| c.is_ascii_digit() || c == '{')
        .unwrap_or(line.len());
    let commas = line.match_indices(',').map(|(index, _)| index);
    let after = commas.clone().filter(|index| *index >= prefix_len);
    let before = commas
        .filter(|index| *index < prefix_len)
        .collect::<Vec<_>>();

    after
        .chain(before.into_iter().rev())
        .find_map(|comma| {
            let rest = line.get(comma + 1..)?;
            if rest.starts_with(':') {
                return None;
            }
            let number = if comma >= prefix_len {
                line.get(prefix_len..comma)?
            } else {
                ""
            };
            Some((number, rest))
        })
}

/// Split `rest` into the version-or-date part and the remark after the first `:`.
///
/// The part before the remark may not start with `:` once leading spaces are skipped;
/// at least one space in front of the colon makes the whole line a remark. `at_start`
/// tells whether `rest` begins the line, where a remark cannot begin.
fn split_remark(rest: &str, at_start: bool) -> Option<(&str, Option<&str>)> {
    let trimmed = rest.trim_start_matches(' ');
    let skipped = rest.len() - trimmed.len();

    if trimmed.starts_with(':') {
        if skipped == 0 {
            return None;
        }
        let remark = trimmed.get(1..)?.trim_start_matches(' ');
        return Some(("", Some(remark)));
    }

    for (index, _) in trimmed.char_indices() {
        let candidate = trimmed.get(index..)?;
        let after_spaces = candidate.trim_start_matches(' ');
        if at_start && skipped == 0 && index == 0 && after_spaces.len() == candidate.len() {
            continue;
        }
        let colon = after_spaces.strip_prefix(',').unwrap_or(after_spaces);
        if let Some(remark) = colon.strip_prefix(':') {
            let component = trimmed.get(..index)?;
            return Some((component, Some(remark.trim_start_matches(' '))));
        }
    }
    Some((trimmed, None))
}
