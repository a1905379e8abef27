//! Attribute table and indentation invariants
//!
//! - Negated names always store the unset marker under the canonical name.
//! - Locked attributes never change, unlocked ones always do.
//! - Attribute references are resolved in a single pass.
//! - `Indent::Preserve` keeps the relative indentation of every line, tabs expanded.

use proptest::prelude::*;

use crate::{
    AttributeValue, Document, DocumentAttributes, Indent, Options, adjust_indentation,
    store_attribute,
};

use super::generators::*;

const ALIASES: [&str; 3] = ["numbered", "hardbreaks", "showtitle"];

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// The column the text of `line` starts at, with tab stops every `tab_size` columns.
fn leading_columns(line: &str, tab_size: usize) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .fold(0, |column, c| {
            if c == '\t' {
                column + tab_size - column % tab_size
            } else {
                column + 1
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn negated_names_are_unset(
        name in attribute_name(),
        value in plain_value(),
        prefix in any::<bool>(),
    ) {
        prop_assume!(!ALIASES.contains(&name.as_str()));
        let negated = if prefix { format!("!{name}") } else { format!("{name}!") };

        let mut attributes = DocumentAttributes::new();
        attributes.store(&name, Some("before"), false);
        let (stored_name, stored_value) = attributes.store(&negated, Some(&value), false);

        prop_assert_eq!(&stored_name, &name);
        prop_assert_eq!(stored_value, None);
        prop_assert_eq!(attributes.value(&name), Some(&AttributeValue::Unset));

        let (canonical, resolved) = store_attribute(&negated, Some(&value), None, None);
        prop_assert_eq!(canonical, name);
        prop_assert_eq!(resolved, None);
    }

    #[test]
    fn locked_attributes_never_change(
        name in attribute_name(),
        locked in plain_value(),
        value in plain_value(),
    ) {
        prop_assume!(!ALIASES.contains(&name.as_str()));
        let options = Options::builder().with_attribute(&name, locked.as_str()).build();
        let mut document = Document::new(&options);
        let mut record = Vec::new();

        let _ = store_attribute(&name, Some(&value), Some(&mut document), Some(&mut record));
        let negated = format!("{name}!");
        let _ = store_attribute(&negated, None, Some(&mut document), Some(&mut record));

        prop_assert_eq!(document.attributes().get(&name), Some(locked.as_str()));
        prop_assert!(record.is_empty());
        prop_assert!(document.attributes().entries().is_empty());
    }

    #[test]
    fn unlocked_stores_always_apply(
        name in attribute_name(),
        values in prop::collection::vec(plain_value(), 1..5),
    ) {
        let mut attributes = DocumentAttributes::new();
        for (index, value) in values.iter().enumerate() {
            attributes.store(&name, Some(value), false);
            prop_assert_eq!(attributes.get(&name), Some(value.as_str()));
            prop_assert_eq!(attributes.entries().len(), index + 1);
        }
    }

    #[test]
    fn substitution_is_single_pass(name in attribute_name(), target in attribute_name()) {
        prop_assume!(name != target && name != "copy" && target != "copy");
        let mut attributes = DocumentAttributes::new();
        let reference = format!("{{{target}}}");
        attributes.store(&name, Some(&reference), false);
        attributes.store(&target, Some("resolved"), false);

        let (_, value) = attributes.store("copy", Some(&format!("{{{name}}}")), false);
        prop_assert_eq!(value.as_deref(), Some(reference.as_str()));
    }

    #[test]
    fn missing_references_stay_in_place(text in value_with_references()) {
        let mut attributes = DocumentAttributes::new();
        let (_, value) = attributes.store("copy", Some(&text), false);
        prop_assert_eq!(value, Some(text));
    }

    #[test]
    fn preserve_keeps_indentation_deltas(lines in tabbed_lines()) {
        let original = lines.clone();
        let mut adjusted = lines;
        adjust_indentation(&mut adjusted, Indent::Preserve, 4);

        prop_assert_eq!(adjusted.len(), original.len());
        for (before, after) in original.iter().zip(&adjusted) {
            prop_assert!(!after.contains('\t'));
            prop_assert_eq!(leading_spaces(after), leading_columns(before, 4));
            prop_assert!(after.split_whitespace().eq(before.split_whitespace()));
        }
    }

    #[test]
    fn preserve_without_tab_size_changes_nothing(lines in tabbed_lines()) {
        let original = lines.clone();
        let mut adjusted = lines;
        adjust_indentation(&mut adjusted, Indent::Preserve, 0);
        prop_assert_eq!(adjusted, original);
    }

    #[test]
    fn columns_set_the_minimum_indentation(lines in indented_lines(), target in 0..8usize) {
        prop_assume!(lines.iter().any(|line| !line.trim().is_empty()));
        let original = lines.clone();
        let mut adjusted = lines;
        adjust_indentation(&mut adjusted, Indent::Columns(target), 0);

        let minimum = adjusted
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| leading_spaces(line))
            .min();
        prop_assert_eq!(minimum, Some(target));

        let deltas = |lines: &[String]| {
            lines
                .iter()
                .filter(|line| !line.trim().is_empty())
                .map(|line| leading_spaces(line))
                .collect::<Vec<_>>()
        };
        let before = deltas(&original);
        let after = deltas(&adjusted);
        let shift = before.iter().min().copied().unwrap_or_default();
        prop_assert_eq!(
            after,
            before.iter().map(|indent| indent - shift + target).collect::<Vec<_>>()
        );
    }
}
