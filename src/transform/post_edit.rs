//! Cosmetic post-edit pass over the replacement text
//!
//! The replacement produced by the tool often loses the indentation of the
//! region it replaces. These passes restore it; they never change the text's
//! meaning and are safe to disable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostEditAction {
    /// Leave the replacement untouched.
    None,
    /// Shift the replacement block to the original selection's indentation.
    Reindent,
    /// Reindent and strip trailing whitespace from each line.
    Reformat,
}

impl PostEditAction {
    pub fn apply(&self, replacement: &str, original_selection: &str) -> String {
        match self {
            PostEditAction::None => replacement.to_string(),
            PostEditAction::Reindent => reindent(replacement, leading_indent(original_selection)),
            PostEditAction::Reformat => {
                let reindented = reindent(replacement, leading_indent(original_selection));
                reindented
                    .split('\n')
                    .map(str::trim_end)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }
}

/// Leading whitespace of the first line.
fn leading_indent(text: &str) -> &str {
    let first_line = text.split('\n').next().unwrap_or("");
    let end = first_line
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(first_line.len());
    &first_line[..end]
}

/// Shift a block so its common indentation becomes `target`.
///
/// Blank lines are left alone; the common indentation is the longest shared
/// leading-whitespace prefix of the non-blank lines, so mixed tabs and spaces
/// are only stripped where every line agrees.
fn reindent(text: &str, target: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let common = common_indent(&lines);

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                (*line).to_string()
            } else {
                let stripped = line.strip_prefix(common.as_str()).unwrap_or(line);
                format!("{target}{stripped}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_indent(lines: &[&str]) -> String {
    let mut common: Option<&str> = None;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let indent = leading_indent(line);
        common = Some(match common {
            None => indent,
            Some(prev) => shared_prefix(prev, indent),
        });
    }

    common.unwrap_or("").to_string()
}

fn shared_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
