//! Frontmatter parsing and manipulation utilities.
//!
//! A frontmatter block is a YAML mapping between two `---` lines at the very
//! top of a markdown file. Besides the parsed mapping and the body, parsing
//! reports how many lines the block occupies (both delimiters included),
//! which is what block-relative cursor lines are counted from.

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::Result;

/// Ordered frontmatter mapping.
pub type Frontmatter = IndexMap<String, Value>;

const DELIMITER: &str = "---";

/// Result of parsing a markdown file with frontmatter.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// The parsed frontmatter as an ordered map.
    pub frontmatter: Frontmatter,
    /// The body content after the frontmatter.
    pub body: String,
    /// Lines taken by the block including both delimiters, 0 when there is no block.
    pub block_line_count: u32,
}

impl ParsedFile {
    /// Whether the file had a frontmatter block at all.
    pub fn has_block(&self) -> bool {
        self.block_line_count > 0
    }

    /// Write the file back out.
    ///
    /// A block that was present keeps its delimiters even when the mapping is
    /// now empty, so the body stays on the same lines.
    pub fn to_content(&self) -> Result<String> {
        if self.frontmatter.is_empty() && self.has_block() {
            return Ok(format!("{DELIMITER}\n{DELIMITER}\n{}", self.body));
        }
        serialize(&self.frontmatter, &self.body)
    }
}

/// Parse frontmatter and body, returning empty frontmatter if none exists.
///
/// A missing closing delimiter is treated as "no frontmatter": the whole
/// content is body. Invalid YAML inside a well-delimited block is an error.
pub fn parse_or_empty(content: &str) -> Result<ParsedFile> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    let opens = lines.first().is_some_and(|l| is_delimiter(l));
    let closing = if opens {
        lines
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, l)| is_delimiter(l))
            .map(|(idx, _)| idx)
    } else {
        None
    };

    let Some(closing) = closing else {
        return Ok(ParsedFile {
            frontmatter: IndexMap::new(),
            body: content.to_string(),
            block_line_count: 0,
        });
    };

    let yaml: String = lines[1..closing].concat();
    let frontmatter = if is_blank_yaml(&yaml) {
        IndexMap::new()
    } else {
        match serde_yaml::from_str::<Value>(&yaml)? {
            Value::Null => IndexMap::new(),
            value => serde_yaml::from_value(value)?,
        }
    };

    Ok(ParsedFile {
        frontmatter,
        body: lines[closing + 1..].concat(),
        block_line_count: u32::try_from(closing + 1).unwrap_or(u32::MAX),
    })
}

/// Only whitespace and `#` comments.
fn is_blank_yaml(yaml: &str) -> bool {
    yaml.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#')
    })
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}

/// Serialize frontmatter and body back to markdown content.
///
/// An empty mapping produces no block at all.
pub fn serialize(frontmatter: &Frontmatter, body: &str) -> Result<String> {
    if frontmatter.is_empty() {
        return Ok(body.to_string());
    }
    let yaml_str = serde_yaml::to_string(frontmatter)?;
    Ok(format!("{DELIMITER}\n{yaml_str}{DELIMITER}\n{body}"))
}

/// Merge `patch` onto `frontmatter` (in place).
///
/// Keys in the patch overwrite existing values and keep their position;
/// new keys are appended. Keys not in the patch are left untouched.
pub fn merge(frontmatter: &mut Frontmatter, patch: Frontmatter) {
    for (key, value) in patch {
        frontmatter.insert(key, value);
    }
}
