use std::io;
use std::io::ErrorKind;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use spdlog::warn;

lazy_static! {
    static ref YAML_SEPARATOR: Regex = Regex::new(r"(?:^|\n)---[ \t]*(?:\r?\n|$)").unwrap();
    static ref TOML_SEPARATOR: Regex = Regex::new(r"(?:^|\n)\+\+\+[ \t]*(?:\r?\n|$)").unwrap();
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Syntax {
    Yaml,
    Toml,
}

/// Splits a content file into its untyped frontmatter and the remaining body.
///
/// The block must open the file (leading blank lines are fine). A block that
/// fails to parse is logged and replaced by an empty object; a block that is
/// never closed is an `InvalidData` error.
pub fn split_frontmatter<'a>(file_name: &Path, content: &'a str) -> io::Result<(Value, &'a str)> {
    let trimmed = content.trim_start_matches(['\n', '\r']);
    let offset = content.len() - trimmed.len();

    let (separator, syntax) = if trimmed.starts_with("---") {
        (&*YAML_SEPARATOR, Syntax::Yaml)
    } else if trimmed.starts_with("+++") {
        (&*TOML_SEPARATOR, Syntax::Toml)
    } else {
        return Ok((Value::Object(Map::new()), content));
    };

    let start = match separator.find(content) {
        Some(start) if start.start() <= offset => start,
        _ => return Ok((Value::Object(Map::new()), content)),
    };
    let Some(end) = separator.find_at(content, start.end().saturating_sub(1)) else {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("End of frontmatter is missing - file={}", file_name.display()),
        ));
    };

    // `---\n---` shares the newline between both separators
    let block = &content[start.end()..end.start().max(start.end())];
    let body = &content[end.end()..];

    let parsed = match syntax {
        Syntax::Yaml => serde_yaml::from_str::<Value>(block).map_err(|e| e.to_string()),
        Syntax::Toml => toml::from_str::<Value>(block).map_err(|e| e.to_string()),
    };

    let frontmatter = match parsed {
        // An empty YAML block parses as null
        Ok(Value::Null) => Value::Object(Map::new()),
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring malformed frontmatter in {}: {}", file_name.display(), e);
            Value::Object(Map::new())
        }
    };

    Ok((frontmatter, body))
}
