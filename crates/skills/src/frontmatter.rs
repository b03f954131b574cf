//! SKILL.md frontmatter parsing.
//!
//! Frontmatter is a block at the very start of the file delimited by `---`
//! lines. JSON is tried first, then YAML. Blocks that are not valid YAML
//! (an unquoted `description: a: b`, say) are read line by line as
//! `key: value` pairs. `\n`, `\r\n` and `\r` line endings are accepted.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^---(?:\r\n|\n|\r)(.*?)(?:\r\n|\n|\r)---").expect("valid frontmatter pattern")
});

static FRONTMATTER_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^---(?:\r\n|\n|\r)(.*?)(?:\r\n|\n|\r)---(?:\r\n|\n|\r)*")
        .expect("valid frontmatter block pattern")
});

/// Name and description declared by a skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SkillMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Return the raw frontmatter text, if the content starts with a block.
pub fn extract(content: &str) -> Option<&str> {
    FRONTMATTER
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Remove a leading frontmatter block and the line breaks that follow it.
pub fn strip(content: &str) -> String {
    FRONTMATTER_BLOCK.replace(content, "").into_owned()
}

/// Parse frontmatter text: JSON, then YAML, then lenient `key: value` lines.
pub fn parse(frontmatter: &str) -> SkillMetadata {
    let normalized = frontmatter.replace("\r\n", "\n").replace('\r', "\n");

    let meta = serde_json::from_str::<SkillMetadata>(&normalized)
        .ok()
        .or_else(|| serde_yaml::from_str::<SkillMetadata>(&normalized).ok())
        .unwrap_or_else(|| parse_lines(&normalized));

    SkillMetadata {
        name: meta.name.trim().to_string(),
        description: meta.description.trim().to_string(),
    }
}

fn parse_lines(content: &str) -> SkillMetadata {
    let mut meta = SkillMetadata::default();
    for (key, value) in split_key_values(content) {
        match key.as_str() {
            "name" => meta.name = value,
            "description" => meta.description = value,
            _ => {}
        }
    }
    meta
}

/// Split flat `key: value` lines on the first colon. Blank lines and `#`
/// comments are skipped, surrounding quotes are removed from values.
fn split_key_values(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_yaml_block() {
        let content = "---\nname: github\ndescription: \"Work with GitHub\"\n---\n# Body";
        let fm = extract(content).unwrap();
        assert_eq!(
            parse(fm),
            SkillMetadata {
                name: "github".into(),
                description: "Work with GitHub".into(),
            }
        );
    }

    #[test]
    fn json_frontmatter_preferred() {
        let content = "---\n{\"name\": \"weather\", \"description\": \"Forecasts: daily\"}\n---\n";
        let meta = parse(extract(content).unwrap());
        assert_eq!(meta.name, "weather");
        assert_eq!(meta.description, "Forecasts: daily");
    }

    #[test]
    fn windows_and_classic_mac_line_endings() {
        let crlf = "---\r\nname: a-b\r\ndescription: 'desc'\r\n---\r\nbody";
        assert_eq!(parse(extract(crlf).unwrap()).description, "desc");

        let cr = "---\rname: a-b\rdescription: desc\r---\rbody";
        assert_eq!(parse(extract(cr).unwrap()).name, "a-b");
    }

    #[test]
    fn comments_and_unknown_keys_ignored() {
        let meta = parse("# comment\nversion: 2\nname: tool\n\ndescription: Does things");
        assert_eq!(meta.name, "tool");
        assert_eq!(meta.description, "Does things");
    }

    #[test]
    fn folded_and_literal_scalars() {
        let folded = parse("name: weather\ndescription: >\n  Fetches daily forecasts\n  for a city");
        assert_eq!(folded.description, "Fetches daily forecasts for a city");

        let literal = parse("name: notes\ndescription: |\n  Line one\n  Line two\n");
        assert_eq!(literal.description, "Line one\nLine two");
    }

    #[test]
    fn trailing_comment_not_part_of_value() {
        let meta = parse("name: weather # the skill id\ndescription: Forecasts # short");
        assert_eq!(meta.name, "weather");
        assert_eq!(meta.description, "Forecasts");
    }

    #[test]
    fn invalid_yaml_falls_back_to_line_split() {
        let meta = parse("name: clock\ndescription: Time: zones and alarms");
        assert_eq!(meta.name, "clock");
        assert_eq!(meta.description, "Time: zones and alarms");
    }

    #[test]
    fn missing_block_returns_none() {
        assert!(extract("# Just markdown\n---\n").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn strip_removes_block_and_trailing_newlines() {
        let content = "---\nname: x\n---\n\n# Title\nText";
        assert_eq!(strip(content), "# Title\nText");
        assert_eq!(strip("# No frontmatter"), "# No frontmatter");
    }
}
