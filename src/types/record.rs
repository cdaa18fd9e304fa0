use serde::{Deserialize, Deserializer};

use super::rule::{PathCondition, Rule};

/// Patterns as exported: either a list, or the newline-separated text typed
/// into the condition form (`"/es\r\n/es/*"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum PatternList {
    Lines(String),
    List(Vec<String>),
}

pub(super) fn patterns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match PatternList::deserialize(deserializer)? {
        PatternList::Lines(text) => PathCondition::from_lines(&text).patterns,
        PatternList::List(list) => list,
    })
}

/// Page ids are exported as strings, but numeric node ids show up too.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageId {
    Text(String),
    Number(i64),
}

/// Wire form of [`Rule`]. Accepts both the crate's own field names and the
/// camel-cased `pathCondition` key of exported configuration.
#[derive(Deserialize)]
pub(super) struct RuleRecord {
    id: String,
    #[serde(default)]
    label: Option<String>,
    page: PageId,
    #[serde(default, alias = "pathCondition")]
    path_condition: PathCondition,
    #[serde(default = "enabled_default")]
    status: bool,
    #[serde(default)]
    weight: i32,
}

fn enabled_default() -> bool {
    true
}

impl From<RuleRecord> for Rule {
    fn from(record: RuleRecord) -> Self {
        let label = match record.label {
            Some(label) if !label.is_empty() => label,
            _ => record.id.clone(),
        };
        let target_page_id = match record.page {
            PageId::Text(page) => page,
            PageId::Number(page) => page.to_string(),
        };
        Rule {
            id: record.id,
            label,
            target_page_id,
            path_condition: record.path_condition,
            enabled: record.status,
            weight: record.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_as_text_split_on_lines() {
        let cond: PathCondition =
            serde_json::from_str(r#"{"pages": "/es\r\n\r\n  /es/*  \n"}"#).unwrap();
        assert_eq!(cond.patterns, vec!["/es", "/es/*"]);
        assert!(!cond.negate);
    }

    #[test]
    fn patterns_as_list_kept_verbatim() {
        let cond: PathCondition =
            serde_json::from_str(r#"{"patterns": ["/a", "/b/*"], "negate": true}"#).unwrap();
        assert_eq!(cond.patterns, vec!["/a", "/b/*"]);
        assert!(cond.negate);
    }

    #[test]
    fn numeric_page_id() {
        let rule: Rule = serde_json::from_str(r#"{"id": "r", "page": 12}"#).unwrap();
        assert_eq!(rule.target_page_id, "12");
        assert_eq!(rule.label, "r");
        assert!(rule.enabled);
    }

    #[test]
    fn blank_label_falls_back_to_id() {
        let rule: Rule = serde_json::from_str(r#"{"id": "r", "label": "", "page": "1"}"#).unwrap();
        assert_eq!(rule.label, "r");
    }
}
