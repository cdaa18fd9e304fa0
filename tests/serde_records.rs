#![cfg(feature = "serde")]

use notfound::{AliasMap, Rule, RuleSet};

#[test]
fn load_exported_records() {
    let json = r#"[
        {"id": "spanish", "label": "Spanish", "page": "20",
         "path_condition": {"pages": ["/es", "/es/*"]}, "status": true, "weight": 5},
        {"id": "shop", "page": "30", "path_condition": {"patterns": ["/es/*"]}, "weight": 1},
        {"id": "off", "page": "40", "path_condition": {"patterns": ["*"]},
         "status": false, "weight": 90}
    ]"#;
    let rules: Vec<Rule> = serde_json::from_str(json).unwrap();

    assert_eq!(rules[0].path_condition.patterns, vec!["/es", "/es/*"]);
    assert!(rules[1].enabled);
    assert_eq!(rules[1].label, "shop");
    assert!(!rules[1].path_condition.negate);
    assert!(!rules[2].enabled);

    let ruleset = RuleSet::from_rules(&rules).unwrap();
    assert_eq!(
        ruleset.resolve("/es/x", &AliasMap::new()).as_deref(),
        Some("/node/20")
    );
}

#[test]
fn load_config_export_shape() {
    let json = r#"{
        "id": "spanish",
        "label": "Spanish",
        "page": "20",
        "pathCondition": {"id": "request_path", "pages": "/es\r\n/es/*", "negate": false},
        "status": true,
        "weight": 5
    }"#;
    let rule: Rule = serde_json::from_str(json).unwrap();
    assert_eq!(rule.path_condition.patterns, vec!["/es", "/es/*"]);
    assert!(!rule.path_condition.negate);

    let ruleset = RuleSet::from_rules(&[rule]).unwrap();
    assert_eq!(
        ruleset.resolve("/es/x", &AliasMap::new()).as_deref(),
        Some("/node/20")
    );
    assert_eq!(
        ruleset.resolve("/es/", &AliasMap::new()).as_deref(),
        Some("/node/20")
    );
}

#[test]
fn negated_text_pages() {
    let json = r#"{"id": "not_admin", "page": "9",
        "pathCondition": {"pages": "/admin\n/admin/*", "negate": true}}"#;
    let rule: Rule = serde_json::from_str(json).unwrap();
    let ruleset = RuleSet::from_rules(&[rule]).unwrap();
    let aliases = AliasMap::new();
    assert_eq!(ruleset.resolve("/admin/people", &aliases), None);
    assert_eq!(ruleset.resolve("/shop", &aliases).as_deref(), Some("/node/9"));
}

#[test]
fn exported_field_names() {
    let rule = Rule::new("r", "7").with_pattern("/x").with_weight(-2);
    let value = serde_json::to_value(&rule).unwrap();
    assert_eq!(value["page"], "7");
    assert_eq!(value["status"], true);
    assert_eq!(value["weight"], -2);
    assert_eq!(value["path_condition"]["patterns"][0], "/x");

    let back: Rule = serde_json::from_value(value).unwrap();
    assert_eq!(back, rule);
}
