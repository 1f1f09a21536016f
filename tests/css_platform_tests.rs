// tests/css_platform_tests.rs

use quarksy::{CssPlatform, CssPlatformOptions, Platform, TokensObject};

const TOKENS: &str = r##"{
    "color": {
        "brandPrimary": { "value": "#0055ff", "type": "color" }
    },
    "spacing": {
        "sm": { "value": "4px", "type": "spacing" },
        "md": { "value": "{spacing.sm} * 2", "type": "spacing" },
        "base": { "value": "8", "type": "spacing" }
    },
    "typography": {
        "heading": {
            "value": { "fontSize": "{spacing.md} * 2", "fontWeight": "bold", "lineHeight": "1.5" },
            "type": "typography"
        },
        "body": {
            "value": { "fontSize": "{spacing.sm} * 4" },
            "type": "typography"
        }
    }
}"##;

fn run(options: CssPlatformOptions) -> (String, String) {
    let tokens: TokensObject = TOKENS.parse().unwrap();
    let mut outputs = CssPlatform::new(options).run(&tokens).unwrap();
    assert_eq!(outputs.len(), 1);
    let output = outputs.remove(0);
    (output.file_name, output.content)
}

#[test]
fn test_default_output() {
    let (file_name, content) = run(CssPlatformOptions::default());

    assert_eq!(file_name, "design-tokens.css");
    assert_eq!(
        content,
        "\
:root {
    --color-brand-primary: #0055ff;
    --spacing-sm: 4px;
    --spacing-md: 8px;
    --spacing-base: 8;
}

.typography-heading {
    font-size: 16px;
    font-weight: bold;
    line-height: 1.5;
}

.typography-body {
    font-size: 16px;
}
"
    );
}

#[test]
fn test_prefixes() {
    let (_, content) = run(CssPlatformOptions {
        out_file_name: "tokens.css".to_string(),
        variable_prefix: Some("ds".to_string()),
        class_prefix: Some("text".to_string()),
    });

    assert!(content.contains("    --ds-spacing-sm: 4px;\n"));
    assert!(content.contains("\n.text-typography-heading {\n"));
    assert!(content.contains("\n.text-typography-body {\n"));
}

#[test]
fn test_platform_name() {
    assert_eq!(CssPlatform::default().name(), "css");
}

#[test]
fn test_empty_tree() {
    let tokens: TokensObject = "{}".parse().unwrap();
    let outputs = CssPlatform::default().run(&tokens).unwrap();
    assert_eq!(outputs[0].content, ":root {\n}\n");
}

#[test]
fn test_token_named_value() {
    let tokens: TokensObject = r#"{
        "foo": { "value": { "value": "1px", "type": "spacing" } }
    }"#
    .parse()
    .unwrap();

    let outputs = CssPlatform::default().run(&tokens).unwrap();
    assert_eq!(outputs[0].content, ":root {\n    --foo-value: 1px;\n}\n");
}
