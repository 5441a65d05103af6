//! Token resolution properties and file-backed themes.

use std::fs;
use std::sync::Arc;

use proptest::prelude::*;
use tempfile::TempDir;
use tokenstyle::prelude::*;
use tokenstyle::token::{component_token, prefix_token, token_to_css_var, DeprecatedToken};
use tokenstyle::TokenSetError;

// ============================================================================
// Strategies
// ============================================================================

fn component_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,8}"
}

fn token_key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}([A-Z][a-z]{1,6}){0,2}"
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Mangling keeps the component name and capitalizes the key.
    #[test]
    fn mangled_key_is_component_plus_capitalized_key(component in component_name(), key in token_key()) {
        let mangled = prefix_token(&component, &key);
        prop_assert!(mangled.starts_with(&component));
        let rest = &mangled[component.len()..];
        prop_assert_eq!(rest.to_lowercase(), key.to_lowercase());
        prop_assert!(rest.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
    }

    /// Setting the old key or the new key resolves to the same new value.
    #[test]
    fn deprecated_key_is_equivalent_to_new_key(
        component in component_name(),
        old in token_key(),
        new in token_key(),
        value in 0i32..10_000,
        default in 0i32..10_000,
    ) {
        prop_assume!(old != new);
        let defaults: TokenMap = [(new.clone(), TokenValue::from(default))].into();
        let deprecated = [DeprecatedToken::new(old.clone(), new.clone())];

        let via_old = TokenSet::new().with_component(component.clone(), [(old.clone(), TokenValue::from(value))]);
        let via_new = TokenSet::new().with_component(component.clone(), [(new.clone(), TokenValue::from(value))]);

        let a = component_token(&component, &via_old, &defaults, &deprecated);
        let b = component_token(&component, &via_new, &defaults, &deprecated);
        prop_assert_eq!(&a[&new], &b[&new]);
        prop_assert_eq!(&a[&new], &TokenValue::from(value));
    }

    /// Variable names are lower-case custom properties.
    #[test]
    fn css_var_names_are_kebab_custom_properties(key in token_key()) {
        let name = token_to_css_var(&key, Some("ant"));
        prop_assert!(name.starts_with("--ant-"));
        prop_assert_eq!(name.to_lowercase(), name.clone());
        prop_assert!(!name.contains(' '));
    }
}

// ============================================================================
// File-backed themes
// ============================================================================

#[test]
fn test_yaml_theme_drives_styles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dark.yaml");
    fs::write(
        &path,
        r##"
token:
  colorText: "#fff"
  fontSize: 14
components:
  Typography:
    titleMarginBottom: 12
"##,
    )
    .unwrap();

    let tokens = TokenSet::from_file(&path).unwrap();
    let cache = Arc::new(StyleCache::new());
    let utils = StyleUtils::new(StyleUtilsConfig::new(TokenContext::new(tokens), cache.clone()));
    utils
        .gen_style_hooks(
            "Typography",
            |token: &FullToken, _: &StyleInfo| {
                Interpolation::from(CssObject::new().nest(
                    &token.component_cls,
                    CssObject::new()
                        .prop("color", token.get("colorText"))
                        .prop("marginBottom", token.get("titleMarginBottom")),
                ))
            },
            DefaultToken::derive(|token| {
                let size = token.get("fontSize").and_then(TokenValue::as_number).unwrap_or(14.0);
                [("titleMarginBottom".to_string(), TokenValue::from(size * 0.5))].into()
            }),
            StyleOptions::new(),
        )
        .use_style("ant-typography", None)
        .unwrap();

    assert_eq!(
        cache.extract_css(false),
        ".ant-typography{color:#fff;margin-bottom:12px;}"
    );
}

#[test]
fn test_json_and_yaml_identities_agree() {
    let yaml = TokenSet::from_yaml("token:\n  fontSize: 14\n").unwrap();
    let json = TokenSet::from_json(r#"{"token": {"fontSize": 14}}"#).unwrap();
    assert_eq!(yaml, json);
    assert_eq!(yaml.identity(), json.identity());
    assert_eq!(
        TokenContext::new(yaml).hash_id(),
        TokenContext::new(json).hash_id()
    );
}

#[test]
fn test_unsupported_theme_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("theme.toml");
    fs::write(&path, "fontSize = 14").unwrap();
    assert!(matches!(
        TokenSet::from_file(&path),
        Err(TokenSetError::UnsupportedFormat(_))
    ));
}
