//! Focus view tests

use super::*;
use crate::chain::TransitionModel;
use crate::tokenize::tokenize;

fn model_of(text: &str) -> TransitionModel {
    TransitionModel::build(&tokenize(text))
}

#[test]
fn test_no_focus_returns_full_model() {
    let model = model_of("1 2 3 2 1");
    let view = focus_view(&model, None);
    assert_eq!(view.as_ref(), &model);
}

#[test]
fn test_focus_restricts_to_one_entry() {
    let model = model_of("1 2 3 2 1");
    let view = focus_view(&model, Some("2"));
    assert_eq!(view.len(), 1);
    assert!(view.contains("2"));
    assert_eq!(view.get("2").map(|s| s.len()), Some(2));
}

#[test]
fn test_focus_on_absent_token_is_empty() {
    let model = model_of("a b");
    let view = focus_view(&model, Some("zzz"));
    assert!(view.is_empty());
}

#[test]
fn test_focus_on_token_without_successors() {
    let model = model_of("a b");
    let view = focus_view(&model, Some("b"));
    assert_eq!(view.len(), 1);
    assert_eq!(view.get("b").map(|s| s.len()), Some(0));
}

#[test]
fn test_json_uses_two_space_indent() {
    let model = model_of("a a a");
    let json = focus_view_json(&model, None).unwrap_or_default();
    assert_eq!(
        json,
        "{\n  \"a\": {\n    \"a\": {\n      \"count\": 2,\n      \"chance\": 1.0\n    }\n  }\n}"
    );
}

#[test]
fn test_json_of_empty_model() {
    let model = model_of("");
    assert_eq!(focus_view_json(&model, None).unwrap_or_default(), "{}");
}

#[test]
fn test_json_focused_view() {
    let model = model_of("x y");
    let json = focus_view_json(&model, Some("y")).unwrap_or_default();
    assert_eq!(json, "{\n  \"y\": {}\n}");
}
