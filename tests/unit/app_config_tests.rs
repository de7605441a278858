/*!
 * Tests for style parameter loading and layering
 */

use std::collections::HashMap;

use screenright::app_config::{
    PAGE_MARGIN_LEFT_IN, PAGE_MARGIN_RIGHT_IN, StyleParameters, parse_parameter_text,
};
use screenright::classifier::ParagraphRole;
use screenright::errors::AppError;

use crate::common;

/// Hardcoded defaults match the documented table
#[test]
fn test_default_parameters_shouldMatchDocumentedValues() {
    let params = StyleParameters::default();

    assert_eq!(params.start_keyword, "OBRAZ 1");
    assert_eq!(params.scene_marker, "OBRAZ");
    assert_eq!(params.font_name, "Courier");
    assert_eq!(params.font_size_pt, 12.0);
    assert_eq!(params.line_spacing_pt, 22.0);
    assert_eq!(params.character.left_in, 4.2);
    assert_eq!(params.character.right_in, 1.0);
    assert_eq!(params.dialogue.left_in, 2.9);
    assert_eq!(params.dialogue.right_in, 2.3);
    assert_eq!(params.parenthetical.left_in, 3.6);
    assert_eq!(params.parenthetical.right_in, 2.9);
}

/// Parameter text parsing takes `Key: Value` lines and skips the rest
#[test]
fn test_parse_parameter_text_withMixedLines_shouldKeepKeyValuePairsOnly() {
    let text = "Font: Courier New\nFont Size: 14\n\nnot a parameter line\nNoSeparator\n";
    let entries = parse_parameter_text(text);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries.get("Font").map(String::as_str), Some("Courier New"));
    assert_eq!(entries.get("Font Size").map(String::as_str), Some("14"));
}

/// Values keep everything after the first separator
#[test]
fn test_parse_parameter_text_withColonInValue_shouldSplitOnFirstSeparator() {
    let entries = parse_parameter_text("Start Formatting From: OBRAZ 1: THE BEGINNING\n");
    assert_eq!(
        entries.get("Start Formatting From").map(String::as_str),
        Some("OBRAZ 1: THE BEGINNING")
    );
}

/// Entries override defaults key by key
#[test]
fn test_from_entries_withOverrides_shouldLayerOverDefaults() {
    let mut entries = HashMap::new();
    entries.insert("Font".to_string(), "Courier Prime".to_string());
    entries.insert("Dialogue Indent Left".to_string(), "3.1".to_string());

    let params = StyleParameters::from_entries(&entries);

    assert_eq!(params.font_name, "Courier Prime");
    assert_eq!(params.dialogue.left_in, 3.1);
    // Untouched keys keep their defaults.
    assert_eq!(params.font_size_pt, 12.0);
    assert_eq!(params.character.left_in, 4.2);
}

/// A malformed numeric value falls back to its own default without
/// disturbing the other keys
#[test]
fn test_from_entries_withMalformedNumber_shouldFallBackPerKey() {
    let mut entries = HashMap::new();
    entries.insert("Font Size".to_string(), "twelve".to_string());
    entries.insert("Line Spacing".to_string(), "24".to_string());

    let params = StyleParameters::from_entries(&entries);

    assert_eq!(params.font_size_pt, 12.0);
    assert_eq!(params.line_spacing_pt, 24.0);
}

/// Indents convert from page-edge values to margin-relative values
#[test]
fn test_indent_for_withStyledRoles_shouldReturnMarginRelativePairs() {
    let params = StyleParameters::default();

    let cue = params.indent_for(ParagraphRole::CharacterCue).unwrap();
    assert_eq!(cue.left_in, 4.2 - PAGE_MARGIN_LEFT_IN);
    assert_eq!(cue.right_in, 1.0 - PAGE_MARGIN_RIGHT_IN);

    let scene = params.indent_for(ParagraphRole::SceneHeading).unwrap();
    assert_eq!(scene.left_in, 1.5 - PAGE_MARGIN_LEFT_IN);

    let action = params.indent_for(ParagraphRole::Action).unwrap();
    assert_eq!(action.left_in, 1.5 - PAGE_MARGIN_LEFT_IN);
}

/// Empty and unknown paragraphs get no indent override
#[test]
fn test_indent_for_withUnstyledRoles_shouldReturnNone() {
    let params = StyleParameters::default();
    assert!(params.indent_for(ParagraphRole::Empty).is_none());
    assert!(params.indent_for(ParagraphRole::Unknown).is_none());
}

/// Serialized parameters parse back to the same values
#[test]
fn test_to_parameter_text_withDefaults_shouldRoundTrip() {
    let params = StyleParameters::default();
    let text = params.to_parameter_text();

    let reparsed = StyleParameters::from_entries(&parse_parameter_text(&text));
    assert_eq!(reparsed, params);
}

/// An explicit parameter path must exist
#[test]
fn test_load_withMissingExplicitPath_shouldReturnParameterError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let missing = temp_dir.path().join("no-such-parameters.txt");

    let result = StyleParameters::load(Some(&missing));
    assert!(matches!(result, Err(AppError::Parameter(_))));
}

/// An explicit parameter file overrides the defaults
#[test]
fn test_load_withExplicitFile_shouldApplyOverrides() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "parameters.txt",
        "Font: Courier New\nScene Indent Left: 1.8\nStart Formatting From: SCENE 1\n",
    )
    .unwrap();

    let params = StyleParameters::load(Some(&path)).unwrap();
    assert_eq!(params.font_name, "Courier New");
    assert_eq!(params.scene.left_in, 1.8);
    assert_eq!(params.start_keyword, "SCENE 1");
    assert_eq!(params.dialogue.left_in, 2.9);
}
