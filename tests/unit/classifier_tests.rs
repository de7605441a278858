/*!
 * Tests for paragraph role classification
 */

use screenright::classifier::{Classifier, ParagraphRole, is_upper_text};

const ALL_ROLES: [ParagraphRole; 7] = [
    ParagraphRole::SceneHeading,
    ParagraphRole::CharacterCue,
    ParagraphRole::Parenthetical,
    ParagraphRole::Dialogue,
    ParagraphRole::Action,
    ParagraphRole::Empty,
    ParagraphRole::Unknown,
];

/// Empty text is empty no matter what came before it
#[test]
fn test_classify_withEmptyText_shouldReturnEmptyForAnyPrevious() {
    let classifier = Classifier::default();
    for previous in ALL_ROLES {
        assert_eq!(classifier.classify("", previous), ParagraphRole::Empty);
    }
}

/// An all-caps name is a character cue at document start
#[test]
fn test_classify_withUpperCaseName_shouldReturnCharacterCue() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("JOHN", ParagraphRole::Unknown),
        ParagraphRole::CharacterCue
    );
    assert_eq!(
        classifier.classify("MARY SMITH", ParagraphRole::Action),
        ParagraphRole::CharacterCue
    );
}

/// A parenthetical only counts immediately after a cue
#[test]
fn test_classify_withParenText_shouldDependOnPreviousRole() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("(smiling)", ParagraphRole::CharacterCue),
        ParagraphRole::Parenthetical
    );
    assert_ne!(
        classifier.classify("(smiling)", ParagraphRole::Action),
        ParagraphRole::Parenthetical
    );
    // After a non-dialogue role, a paren-opening line fits no rule at all
    assert_eq!(
        classifier.classify("(smiling)", ParagraphRole::Action),
        ParagraphRole::Unknown
    );
}

/// Scene marker plus number is a scene heading
#[test]
fn test_classify_withSceneMarkerAndNumber_shouldReturnSceneHeading() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("OBRAZ 1", ParagraphRole::Unknown),
        ParagraphRole::SceneHeading
    );
    assert_eq!(
        classifier.classify("OBRAZ 12. INT. KITCHEN - DAY", ParagraphRole::Dialogue),
        ParagraphRole::SceneHeading
    );
}

/// Documented ambiguity: the bare marker also satisfies the character-cue
/// token rule and the cue rule fires first. This precedence is intentional
/// and must not be "fixed".
#[test]
fn test_classify_withBareSceneMarker_shouldResolveToCharacterCue() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("OBRAZ", ParagraphRole::Unknown),
        ParagraphRole::CharacterCue
    );
}

/// Dialogue is recognized purely by what precedes it
#[test]
fn test_classify_withTextAfterCue_shouldReturnDialogue() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("Hello there.", ParagraphRole::CharacterCue),
        ParagraphRole::Dialogue
    );
    assert_eq!(
        classifier.classify("I said hello.", ParagraphRole::Parenthetical),
        ParagraphRole::Dialogue
    );
    assert_eq!(
        classifier.classify("And more of it.", ParagraphRole::Dialogue),
        ParagraphRole::Dialogue
    );
}

/// The same text without a dialogue predecessor is action
#[test]
fn test_classify_withPlainTextAtDocumentStart_shouldReturnAction() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("Hello there.", ParagraphRole::Unknown),
        ParagraphRole::Action
    );
    assert_eq!(
        classifier.classify("A door slams.", ParagraphRole::SceneHeading),
        ParagraphRole::Action
    );
}

/// Single-letter tokens are common initials in action lines, not cues
#[test]
fn test_classify_withSingleLetterFirstToken_shouldNotBeCharacterCue() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("A dog barks.", ParagraphRole::Unknown),
        ParagraphRole::Action
    );
}

/// Digits fail the upper-case half of the cue token test
#[test]
fn test_classify_withDigitsInFirstToken_shouldNotBeCharacterCue() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("JOHN2 waves.", ParagraphRole::Unknown),
        ParagraphRole::Action
    );
}

/// A lower-case marker prefix is not a scene heading; the rule requires
/// entirely upper-case text
#[test]
fn test_classify_withLowerCaseSceneMarker_shouldNotBeSceneHeading() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("obraz 2. int. room", ParagraphRole::Unknown),
        ParagraphRole::Action
    );
}

/// The marker token is configurable
#[test]
fn test_classify_withCustomSceneMarker_shouldUseConfiguredToken() {
    let classifier = Classifier::new("SCENE");
    assert_eq!(
        classifier.classify("SCENE 3. EXT. STREET - NIGHT", ParagraphRole::Unknown),
        ParagraphRole::SceneHeading
    );
    // The default marker is just an upper-case word to this classifier
    assert_eq!(
        classifier.classify("OBRAZ 1", ParagraphRole::Unknown),
        ParagraphRole::CharacterCue
    );
}

/// First paragraph can never be a parenthetical or dialogue
#[test]
fn test_classify_withUnknownPrevious_shouldNeverYieldLookBackRoles() {
    let classifier = Classifier::default();
    for text in ["(beat)", "Plain words here.", "what now"] {
        let role = classifier.classify(text, ParagraphRole::Unknown);
        assert_ne!(role, ParagraphRole::Parenthetical);
        assert_ne!(role, ParagraphRole::Dialogue);
    }
}

/// Upper-case text test: needs a cased character, tolerates digits and
/// punctuation
#[test]
fn test_is_upper_text_withMixedContent_shouldMatchCasedCharactersOnly() {
    assert!(is_upper_text("OBRAZ 1."));
    assert!(is_upper_text("A"));
    assert!(!is_upper_text("OBRAZ one"));
    assert!(!is_upper_text("123"));
    assert!(!is_upper_text(""));
    assert!(!is_upper_text("(...)"));
}
