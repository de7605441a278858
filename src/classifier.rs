/*!
 * Paragraph role classification for screenplay text.
 *
 * Each paragraph of a screenplay plays exactly one dramatic role: a scene
 * heading, a character cue, a parenthetical, dialogue, action, or a blank
 * separator. The role is decided from the paragraph text plus the role of
 * the paragraph immediately before it — a parenthetical, for instance, is
 * only a parenthetical when it directly follows a character cue.
 */

use std::fmt;

// @module: Screenplay paragraph classification

/// The structural role of a single screenplay paragraph.
///
/// Exactly one role is assigned per paragraph per formatting pass. The role
/// of a paragraph may depend on its own text and the role of the previous
/// paragraph only; there is no lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphRole {
    /// Scene heading, e.g. "OBRAZ 1. INT. KITCHEN"
    SceneHeading,
    /// Character name line introducing dialogue
    CharacterCue,
    /// Stage direction inside dialogue, e.g. "(smiling)"
    Parenthetical,
    /// Spoken line following a cue or parenthetical
    Dialogue,
    /// Scene description / stage business
    Action,
    /// Blank separator paragraph
    Empty,
    /// The ruleset could not place this paragraph; left unstyled
    Unknown,
}

impl fmt::Display for ParagraphRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SceneHeading => "scene heading",
            Self::CharacterCue => "character cue",
            Self::Parenthetical => "parenthetical",
            Self::Dialogue => "dialogue",
            Self::Action => "action",
            Self::Empty => "empty",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Default scene-marker token (localized equivalent of "SCENE")
pub const DEFAULT_SCENE_MARKER: &str = "OBRAZ";

/// Classifies paragraphs by their screenplay role.
///
/// The classifier expects already-normalized text: internal whitespace runs
/// collapsed to single spaces, leading and trailing whitespace trimmed. The
/// formatting pass performs that normalization before calling in.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Literal token that identifies a scene heading when the text is all upper-case
    scene_marker: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_SCENE_MARKER)
    }
}

impl Classifier {
    /// Create a classifier with the given scene-marker token
    pub fn new<S: Into<String>>(scene_marker: S) -> Self {
        Classifier {
            scene_marker: scene_marker.into(),
        }
    }

    /// The scene-marker token this classifier recognizes
    pub fn scene_marker(&self) -> &str {
        &self.scene_marker
    }

    /// Assign a role to a normalized paragraph text.
    ///
    /// The rules are checked in a fixed order and the first match wins. The
    /// order encodes precedence, not convenience: the character-cue rule
    /// fires before the scene-heading rule, so a bare scene-marker token
    /// ("OBRAZ" on a line of its own) classifies as a character cue. That is
    /// how the source formatter behaves and downstream styling relies on it;
    /// do not reorder.
    pub fn classify(&self, text: &str, previous: ParagraphRole) -> ParagraphRole {
        if self.is_character_cue(text) {
            return ParagraphRole::CharacterCue;
        }
        if text.is_empty() {
            return ParagraphRole::Empty;
        }
        if Self::is_parenthetical(text, previous) {
            return ParagraphRole::Parenthetical;
        }
        if self.is_scene_heading(text) {
            return ParagraphRole::SceneHeading;
        }
        if self.is_dialogue(text, previous) {
            return ParagraphRole::Dialogue;
        }
        if self.is_action(text) {
            return ParagraphRole::Action;
        }
        ParagraphRole::Unknown
    }

    /// Scene heading: entirely upper-case and starting with the marker token
    pub fn is_scene_heading(&self, text: &str) -> bool {
        is_upper_text(text) && text.starts_with(&self.scene_marker)
    }

    /// Character cue: the first token is a multi-character run of upper-case
    /// alphanumerics. Scene headings longer than the bare marker are
    /// excluded here; the bare marker itself is not (see `classify`).
    /// Single-letter tokens are excluded because lone initials are common in
    /// action lines.
    pub fn is_character_cue(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        if self.is_scene_heading(text) && text.len() > self.scene_marker.len() {
            return false;
        }
        let Some(first_token) = text.split_whitespace().next() else {
            return false;
        };
        is_cue_token(first_token)
    }

    /// Parenthetical: only recognizable immediately after a character cue
    fn is_parenthetical(text: &str, previous: ParagraphRole) -> bool {
        previous == ParagraphRole::CharacterCue && text.starts_with('(')
    }

    /// Dialogue is a pure look-back rule: anything that is not a cue or a
    /// parenthetical but follows one (or follows more dialogue).
    fn is_dialogue(&self, text: &str, previous: ParagraphRole) -> bool {
        !self.is_character_cue(text)
            && !Self::is_parenthetical(text, previous)
            && matches!(
                previous,
                ParagraphRole::CharacterCue | ParagraphRole::Parenthetical | ParagraphRole::Dialogue
            )
    }

    fn is_action(&self, text: &str) -> bool {
        !self.is_character_cue(text) && !text.starts_with('(')
    }
}

/// Whether a text is entirely upper-case: it contains at least one cased
/// character and no lower-case characters.
pub fn is_upper_text(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Whether a whitespace-delimited token continues a character-cue name.
///
/// Mirrors the upper-case test above; a single upper-case character counts,
/// so a lone capitalized initial inside a cue name does not break it.
pub fn is_upper_token(token: &str) -> bool {
    is_upper_text(token)
}

/// Cue first-token test: more than one character, every character an
/// upper-case alphanumeric. Digits fail the upper-case half, so tokens with
/// digits in them are never cues.
fn is_cue_token(token: &str) -> bool {
    let mut count = 0;
    for c in token.chars() {
        if !(c.is_alphanumeric() && c.is_uppercase()) {
            return false;
        }
        count += 1;
    }
    count > 1
}
