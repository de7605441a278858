/*!
 * The stateful reformatting pass.
 *
 * Walks the document's paragraph sequence exactly once, left to right,
 * carrying the role of the previously finalized paragraph. Each paragraph is
 * whitespace-normalized, restyled globally (font, spacing, alignment),
 * classified, and indented for its role. Character cues with trailing
 * dialogue on the same line are split in two, and redundant blank paragraphs
 * are collapsed to one.
 *
 * The walk must stay sequential: role assignment is a strict left-to-right
 * fold with one-paragraph memory. Deletion is deferred until the walk has
 * finished so the in-progress iteration is never invalidated.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::StyleParameters;
use crate::classifier::{Classifier, ParagraphRole, is_upper_text, is_upper_token};
use crate::docx::{Alignment, ScriptDocument};

// @const: Internal whitespace run regex
static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace run regex")
});

/// Collapse internal whitespace runs to single spaces and trim the ends.
///
/// Classification happens on normalized text only; this runs before every
/// `classify` call in the pass.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// Reformat every paragraph from `start_index` onward, in place.
///
/// Paragraphs before `start_index` (typically front matter ahead of the
/// configured start keyword) pass through untouched. The pass never fails:
/// unknown-role paragraphs are styled globally but keep their indents, and
/// classification ambiguity is resolved by rule precedence, never raised.
pub fn reformat(doc: &mut ScriptDocument, start_index: usize, params: &StyleParameters) {
    let classifier = Classifier::new(params.scene_marker.clone());

    let mut previous = ParagraphRole::Unknown;
    let mut last_was_empty = false;
    let mut marked_for_deletion: Vec<usize> = Vec::new();

    let mut index = start_index;
    while index < doc.len() {
        let len_before = doc.len();
        previous = style_paragraph(doc, index, params, &classifier, previous);
        let inserted = doc.len() - len_before;

        // Blank-paragraph collapsing. Only the second and later empties of a
        // run are marked; the first survives as the separator.
        if doc.paragraph(index).text().is_empty() {
            if last_was_empty {
                marked_for_deletion.push(index);
            }
            last_was_empty = true;
        } else {
            last_was_empty = false;
        }

        // Paragraphs inserted by a cue split were already styled recursively.
        index += 1 + inserted;
    }

    // Deferred deletion: mutating the sequence mid-walk would corrupt the
    // iteration, so marked paragraphs are removed only now.
    doc.remove_paragraphs(&marked_for_deletion);
}

/// Style a single paragraph and return the role of the most recently
/// finalized paragraph (the split continuation when a cue split happened,
/// otherwise the paragraph's own role).
fn style_paragraph(
    doc: &mut ScriptDocument,
    index: usize,
    params: &StyleParameters,
    classifier: &Classifier,
    previous: ParagraphRole,
) -> ParagraphRole {
    let cleaned = normalize_whitespace(&doc.paragraph(index).text());

    {
        let paragraph = doc.paragraph_mut(index);
        paragraph.set_text(&cleaned);
        paragraph.apply_font(&params.font_name, params.font_size_pt);

        // Global layout applied to every processed paragraph regardless of
        // role; keeps the line grid at the configured lines-per-page.
        let format = paragraph.format_mut();
        format.line_spacing_pt = Some(params.line_spacing_pt);
        format.space_before_pt = Some(0.0);
        format.space_after_pt = Some(0.0);
        format.first_line_indent_in = None;
        format.alignment = Some(Alignment::Left);
        format.right_indent_in = Some(0.0);
    }

    let role = classifier.classify(&cleaned, previous);

    // Empty and Unknown get no indent override: Unknown stays visibly
    // unstyled so malformed input can be spotted in the output.
    if let Some(indent) = params.indent_for(role) {
        let format = doc.paragraph_mut(index).format_mut();
        format.left_indent_in = Some(indent.left_in);
        format.right_indent_in = Some(indent.right_in);
    }

    match role {
        ParagraphRole::SceneHeading => {
            doc.paragraph_mut(index).to_upper_case();
        }
        ParagraphRole::CharacterCue => {
            if !is_upper_text(&cleaned) {
                if let Some((name, remainder)) = split_cue_text(&cleaned) {
                    doc.paragraph_mut(index).set_text(&name);
                    doc.insert_after(index, &remainder);
                    // The continuation is styled through the same logic with
                    // the cue as its predecessor, so it lands on
                    // parenthetical or dialogue.
                    return style_paragraph(doc, index + 1, params, classifier, ParagraphRole::CharacterCue);
                }
            }
        }
        _ => {}
    }

    role
}

/// Split mixed-case cue text into the character name and the trailing
/// remainder. The name ends at the first token that is not upper-case; a
/// single-character upper-case token is a continuation of the name, not a
/// break, so cue names containing a lone capitalized initial stay intact.
/// Returns `None` when no split point exists.
fn split_cue_text(text: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let split_index = tokens.iter().position(|token| !is_upper_token(token))?;
    if split_index == 0 {
        return None;
    }

    let name = tokens[..split_index].join(" ");
    let remainder = tokens[split_index..].join(" ");
    Some((name, remainder))
}
