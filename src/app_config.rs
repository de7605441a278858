use anyhow::{Context, Result};
use log::warn;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::classifier::{DEFAULT_SCENE_MARKER, ParagraphRole};
use crate::errors::AppError;

/// Style parameter module.
/// This module handles loading, layering and saving the formatting
/// parameters: hardcoded defaults, overlaid by the user parameter file from
/// the platform config directory, overlaid by an explicit parameter file
/// when one is given on the command line.
///
/// The on-disk format is a flat text file of `Key: Value` lines. Lines
/// without a `": "` separator are ignored. Malformed numeric values never
/// abort a run; each key independently falls back to its default.

/// Application directory name under the platform config dir
const APP_DIR_NAME: &str = "ScreenRight";

/// Parameter file name inside the application config directory
const PARAMS_FILE_NAME: &str = "parameters.txt";

/// Page margins in inches; indents in the parameter file are measured from
/// the page edge and converted to margin-relative values at application time
pub const PAGE_MARGIN_LEFT_IN: f64 = 1.5;
pub const PAGE_MARGIN_RIGHT_IN: f64 = 1.0;
pub const PAGE_MARGIN_TOP_IN: f64 = 1.0;
pub const PAGE_MARGIN_BOTTOM_IN: f64 = 1.0;

/// Left/right indent pair in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndentPair {
    /// Left indent in inches
    pub left_in: f64,
    /// Right indent in inches
    pub right_in: f64,
}

/// Resolved formatting parameters consumed by the reformatting pass.
///
/// Indent values are stored as configured (from the page edge);
/// `indent_for` converts them to margin-relative values.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleParameters {
    /// Substring locating the first paragraph to format
    pub start_keyword: String,

    /// Literal token identifying scene headings
    pub scene_marker: String,

    /// Font applied to every processed run
    pub font_name: String,

    /// Font size in points
    pub font_size_pt: f32,

    /// Exact line spacing in points (22pt keeps 55 lines per page)
    pub line_spacing_pt: f32,

    /// Character cue indents
    pub character: IndentPair,

    /// Action indents
    pub action: IndentPair,

    /// Scene heading indents
    pub scene: IndentPair,

    /// Dialogue indents
    pub dialogue: IndentPair,

    /// Parenthetical indents
    pub parenthetical: IndentPair,
}

impl Default for StyleParameters {
    fn default() -> Self {
        StyleParameters {
            start_keyword: "OBRAZ 1".to_string(),
            scene_marker: DEFAULT_SCENE_MARKER.to_string(),
            font_name: "Courier".to_string(),
            font_size_pt: 12.0,
            line_spacing_pt: 22.0,
            character: IndentPair { left_in: 4.2, right_in: 1.0 },
            action: IndentPair { left_in: 1.5, right_in: 1.0 },
            scene: IndentPair { left_in: 1.5, right_in: 1.0 },
            dialogue: IndentPair { left_in: 2.9, right_in: 2.3 },
            parenthetical: IndentPair { left_in: 3.6, right_in: 2.9 },
        }
    }
}

impl StyleParameters {
    /// Load parameters with the standard layering.
    ///
    /// With an explicit path the file must exist and is applied on top of
    /// the defaults. Without one, the user parameter file is applied when
    /// present and silently skipped when not.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(AppError::Parameter(format!(
                    "parameter file not found: {}",
                    path.display()
                )));
            }
            let text = std::fs::read_to_string(path).map_err(|e| {
                AppError::Parameter(format!("failed to read {}: {}", path.display(), e))
            })?;
            return Ok(Self::from_entries(&parse_parameter_text(&text)));
        }

        let mut params = Self::default();
        if let Some(user_path) = Self::user_params_path() {
            if user_path.exists() {
                let text = std::fs::read_to_string(&user_path).map_err(|e| {
                    AppError::Parameter(format!("failed to read {}: {}", user_path.display(), e))
                })?;
                params = Self::from_entries(&parse_parameter_text(&text));
            }
        }
        Ok(params)
    }

    /// Build parameters from parsed `Key: Value` entries, starting from the
    /// defaults. String keys are taken verbatim; numeric keys are coerced
    /// and fall back per key on malformed values.
    pub fn from_entries(entries: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let string_param = |key: &str, default: &str| -> String {
            entries.get(key).cloned().unwrap_or_else(|| default.to_string())
        };

        StyleParameters {
            start_keyword: string_param("Start Formatting From", &defaults.start_keyword),
            scene_marker: string_param("Scene Marker", &defaults.scene_marker),
            font_name: string_param("Font", &defaults.font_name),
            font_size_pt: numeric_param(entries, "Font Size", defaults.font_size_pt as f64) as f32,
            line_spacing_pt: numeric_param(entries, "Line Spacing", defaults.line_spacing_pt as f64)
                as f32,
            character: IndentPair {
                left_in: numeric_param(entries, "Character Indent Left", defaults.character.left_in),
                right_in: numeric_param(entries, "Character Indent Right", defaults.character.right_in),
            },
            action: IndentPair {
                left_in: numeric_param(entries, "Action Indent Left", defaults.action.left_in),
                right_in: numeric_param(entries, "Action Indent Right", defaults.action.right_in),
            },
            scene: IndentPair {
                left_in: numeric_param(entries, "Scene Indent Left", defaults.scene.left_in),
                right_in: numeric_param(entries, "Scene Indent Right", defaults.scene.right_in),
            },
            dialogue: IndentPair {
                left_in: numeric_param(entries, "Dialogue Indent Left", defaults.dialogue.left_in),
                right_in: numeric_param(entries, "Dialogue Indent Right", defaults.dialogue.right_in),
            },
            parenthetical: IndentPair {
                left_in: numeric_param(entries, "Parenthetical Indent Left", defaults.parenthetical.left_in),
                right_in: numeric_param(entries, "Parenthetical Indent Right", defaults.parenthetical.right_in),
            },
        }
    }

    /// Margin-relative indent pair for a role; `None` for roles without an
    /// indent override (empty and unknown paragraphs keep what they have).
    pub fn indent_for(&self, role: ParagraphRole) -> Option<IndentPair> {
        let configured = match role {
            ParagraphRole::CharacterCue => self.character,
            ParagraphRole::Action => self.action,
            ParagraphRole::SceneHeading => self.scene,
            ParagraphRole::Dialogue => self.dialogue,
            ParagraphRole::Parenthetical => self.parenthetical,
            ParagraphRole::Empty | ParagraphRole::Unknown => return None,
        };
        Some(IndentPair {
            left_in: configured.left_in - PAGE_MARGIN_LEFT_IN,
            right_in: configured.right_in - PAGE_MARGIN_RIGHT_IN,
        })
    }

    /// Platform-specific path of the user parameter file, e.g.
    /// `~/.config/ScreenRight/parameters.txt` on Linux
    pub fn user_params_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(PARAMS_FILE_NAME))
    }

    /// Serialize to the on-disk `Key: Value` format
    pub fn to_parameter_text(&self) -> String {
        let mut text = String::new();
        let mut push = |key: &str, value: String| {
            text.push_str(key);
            text.push_str(": ");
            text.push_str(&value);
            text.push('\n');
        };

        push("Start Formatting From", self.start_keyword.clone());
        push("Scene Marker", self.scene_marker.clone());
        push("Font", self.font_name.clone());
        push("Font Size", format_number(self.font_size_pt as f64));
        push("Line Spacing", format_number(self.line_spacing_pt as f64));
        push("Character Indent Left", format_number(self.character.left_in));
        push("Character Indent Right", format_number(self.character.right_in));
        push("Action Indent Left", format_number(self.action.left_in));
        push("Action Indent Right", format_number(self.action.right_in));
        push("Scene Indent Left", format_number(self.scene.left_in));
        push("Scene Indent Right", format_number(self.scene.right_in));
        push("Dialogue Indent Left", format_number(self.dialogue.left_in));
        push("Dialogue Indent Right", format_number(self.dialogue.right_in));
        push("Parenthetical Indent Left", format_number(self.parenthetical.left_in));
        push("Parenthetical Indent Right", format_number(self.parenthetical.right_in));
        text
    }

    /// Write the parameters to the user config location, creating the
    /// directory if needed. Returns the path written.
    pub fn save_user_parameters(&self) -> Result<PathBuf> {
        let path = Self::user_params_path()
            .context("could not resolve the platform configuration directory")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&path, self.to_parameter_text())
            .with_context(|| format!("failed to write parameter file: {}", path.display()))?;
        Ok(path)
    }
}

/// Parse `Key: Value` lines into a map. Lines without the `": "` separator
/// carry no parameter and are skipped.
pub fn parse_parameter_text(text: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    for line in text.lines() {
        if let Some((key, value)) = line.trim().split_once(": ") {
            entries.insert(key.to_string(), value.to_string());
        }
    }
    entries
}

/// Numeric coercion with per-key fallback; malformed values are logged and
/// replaced by the default rather than aborting the run.
fn numeric_param(entries: &HashMap<String, String>, key: &str, default: f64) -> f64 {
    match entries.get(key) {
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Malformed value for '{}': '{}', using default {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}

/// Format a number the way the original parameter files do: integers
/// without a decimal point, fractions as written.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
