/*!
 * End-to-end formatting workflow tests
 */

use screenright::app_config::StyleParameters;
use screenright::app_controller::Controller;
use screenright::docx::ScriptDocument;
use screenright::errors::AppError;
use screenright::file_utils::FileManager;

use crate::common;

/// Formatting a sample screenplay applies the whole pipeline: front matter
/// untouched, cue split, blanks collapsed, output saved with page numbers
#[test]
fn test_run_withSampleScreenplay_shouldProduceFormattedDocument() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_sample_screenplay(&dir, "script.docx").unwrap();
    let output = dir.join("script_out.docx");

    let controller = Controller::with_params(StyleParameters::default());
    controller.run(&input, &output).unwrap();

    let doc = ScriptDocument::open(&output).unwrap();
    let texts = common::paragraph_texts(&doc);

    // Front matter before the start keyword passes through unmodified.
    assert_eq!(texts[0], "My First Screenplay");
    assert_eq!(texts[1], "written while learning the trade");

    // The cue with inline dialogue was split in two.
    assert!(texts.contains(&"JOHN".to_string()));
    assert!(texts.contains(&"Hello there".to_string()));

    // The triple blank after the scene heading collapsed to one.
    let heading_index = texts
        .iter()
        .position(|t| t == "OBRAZ 1. INT. KITCHEN - DAY")
        .unwrap();
    assert_eq!(texts[heading_index + 1], "");
    assert_ne!(texts[heading_index + 2], "");

    // Formatted paragraphs carry the configured font.
    let cue_index = texts.iter().position(|t| t == "JOHN").unwrap();
    assert_eq!(
        doc.paragraph(cue_index).runs()[0].font_name.as_deref(),
        Some("Courier")
    );
}

/// A missing input file is reported before the container is touched
#[test]
fn test_run_withMissingInput_shouldReturnFileNotFound() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = temp_dir.path().join("missing.docx");
    let output = temp_dir.path().join("missing_out.docx");

    let controller = Controller::new_for_test();
    let result = controller.run(&input, &output);

    assert!(matches!(result, Err(AppError::FileNotFound(_))));
    assert!(!output.exists());
}

/// Without the start keyword the whole document is formatted
#[test]
fn test_run_withoutStartKeyword_shouldFormatEntireDocument() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input =
        common::create_test_docx(&dir, "plain.docx", &["some    spaced   text", "MARY", "Hi."])
            .unwrap();
    let output = dir.join("plain_out.docx");

    let controller = Controller::with_params(StyleParameters::default());
    controller.run(&input, &output).unwrap();

    let doc = ScriptDocument::open(&output).unwrap();
    // Even the first paragraph was normalized, so formatting started at 0.
    assert_eq!(doc.paragraph(0).text(), "some spaced text");
}

/// Formatting an already-formatted document changes nothing further
#[test]
fn test_run_withSecondPass_shouldBeIdempotent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_sample_screenplay(&dir, "script.docx").unwrap();
    let once = dir.join("script_once.docx");
    let twice = dir.join("script_twice.docx");

    let controller = Controller::with_params(StyleParameters::default());
    controller.run(&input, &once).unwrap();
    controller.run(&once, &twice).unwrap();

    let first = ScriptDocument::open(&once).unwrap();
    let second = ScriptDocument::open(&twice).unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(
        common::paragraph_texts(&first),
        common::paragraph_texts(&second)
    );
}

/// Batch mode formats every input and keeps going past failures
#[test]
fn test_run_folder_withFailingFile_shouldContinueBatch() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();

    common::create_sample_screenplay(&dir, "one.docx").unwrap();
    common::create_sample_screenplay(&dir, "two.docx").unwrap();
    // Not a zip at all; opening this one fails.
    common::create_test_file(&dir, "broken.docx", "not a package").unwrap();

    let controller = Controller::with_params(StyleParameters::default());
    let formatted = controller.run_folder(&dir).unwrap();

    assert_eq!(formatted, 2);
    assert!(dir.join("one_out.docx").exists());
    assert!(dir.join("two_out.docx").exists());
    assert!(!dir.join("broken_out.docx").exists());
}

/// Batch outputs are not re-formatted by a second batch run
#[test]
fn test_run_folder_withPreviousOutputs_shouldSkipThem() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_screenplay(&dir, "one.docx").unwrap();

    let controller = Controller::with_params(StyleParameters::default());
    assert_eq!(controller.run_folder(&dir).unwrap(), 1);
    // The second run sees one.docx and skips one_out.docx.
    assert_eq!(controller.run_folder(&dir).unwrap(), 1);
    assert!(dir.join("one_out.docx").exists());
    assert!(!dir.join("one_out_out.docx").exists());

    let outputs = FileManager::find_docx_files(&dir).unwrap();
    assert_eq!(outputs.len(), 1);
}
