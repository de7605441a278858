/*!
 * Error types for the screenright application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the document container
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file is not a readable .docx package
    #[error("not a valid .docx package: {0}")]
    Package(#[from] zip::result::ZipError),

    /// The package is missing its main document part
    #[error("package has no word/document.xml part")]
    MissingDocumentPart,

    /// The document XML could not be parsed
    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute inside the document XML could not be parsed
    #[error("malformed document XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Error from an underlying file operation
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The input file does not exist; checked before the container is opened
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Error from the document container
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Error while loading or saving formatting parameters
    #[error("parameter error: {0}")]
    Parameter(String),

    /// Error from a file operation
    #[error("file error: {0}")]
    File(String),

    /// Any other error
    #[error("unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
