//! Local CV loading, dispatched on file suffix.

use std::fs;
use std::path::Path;

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use tracing::{info, warn};

use crate::errors::MatcherError;

/// Reads a CV from disk: `.pdf`, `.docx`/`.doc`, or `.txt`.
///
/// A decode failure inside a supported format is logged and treated as empty
/// text, which then surfaces as `EmptyDocument`.
pub fn load_cv(path: &Path) -> Result<String, MatcherError> {
    let shown = path.display().to_string();
    if !path.exists() {
        return Err(MatcherError::NotFound(shown));
    }

    let suffix = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let text = match suffix.as_str() {
        "pdf" => decode_pdf_file(path),
        "docx" | "doc" => decode_docx_file(path),
        "txt" => decode_text_file(path),
        _ => return Err(MatcherError::UnsupportedFormat(format!(".{suffix}"))),
    };

    if text.trim().is_empty() {
        return Err(MatcherError::EmptyDocument(shown));
    }

    info!(path = %shown, chars = text.chars().count(), "Extracted CV text");
    Ok(text)
}

fn decode_pdf_file(path: &Path) -> String {
    // pdf-extract can panic on malformed files.
    match std::panic::catch_unwind(|| pdf_extract::extract_text(path)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(path = %path.display(), error = %e, "Error reading PDF file");
            String::new()
        }
        Err(_) => {
            warn!(path = %path.display(), "PDF parser panicked");
            String::new()
        }
    }
}

fn decode_text_file(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Error reading text file");
            String::new()
        }
    }
}

fn decode_docx_file(path: &Path) -> String {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Error reading DOCX file");
            return String::new();
        }
    };

    match read_docx(&bytes) {
        Ok(docx) => docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Error parsing DOCX file");
            String::new()
        }
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut buffer = String::new();
    for child in &paragraph.children {
        append_paragraph_child(child, &mut buffer);
    }
    buffer
}

fn append_paragraph_child(child: &ParagraphChild, buffer: &mut String) {
    match child {
        ParagraphChild::Run(run) => append_run(run, buffer),
        ParagraphChild::Hyperlink(link) => {
            for inner in &link.children {
                append_paragraph_child(inner, buffer);
            }
        }
        _ => {}
    }
}

fn append_run(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Break(_) => buffer.push('\n'),
            RunChild::Tab(_) => buffer.push('\t'),
            _ => {}
        }
    }
}
