//! Collaborator-level failures. Fatal for the document being processed:
//! a statement that cannot be opened or read produces no partial output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("could not load the pdfium library: {0}")]
    Bind(String),

    #[error("cannot open PDF: {0}")]
    Open(String),

    #[error("PDF is password-protected and the password was wrong or missing")]
    Decryption,

    #[error("text extraction failed on page {page}: {message}")]
    PageExtraction { page: usize, message: String },
}
