//! khata-pdf: PDF text access for the extraction pipeline (pdfium-backed).
//!
//! This is the collaborator side of the system: decryption, whole-page text
//! (for issuer detection) and cropped-region text (for the matcher). All the
//! extraction intelligence lives in khata-core; this crate only moves text
//! out of the PDF.

pub mod document;
pub mod error;

pub use document::{Document, Renderer};
pub use error::PdfError;
