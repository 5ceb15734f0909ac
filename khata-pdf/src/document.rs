//! pdfium-backed document access.

use std::path::Path;

use khata_core::CropBox;
use pdfium_render::prelude::*;

use crate::error::PdfError;

/// Process-wide pdfium binding. Create once, then open documents from it.
pub struct Renderer {
    pdfium: Pdfium,
}

impl Renderer {
    /// Bind pdfium from the working directory first, then the system
    /// library paths.
    pub fn new() -> Result<Self, PdfError> {
        let bindings =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| PdfError::Bind(format!("{e:?}")))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Open (and if needed decrypt) a statement PDF.
    pub fn open<'a>(
        &'a self,
        path: &Path,
        password: Option<&'a str>,
    ) -> Result<Document<'a>, PdfError> {
        match self.pdfium.load_pdf_from_file(path, password) {
            Ok(inner) => Ok(Document { inner }),
            Err(PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError)) => {
                Err(PdfError::Decryption)
            }
            Err(e) => Err(PdfError::Open(format!("{e:?}"))),
        }
    }
}

/// An open statement document.
pub struct Document<'a> {
    inner: PdfDocument<'a>,
}

impl Document<'_> {
    pub fn page_count(&self) -> usize {
        self.inner.pages().len() as usize
    }

    /// Full text of one page (0-based), used for issuer detection.
    pub fn page_text(&self, index: usize) -> Result<String, PdfError> {
        let pages = self.inner.pages();
        let page = pages
            .get(index as u16)
            .map_err(|e| extraction_error(index, &e))?;
        let text = page.text().map_err(|e| extraction_error(index, &e))?;
        Ok(text.all())
    }

    /// Text inside `crop` on one page. The crop box uses top-left-origin
    /// page coordinates (as in the profile catalog) and is converted to
    /// pdfium's bottom-left-origin points here.
    pub fn region_text(&self, index: usize, crop: CropBox) -> Result<String, PdfError> {
        let pages = self.inner.pages();
        let page = pages
            .get(index as u16)
            .map_err(|e| extraction_error(index, &e))?;
        let rect = region_to_rect(crop, page.height().value);
        let text = page.text().map_err(|e| extraction_error(index, &e))?;
        Ok(text.inside_rect(rect))
    }

    /// Page size in points: (width, height).
    pub fn page_size(&self, index: usize) -> Result<(f32, f32), PdfError> {
        let pages = self.inner.pages();
        let page = pages
            .get(index as u16)
            .map_err(|e| extraction_error(index, &e))?;
        Ok((page.width().value, page.height().value))
    }
}

fn extraction_error(page: usize, e: &PdfiumError) -> PdfError {
    PdfError::PageExtraction {
        page,
        message: format!("{e:?}"),
    }
}

fn region_to_rect(crop: CropBox, page_height: f32) -> PdfRect {
    PdfRect::new(
        PdfPoints::new(page_height - crop.y1),
        PdfPoints::new(crop.x0),
        PdfPoints::new(page_height - crop.y0),
        PdfPoints::new(crop.x1),
    )
}
