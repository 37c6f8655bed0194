//! `remitex-extract` — upload spooling and PDF text extraction.
//!
//! An upload lives on disk only for the duration of one request: the spool
//! module writes it under a collision-free name and removes it on drop, and
//! the pdf module cracks it open into the ordered plain text the extraction
//! prompt is built from.

pub mod pdf;
pub mod spool;

pub use pdf::{extract_text, is_pdf, ExtractedDocument};
pub use spool::SpooledUpload;
