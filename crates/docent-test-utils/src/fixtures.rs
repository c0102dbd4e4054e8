// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Real PDF files for exercising the `pdf-extract` path.

/// A two-page PDF with a Helvetica text layer, one sentence per page.
pub const TWO_PAGE_PDF: &[u8] = include_bytes!("../fixtures/two_pages.pdf");

/// The text drawn on each page of [`TWO_PAGE_PDF`], in page order.
pub const TWO_PAGE_PDF_TEXT: [&str; 2] = [
    "Refunds are accepted within thirty days of purchase.",
    "Orders ship within two business days.",
];
