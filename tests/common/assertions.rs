// ============================================================================
// Fluent Assertion Macros
// ============================================================================

/// Assert that some page of the PDF shows exactly this string
#[macro_export]
macro_rules! assert_pdf_shows {
    ($pdf:expr, $text:expr) => {
        let strings = $pdf.all_strings();
        assert!(
            strings.iter().any(|s| s == $text),
            "PDF should show '{}', strings were:\n{:?}",
            $text,
            strings
        );
    };
}

/// Assert that no string in the PDF contains the fragment
#[macro_export]
macro_rules! assert_pdf_lacks {
    ($pdf:expr, $text:expr) => {
        let strings = $pdf.all_strings();
        assert!(
            !strings.iter().any(|s| s.contains($text)),
            "PDF should NOT contain '{}', strings were:\n{:?}",
            $text,
            strings
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert that a DOCX body run carries exactly this text
#[macro_export]
macro_rules! assert_docx_shows {
    ($docx:expr, $text:expr) => {
        let texts = $docx.texts();
        assert!(
            texts.iter().any(|t| t == $text),
            "DOCX should show '{}', runs were:\n{:?}",
            $text,
            texts
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}
