mod helpers;

use race_handicapper::application::ports::{
    DocumentLoadError, DocumentLoader, DocumentWriteError, PageTextError,
};
use race_handicapper::infrastructure::pdf::PdfDocumentLoader;

#[test]
fn given_three_page_pdf_when_loading_then_page_count_and_text_match() {
    let data = helpers::pdf_with_pages(&["Race 1 Alpha", "Race 1 Beta", "Race 2 Gamma"]);

    let document = PdfDocumentLoader::new().load(&data).unwrap();

    assert_eq!(document.page_count(), 3);
    assert!(document.page_text(0).unwrap().contains("Race 1 Alpha"));
    assert!(document.page_text(2).unwrap().contains("Race 2 Gamma"));
    assert_eq!(document.extension(), "pdf");
}

#[test]
fn given_garbage_bytes_when_loading_then_returns_malformed() {
    let result = PdfDocumentLoader::new().load(b"definitely not a pdf");

    assert!(matches!(result, Err(DocumentLoadError::Malformed(_))));
}

#[test]
fn given_index_past_end_when_reading_text_then_returns_out_of_range() {
    let data = helpers::pdf_with_pages(&["only page"]);
    let document = PdfDocumentLoader::new().load(&data).unwrap();

    let result = document.page_text(5);

    assert!(matches!(result, Err(PageTextError::OutOfRange(5))));
}

#[test]
fn given_page_subset_when_writing_then_new_pdf_keeps_only_those_pages_in_order() {
    let data = helpers::pdf_with_pages(&["first", "second", "third", "fourth"]);
    let loader = PdfDocumentLoader::new();
    let document = loader.load(&data).unwrap();

    let subset = document.write_pages(&[1, 3]).unwrap();
    let reloaded = loader.load(&subset).unwrap();

    assert_eq!(reloaded.page_count(), 2);
    assert!(reloaded.page_text(0).unwrap().contains("second"));
    assert!(reloaded.page_text(1).unwrap().contains("fourth"));
    assert_eq!(document.page_count(), 4);
}

#[test]
fn given_out_of_range_subset_when_writing_then_returns_error() {
    let data = helpers::pdf_with_pages(&["a", "b"]);
    let document = PdfDocumentLoader::new().load(&data).unwrap();

    let result = document.write_pages(&[0, 2]);

    assert!(matches!(result, Err(DocumentWriteError::OutOfRange(2))));
}
