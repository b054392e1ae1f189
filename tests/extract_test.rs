//! Integration tests for local and remote extraction.

mod common;

use common::pdf::pdf_with_pages;
use common::server::{unreachable_url, CannedServer};
use pdfjson::{Error, Extractor, LocalExtractor, PendingFile, RemoteExtractor};

#[test]
fn test_single_page_spacing_is_normalized() {
    let data = pdf_with_pages(&["Hello   world"]);
    let doc = LocalExtractor::new().extract_bytes("hello.pdf", &data).unwrap();

    assert_eq!(doc.filename(), "hello.pdf");
    assert_eq!(doc.total_pages(), 1);
    let page = &doc.pages()[0];
    assert_eq!(page.page_number(), 1);
    assert_eq!(page.content(), "Hello world");
    assert_eq!(page.word_count(), 2);
    assert_eq!(page.character_count(), 11);
}

#[test]
fn test_multi_page_invariants() {
    let data = pdf_with_pages(&["First page", "Second  page here", "   ", "Last"]);
    let doc = pdfjson::extract_bytes("multi.pdf", &data).unwrap();

    assert_eq!(doc.total_pages(), doc.pages().len());
    assert_eq!(doc.total_pages(), 4);
    for (i, page) in doc.pages().iter().enumerate() {
        assert_eq!(page.page_number() as usize, i + 1);
        assert_eq!(page.character_count(), page.content().chars().count());
        assert_eq!(page.word_count(), page.content().split_whitespace().count());
    }
    assert_eq!(doc.pages()[1].content(), "Second page here");
    assert!(doc.pages()[2].is_empty());
    assert_eq!(doc.pages()[3].content(), "Last");
}

#[test]
fn test_extract_file_uses_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("On Disk.PDF");
    std::fs::write(&path, pdf_with_pages(&["text"])).unwrap();

    let doc = pdfjson::extract_file(&path).unwrap();
    assert_eq!(doc.filename(), "On Disk.PDF");

    let json = pdfjson::to_json(&path).unwrap();
    assert!(json.contains("\"content\": \"text\""));
}

#[tokio::test]
async fn test_local_extractor_trait() {
    let file = PendingFile::new("a.pdf", pdf_with_pages(&["alpha beta"]));
    let extractor = LocalExtractor::new();
    assert!(extractor.is_available().await);
    let doc = extractor.extract(&file).await.unwrap();
    assert_eq!(doc.pages()[0].word_count(), 2);
}

#[tokio::test]
async fn test_remote_upload_sends_one_file_part() {
    let server = CannedServer::start(|req| {
        if req.method == "HEAD" {
            return (200, String::new());
        }
        (
            200,
            r#"[{"filename":"up.pdf","success":true,"data":{"filename":"up.pdf","total_pages":1,
                "pages":[{"page_number":1,"content":"from server","word_count":2,"character_count":11}]}}]"#
                .to_string(),
        )
    })
    .await;

    let extractor = RemoteExtractor::new(server.url.clone(), "pdfjson-test").unwrap();
    assert!(extractor.is_available().await);

    let file = PendingFile::new("up.pdf", b"%PDF-1.4 fake".to_vec());
    let doc = extractor.extract(&file).await.unwrap();
    assert_eq!(doc.pages()[0].content(), "from server");

    let posts = server.requests_with_method("POST");
    assert_eq!(posts.len(), 1);
    assert!(posts[0]
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    let body = posts[0].body_text();
    assert!(body.contains(r#"name="files[]""#));
    assert!(body.contains(r#"filename="up.pdf""#));
    assert!(body.contains("%PDF-1.4 fake"));
    assert_eq!(posts[0].header("user-agent"), Some("pdfjson-test"));
}

#[tokio::test]
async fn test_remote_error_status() {
    let server = CannedServer::start(|_| (500, "oops".to_string())).await;
    let extractor = RemoteExtractor::new(server.url.clone(), "pdfjson-test").unwrap();

    // Any answer counts as reachable, even an error status.
    assert!(extractor.probe().await.is_ok());

    let file = PendingFile::new("a.pdf", b"%PDF-1.4".to_vec());
    let err = extractor.extract(&file).await.unwrap_err();
    assert!(matches!(err, Error::Remote(ref m) if m.contains("500")));
}

#[tokio::test]
async fn test_remote_unreachable() {
    let extractor = RemoteExtractor::new(unreachable_url(), "pdfjson-test").unwrap();
    assert!(!extractor.is_available().await);
}
