use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FolioError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FolioError::render("x").to_string().contains("render error:"));
    assert!(
        FolioError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn document_error_names_document_and_line() {
    let err = FolioError::document("posts/a.md", Some(4), "bad line");
    assert_eq!(
        err.to_string(),
        "document error: posts/a.md (line 4): bad line"
    );

    let err = FolioError::document("posts/b.md", None, "missing front matter");
    assert_eq!(
        err.to_string(),
        "document error: posts/b.md: missing front matter"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FolioError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
