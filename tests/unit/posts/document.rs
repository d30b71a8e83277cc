use super::*;

const ZERO_TRUST: &str = "---\ntitle: \"Zero Trust\"\ncategory: Security\ntags: [security, zta]\nauthor: Ada\ndate: 2024-01-05\nduration: 4 min\n---\n# Intro\nZero trust means **never trust**, always verify.\n";

fn with_front(front: &str) -> String {
    format!("---\n{front}\n---\nBody text.\n")
}

const COMPLETE: &str = "title: T\ncategory: C\ntags:\n  - a\nauthor: A\ndate: 2024-01-05\nduration: 1 min";

#[test]
fn zero_trust_document_ingests() {
    let entry = parse_post("!!.md", ZERO_TRUST).unwrap();
    let post = &entry.post;
    assert_eq!(post.title, "Zero Trust");
    assert_eq!(post.slug, "zero-trust");
    assert_eq!(post.tags, vec!["security", "zta"]);
    assert_eq!(post.date, "2024-01-05");
    assert_eq!(
        post.excerpt,
        "Intro Zero trust means never trust, always verify."
    );
    assert_eq!(
        post.content,
        "# Intro\nZero trust means **never trust**, always verify."
    );
    assert_eq!(entry.sort_key, Some(1_704_412_800_000));
    assert_eq!(entry.source, "!!.md");
}

#[test]
fn filename_fallback_beats_title() {
    let entry = parse_post("posts/2024-01-05-zt-intro.md", ZERO_TRUST).unwrap();
    assert_eq!(entry.post.slug, "zt-intro");
}

#[test]
fn explicit_slug_and_excerpt_win() {
    let raw = with_front(&format!("{COMPLETE}\nslug: Custom Slug\nexcerpt: '  Hand written.  '"));
    let post = parse_post("post.md", &raw).unwrap().post;
    assert_eq!(post.slug, "custom-slug");
    assert_eq!(post.excerpt, "Hand written.");
}

#[test]
fn scalars_are_trimmed() {
    let raw = with_front("title: '  Spaced  '\ncategory: C\ntags: [a]\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    let post = parse_post("post.md", &raw).unwrap().post;
    assert_eq!(post.title, "Spaced");
}

#[test]
fn unparseable_date_keeps_text_without_sort_key() {
    let raw = with_front("title: T\ncategory: C\ntags: [a]\nauthor: A\ndate: someday\nduration: 1 min");
    let entry = parse_post("post.md", &raw).unwrap();
    assert_eq!(entry.post.date, "someday");
    assert_eq!(entry.sort_key, None);
}

#[test]
fn missing_required_scalar_names_key_and_document() {
    for key in ["title", "category", "author", "date", "duration"] {
        let front: String = COMPLETE
            .lines()
            .filter(|l| !l.starts_with(&format!("{key}:")))
            .collect::<Vec<_>>()
            .join("\n");
        let err = parse_post("posts/broken.md", &with_front(&front)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("posts/broken.md"), "{msg}");
        assert!(msg.contains(&format!("`{key}`")), "{msg}");
    }
}

#[test]
fn blank_scalar_is_rejected() {
    let raw = with_front("title: '   '\ncategory: C\ntags: [a]\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    let err = parse_post("post.md", &raw).unwrap_err();
    assert!(err.to_string().contains("`title`"));
}

#[test]
fn scalar_where_list_expected_is_rejected() {
    let raw = with_front("title: T\ncategory: C\ntags: rust\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    let err = parse_post("post.md", &raw).unwrap_err();
    assert!(err.to_string().contains("must be a list"));
}

#[test]
fn list_where_scalar_expected_is_rejected() {
    let raw = with_front("title:\n  - a\n  - b\ncategory: C\ntags: [a]\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    let err = parse_post("post.md", &raw).unwrap_err();
    assert!(err.to_string().contains("found a list"));
}

#[test]
fn missing_or_empty_tags_fail() {
    let missing = with_front("title: T\ncategory: C\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    assert!(parse_post("post.md", &missing).unwrap_err().to_string().contains("missing"));

    let empty_flow = with_front("title: T\ncategory: C\ntags: []\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    assert!(
        parse_post("post.md", &empty_flow)
            .unwrap_err()
            .to_string()
            .contains("at least one tag")
    );

    let empty_block = with_front("title: T\ncategory: C\ntags:\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    assert!(parse_post("post.md", &empty_block).is_err());
}

#[test]
fn blank_tag_entry_fails() {
    let raw = with_front("title: T\ncategory: C\ntags:\n  - a\n  - ''\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    let err = parse_post("post.md", &raw).unwrap_err();
    assert!(err.to_string().contains("tags[1]"));
}

#[test]
fn empty_body_fails() {
    let raw = format!("---\n{COMPLETE}\n---\n   \n");
    let err = parse_post("post.md", &raw).unwrap_err();
    assert!(err.to_string().contains("body is empty"));
}

#[test]
fn missing_block_fails() {
    assert!(parse_post("post.md", "title: T\n\nBody").is_err());
}

#[test]
fn bracketed_title_is_a_plain_string() {
    let raw = with_front("title: [WIP] Notes\ncategory: C\ntags: [a]\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    let post = parse_post("!!.md", &raw).unwrap().post;
    assert_eq!(post.title, "[WIP] Notes");
    assert_eq!(post.slug, "wip-notes");

    let raw = with_front("title: [WIP]\ncategory: C\ntags: [a]\nauthor: A\ndate: 2024-01-05\nduration: 1 min");
    assert_eq!(parse_post("post.md", &raw).unwrap().post.title, "[WIP]");
}

#[test]
fn bracketed_explicit_slug_and_excerpt_are_used() {
    let raw = with_front(&format!("{COMPLETE}\nslug: [draft-2]\nexcerpt: [Preview] Short summary."));
    let post = parse_post("post.md", &raw).unwrap().post;
    assert_eq!(post.slug, "draft-2");
    assert_eq!(post.excerpt, "[Preview] Short summary.");
}
