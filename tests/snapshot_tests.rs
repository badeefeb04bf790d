mod common;

use common::utils::{fixture, fixture_snapshot, snapshot_of};
use goal_resolver::snapshot::{ParseError, Snapshot, SnapshotOptions};

// =========================================================================
// Construction
// =========================================================================

#[test]
fn ids_are_dense_and_in_document_order() {
    let snapshot = fixture_snapshot("sample_page.html");

    let ids: Vec<u32> = snapshot.elements().iter().map(|el| el.id).collect();
    let expected: Vec<u32> = (1..=snapshot.len() as u32).collect();
    assert_eq!(ids, expected);

    let tags: Vec<&str> = snapshot.elements().iter().map(|el| el.tag.as_str()).collect();
    assert_eq!(
        tags,
        vec![
            "html", "head", "title", "body", "h1", "form", "label", "input", "label", "input",
            "input", "button", "a"
        ]
    );
}

#[test]
fn every_descendant_is_visited() {
    let snapshot = snapshot_of("<div><ul><li><span>deep</span></li></ul></div>");
    let tags: Vec<&str> = snapshot.elements().iter().map(|el| el.tag.as_str()).collect();
    assert_eq!(tags, vec!["div", "ul", "li", "span"]);
}

#[test]
fn implied_wrappers_are_not_indexed() {
    let snapshot = snapshot_of(r#"<input name="username"><button>Submit</button>"#);
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.by_id(1).unwrap().tag, "input");
    assert_eq!(snapshot.by_id(2).unwrap().tag, "button");
}

#[test]
fn authored_body_is_indexed_without_html_or_head() {
    let snapshot = snapshot_of("<body><p>x</p></body>");
    let tags: Vec<&str> = snapshot.elements().iter().map(|el| el.tag.as_str()).collect();
    assert_eq!(tags, vec!["body", "p"]);
}

#[test]
fn header_element_is_not_mistaken_for_head() {
    let snapshot = snapshot_of("<header><a>Home</a></header>");
    let tags: Vec<&str> = snapshot.elements().iter().map(|el| el.tag.as_str()).collect();
    assert_eq!(tags, vec!["header", "a"]);
}

#[test]
fn wrapper_tags_in_comments_do_not_shift_ids() {
    let snapshot = snapshot_of(r#"<!-- <body> --><input name="a">"#);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.by_id(1).unwrap().tag, "input");
}

#[test]
fn implied_tbody_is_not_indexed() {
    let implied = snapshot_of("<table><tr><td>1</td></tr></table>");
    let tags: Vec<&str> = implied.elements().iter().map(|el| el.tag.as_str()).collect();
    assert_eq!(tags, vec!["table", "tr", "td"]);

    let authored = snapshot_of("<table><tbody><tr><td>1</td></tr></tbody></table>");
    let tags: Vec<&str> = authored.elements().iter().map(|el| el.tag.as_str()).collect();
    assert_eq!(tags, vec!["table", "tbody", "tr", "td"]);
}

#[test]
fn tags_are_lower_cased() {
    let snapshot = snapshot_of("<DIV><BUTTON ID=\"Go\">Go</BUTTON></DIV>");
    assert_eq!(snapshot.by_id(1).unwrap().tag, "div");
    assert_eq!(snapshot.by_id(2).unwrap().tag, "button");
}

#[test]
fn text_is_whitespace_normalized() {
    let snapshot = snapshot_of("<p>  Sign\n   in\tnow  </p>");
    assert_eq!(snapshot.by_id(1).unwrap().text, "Sign in now");
}

#[test]
fn text_includes_descendants() {
    let snapshot = snapshot_of("<div>Hello <b>World</b></div>");
    assert_eq!(snapshot.by_id(1).unwrap().text, "Hello World");
    assert_eq!(snapshot.by_id(2).unwrap().text, "World");
}

#[test]
fn script_and_style_text_stays_out_of_ancestors() {
    let snapshot = snapshot_of(
        "<div><script>var loginHandler = init();</script><style>.a{color:red}</style>Login</div>",
    );
    assert_eq!(snapshot.by_id(1).unwrap().text, "Login");
    assert_eq!(snapshot.by_id(2).unwrap().tag, "script");
    assert_eq!(snapshot.by_id(2).unwrap().text, "var loginHandler = init();");
    assert_eq!(snapshot.by_id(3).unwrap().text, ".a{color:red}");
}

#[test]
fn text_is_truncated_to_200_chars() {
    let html = format!("<p>{}</p>", "a".repeat(300));
    let snapshot = snapshot_of(&html);
    assert_eq!(snapshot.by_id(1).unwrap().text.chars().count(), 200);
}

#[test]
fn text_limit_is_configurable() {
    let options = SnapshotOptions {
        text_limit: 5,
        ..SnapshotOptions::default()
    };
    let snapshot = Snapshot::build_with("<p>Submit form</p>", "test://", &options).unwrap();
    assert_eq!(snapshot.by_id(1).unwrap().text, "Submi");
}

#[test]
fn elements_without_text_have_empty_text() {
    let snapshot = snapshot_of(r#"<input name="q">"#);
    assert_eq!(snapshot.by_id(1).unwrap().text, "");
}

#[test]
fn attributes_are_kept_raw_and_selectors_projected() {
    let snapshot = snapshot_of(
        r#"<button id="go" name="go-btn" aria-label="Go now" class="  btn   primary " data-x="1">Go</button>"#,
    );
    let el = snapshot.by_id(1).unwrap();

    assert_eq!(el.attr("class"), Some("  btn   primary "));
    assert_eq!(el.attr("data-x"), Some("1"));
    assert_eq!(el.selectors.id.as_deref(), Some("go"));
    assert_eq!(el.selectors.name.as_deref(), Some("go-btn"));
    assert_eq!(el.selectors.aria_label.as_deref(), Some("Go now"));
    assert_eq!(el.selectors.class.as_deref(), Some("btn primary"));
    assert_eq!(el.selectors.css, None);
    assert!(el.visible);
}

#[test]
fn missing_attributes_yield_absent_selectors() {
    let snapshot = snapshot_of("<span>plain</span>");
    let el = snapshot.by_id(1).unwrap();
    assert!(el.attributes.is_empty());
    assert_eq!(el.selectors, Default::default());
}

#[test]
fn empty_document_is_an_empty_snapshot() {
    let snapshot = Snapshot::build("", "test://empty").unwrap();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.url(), "test://empty");
}

// =========================================================================
// Parse failures
// =========================================================================

#[test]
fn plain_prose_is_not_markup() {
    assert_eq!(
        Snapshot::build("just some words", "test://").unwrap_err(),
        ParseError::NoMarkup
    );
}

#[test]
fn nul_bytes_are_rejected() {
    assert_eq!(
        Snapshot::build("<p>a\0b</p>", "test://").unwrap_err(),
        ParseError::Binary { offset: 4 }
    );
}

#[test]
fn oversized_documents_are_rejected() {
    let options = SnapshotOptions {
        max_document_bytes: 8,
        ..SnapshotOptions::default()
    };
    assert_eq!(
        Snapshot::build_with("<p>too long</p>", "test://", &options).unwrap_err(),
        ParseError::TooLarge { len: 15, limit: 8 }
    );
}

// =========================================================================
// Lookups
// =========================================================================

#[test]
fn by_id_returns_none_outside_range() {
    let snapshot = fixture_snapshot("sample_page.html");
    assert!(snapshot.by_id(0).is_none());
    assert!(snapshot.by_id(snapshot.len() as u32 + 1).is_none());
}

#[test]
fn by_tag_ignores_case() {
    let snapshot = fixture_snapshot("sample_page.html");
    let lower: Vec<u32> = snapshot.by_tag("input").iter().map(|el| el.id).collect();
    let upper: Vec<u32> = snapshot.by_tag("INPUT").iter().map(|el| el.id).collect();

    assert_eq!(lower, vec![8, 10, 11]);
    assert_eq!(lower, upper);
    assert!(snapshot.by_tag("table").is_empty());
}

#[test]
fn visible_elements_default_to_all() {
    let snapshot = fixture_snapshot("sample_page.html");
    assert_eq!(snapshot.visible_elements().len(), snapshot.len());
}

#[test]
fn find_by_text_case_policies() {
    let snapshot = fixture_snapshot("sample_page.html");

    let insensitive: Vec<u32> = snapshot
        .find_by_text("sign in", false)
        .iter()
        .map(|el| el.id)
        .collect();
    assert_eq!(insensitive, vec![1, 4, 5]);

    assert!(snapshot.find_by_text("sign in", true).is_empty());
    assert_eq!(snapshot.find_by_text("Sign in", true).len(), 3);
}

#[test]
fn find_input_by_name_requires_exact_match() {
    let snapshot = fixture_snapshot("sample_page.html");

    let input = snapshot.find_input_by_name("username").unwrap();
    assert_eq!(input.tag, "input");
    assert_eq!(input.id, 8);

    assert!(snapshot.find_input_by_name("user").is_none());
    assert!(snapshot.find_input_by_name("Username").is_none());
}

#[test]
fn find_input_by_name_skips_non_inputs() {
    let snapshot = snapshot_of(r#"<select name="country"></select><input name="city">"#);
    assert!(snapshot.find_input_by_name("country").is_none());
    assert_eq!(snapshot.find_input_by_name("city").unwrap().id, 2);
}

#[test]
fn interactive_elements_and_tags() {
    let snapshot = fixture_snapshot("search_page.html");

    let interactive: Vec<&str> = snapshot
        .interactive_elements()
        .iter()
        .map(|el| el.tag.as_str())
        .collect();
    assert_eq!(interactive, vec!["a", "a", "input", "select", "button"]);

    assert_eq!(
        snapshot.tags(),
        vec!["header", "nav", "a", "main", "input", "select", "option", "button", "p"]
    );
}

#[test]
fn fingerprint_tracks_content_not_url() {
    let html = fixture("sample_page.html");
    let a = Snapshot::build(&html, "a.html").unwrap();
    let b = Snapshot::build(&html, "b.html").unwrap();
    let other = fixture_snapshot("search_page.html");

    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), other.fingerprint());
    assert_eq!(a.fingerprint().len(), 40);
}

#[test]
fn snapshot_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Snapshot>();
}
