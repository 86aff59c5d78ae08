/// `HTMLHyperlinkElementUtils` setter cases from `setters_tests.json`.
///
/// Every case runs on a fresh `<a>` element of an `about:blank` document, so
/// `href` values resolve on their own.
use super::wpt_loader::{SetterTest, WptTestResult, check_components, load_setter_tests};
use hyperlink::{Document, DocumentOptions, HtmlAnchorElement, HyperlinkElementUtils};
use std::rc::Rc;

fn set(anchor: &mut HtmlAnchorElement, setter: &str, value: &str) {
    match setter {
        "protocol" => anchor.set_protocol(value),
        "username" => anchor.set_username(value),
        "password" => anchor.set_password(value),
        "host" => anchor.set_host(value),
        "hostname" => anchor.set_hostname(value),
        "port" => anchor.set_port(value),
        "pathname" => anchor.set_pathname(value),
        "search" => anchor.set_search(value),
        "hash" => anchor.set_hash(value),
        other => panic!("unknown setter {other}"),
    }
}

fn get(anchor: &HtmlAnchorElement, field: &str) -> String {
    match field {
        "href" => anchor.href(),
        "origin" => anchor.origin(),
        "protocol" => anchor.protocol(),
        "username" => anchor.username(),
        "password" => anchor.password(),
        "host" => anchor.host(),
        "hostname" => anchor.hostname(),
        "port" => anchor.port(),
        "pathname" => anchor.pathname(),
        "search" => anchor.search(),
        "hash" => anchor.hash(),
        other => panic!("unknown getter {other}"),
    }
}

fn run_setter_tests(document: &Rc<Document>, setter: &str, tests: &[SetterTest]) -> WptTestResult {
    let mut result = WptTestResult::default();
    for (idx, test) in tests.iter().enumerate() {
        let mut anchor = HtmlAnchorElement::with_href(Rc::clone(document), &test.href);
        set(&mut anchor, setter, &test.new_value);

        let input = format!("{setter} = {:?} on {}", test.new_value, test.href);
        result.record(check_components(
            idx + 1,
            &input,
            test.comment.as_deref(),
            &test.expected,
            |field| get(&anchor, field),
        ));
    }
    result
}

#[test]
fn test_wpt_setter_suite() {
    let document = Document::new(DocumentOptions::default()).unwrap();
    for (setter, tests) in load_setter_tests() {
        let result = run_setter_tests(&document, &setter, &tests);
        result.assert_all_passed(&setter);
        assert_eq!(result.passed, tests.len());
    }
}
