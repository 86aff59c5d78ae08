/// WPT tests for URL.canParse()
///
/// Based on: https://github.com/web-platform-tests/wpt/blob/master/url/url-statics-canparse.any.js
/// An `undefined` URL argument is passed as the empty string.
use hyperlink::Url;

#[derive(Debug)]
struct CanParseTest {
    url: &'static str,
    base: Option<&'static str>,
    expected: bool,
}

const CAN_PARSE_TESTS: &[CanParseTest] = &[
    CanParseTest {
        url: "",
        base: None,
        expected: false,
    },
    CanParseTest {
        url: "aaa:b",
        base: None,
        expected: true,
    },
    // Nothing resolves against an opaque base except a fragment
    CanParseTest {
        url: "",
        base: Some("aaa:b"),
        expected: false,
    },
    CanParseTest {
        url: "#frag",
        base: Some("aaa:b"),
        expected: true,
    },
    // The base itself must parse
    CanParseTest {
        url: "",
        base: Some("https://test:test/"),
        expected: false,
    },
    CanParseTest {
        url: "aaa:/b",
        base: None,
        expected: true,
    },
    CanParseTest {
        url: "",
        base: Some("aaa:/b"),
        expected: true,
    },
    CanParseTest {
        url: "https://test:test",
        base: None,
        expected: false,
    },
    CanParseTest {
        url: "a",
        base: Some("https://b/"),
        expected: true,
    },
    CanParseTest {
        url: "//[::1",
        base: Some("https://b/"),
        expected: false,
    },
];

#[test]
fn test_wpt_canparse_suite() {
    let mut failures = Vec::new();

    for (idx, test) in CAN_PARSE_TESTS.iter().enumerate() {
        let result = Url::can_parse(test.url, test.base);
        if result != test.expected {
            failures.push(format!(
                "Test {}: URL.canParse({:?}, {:?}) = {} (expected {})",
                idx, test.url, test.base, result, test.expected
            ));
        }
    }

    for failure in &failures {
        eprintln!("  {failure}");
    }
    assert!(
        failures.is_empty(),
        "Failed {} can_parse WPT tests. See output above for details.",
        failures.len()
    );
}
