/// URL parsing cases from `urltestdata.json`, checked through every getter
use super::wpt_loader::{TestCase, WptFailure, WptTestResult, check_components, load_url_tests};
use hyperlink::Url;

fn getter(url: &Url, field: &str) -> String {
    match field {
        "href" => url.href(),
        "origin" => url.origin().to_string(),
        "protocol" => url.protocol(),
        "username" => url.username().to_string(),
        "password" => url.password().to_string(),
        "host" => url.host(),
        "hostname" => url.hostname(),
        "port" => url.port(),
        "pathname" => url.pathname(),
        "search" => url.search(),
        "hash" => url.hash(),
        other => panic!("unknown getter {other}"),
    }
}

pub fn run_url_tests(tests: Vec<TestCase>) -> WptTestResult {
    let mut result = WptTestResult::default();
    let mut test_num = 0;

    for test in tests {
        let TestCase::UrlTest {
            input,
            base,
            failure,
            components,
        } = test
        else {
            continue;
        };
        test_num += 1;

        let parsed = Url::parse(&input, base.as_deref());
        let failures = match (parsed, failure == Some(true)) {
            (Err(_), true) => Vec::new(),
            (Ok(url), true) => vec![WptFailure {
                test_num,
                input,
                base,
                field: "parsing".to_string(),
                expected: "failure".to_string(),
                actual: url.href(),
            }],
            (Err(error), false) => vec![WptFailure {
                test_num,
                input,
                base,
                field: "parsing".to_string(),
                expected: "success".to_string(),
                actual: error.to_string(),
            }],
            (Ok(url), false) => {
                let mut failures =
                    check_components(test_num, &input, base.as_deref(), &components, |field| {
                        getter(&url, field)
                    });
                // Serializing then parsing again yields the same record
                match Url::parse(&url.href(), None) {
                    Ok(reparsed) if reparsed == url => {}
                    other => failures.push(WptFailure {
                        test_num,
                        input: input.clone(),
                        base: base.clone(),
                        field: "reparse".to_string(),
                        expected: url.href(),
                        actual: format!("{other:?}"),
                    }),
                }
                failures
            }
        };
        result.record(failures);
    }

    result
}

#[test]
fn test_wpt_url_suite() {
    let result = run_url_tests(load_url_tests());
    result.assert_all_passed("urltestdata");
    assert!(result.passed > 50, "suite too small: {}", result.passed);
}

#[test]
fn test_can_parse_agrees_with_parse() {
    for test in load_url_tests() {
        if let TestCase::UrlTest {
            input,
            base,
            failure,
            ..
        } = test
        {
            assert_eq!(
                Url::can_parse(&input, base.as_deref()),
                failure != Some(true),
                "can_parse({input:?}, {base:?})"
            );
        }
    }
}
