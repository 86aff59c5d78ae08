/// WPT (Web Platform Tests) data loader
///
/// Test data format is based on: https://github.com/web-platform-tests/wpt/tree/master/url
use serde::Deserialize;
use std::collections::BTreeMap;

/// One entry of `urltestdata.json`
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum TestCase {
    /// A URL test case
    UrlTest {
        #[serde(default)]
        input: String,
        #[serde(default)]
        base: Option<String>,
        #[serde(default)]
        failure: Option<bool>,
        #[serde(flatten)]
        components: Components,
    },
    /// A comment line (string)
    #[allow(dead_code)]
    Comment(String),
}

/// Expected getter values. Absent fields are not checked.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Components {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub pathname: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
}

impl Components {
    /// `(getter name, expected value)` for every field present
    pub fn expected(&self) -> Vec<(&'static str, &str)> {
        [
            ("href", &self.href),
            ("origin", &self.origin),
            ("protocol", &self.protocol),
            ("username", &self.username),
            ("password", &self.password),
            ("host", &self.host),
            ("hostname", &self.hostname),
            ("port", &self.port),
            ("pathname", &self.pathname),
            ("search", &self.search),
            ("hash", &self.hash),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect()
    }
}

/// One entry of `setters_tests.json`
#[derive(Debug, Deserialize, Clone)]
pub struct SetterTest {
    #[serde(default)]
    pub comment: Option<String>,
    pub href: String,
    pub new_value: String,
    pub expected: Components,
}

#[derive(Debug, Clone, Default)]
pub struct WptTestResult {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<WptFailure>,
}

#[derive(Debug, Clone)]
pub struct WptFailure {
    pub test_num: usize,
    pub input: String,
    pub base: Option<String>,
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl WptTestResult {
    pub fn pass_rate(&self) -> f64 {
        let total = self.passed + self.failed;
        if total == 0 {
            0.0
        } else {
            (self.passed as f64 / total as f64) * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Passed: {}, Failed: {}, Pass Rate: {:.2}%",
            self.passed,
            self.failed,
            self.pass_rate()
        )
    }

    /// Count a case that checked every expected field
    pub fn record(&mut self, failures: Vec<WptFailure>) {
        if failures.is_empty() {
            self.passed += 1;
        } else {
            self.failed += 1;
            self.failures.extend(failures);
        }
    }

    /// Print failures and assert there are none
    pub fn assert_all_passed(&self, suite: &str) {
        println!("\n{suite}: {}", self.summary());
        for failure in &self.failures {
            println!("  Test #{}: {}", failure.test_num, failure.field);
            println!("    Input: {:?}", failure.input);
            if let Some(base) = &failure.base {
                println!("    Base: {base:?}");
            }
            println!("    Expected: {:?}", failure.expected);
            println!("    Actual: {:?}", failure.actual);
        }
        assert_eq!(
            self.failed, 0,
            "Failed {} {suite} tests. See output above for details.",
            self.failed
        );
    }
}

pub fn load_url_tests() -> Vec<TestCase> {
    serde_json::from_str(include_str!("./urltestdata.json")).expect("urltestdata.json")
}

/// Setter cases keyed by attribute name
pub fn load_setter_tests() -> BTreeMap<String, Vec<SetterTest>> {
    serde_json::from_str(include_str!("./setters_tests.json")).expect("setters_tests.json")
}

/// Compare every expected field against `actual(field)`
pub fn check_components<F>(
    test_num: usize,
    input: &str,
    base: Option<&str>,
    expected: &Components,
    actual: F,
) -> Vec<WptFailure>
where
    F: Fn(&str) -> String,
{
    expected
        .expected()
        .into_iter()
        .filter_map(|(field, expected)| {
            let actual = actual(field);
            (actual != expected).then(|| WptFailure {
                test_num,
                input: input.to_string(),
                base: base.map(String::from),
                field: field.to_string(),
                expected: expected.to_string(),
                actual,
            })
        })
        .collect()
}

#[test]
fn test_wpt_result() {
    let mut result = WptTestResult::default();
    result.passed = 80;
    result.failed = 20;

    assert_eq!(result.pass_rate(), 80.0);
    assert!(result.summary().contains("80.00%"));
}

#[test]
fn test_data_loads() {
    let tests = load_url_tests();
    assert!(
        tests
            .iter()
            .any(|test| matches!(test, TestCase::UrlTest { failure: Some(true), .. }))
    );
    let setters = load_setter_tests();
    for setter in ["protocol", "username", "host", "port", "pathname", "search", "hash"] {
        assert!(setters.contains_key(setter), "missing {setter} cases");
    }
}
