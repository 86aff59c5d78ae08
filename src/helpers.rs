use crate::character_sets::{is_ascii_tab_or_newline, is_c0_control_or_space};
use crate::compat::Cow;
use crate::parser::{ValidationError, Violations};

/// Fast check if string contains tabs or newlines
pub fn has_tabs_or_newline(input: &str) -> bool {
    memchr::memchr3(b'\t', b'\n', b'\r', input.as_bytes()).is_some()
}

/// Input pre-processing before the state machine runs.
/// Leading/trailing C0 controls and spaces are trimmed only when `trim` is
/// set (setters skip it); tabs and newlines are always removed.
/// Returns a Cow to avoid allocation when possible.
pub fn clean_input<'a>(input: &'a str, trim: bool, violations: &mut Violations) -> Cow<'a, str> {
    let trimmed = if trim {
        let trimmed = input.trim_matches(is_c0_control_or_space);
        if trimmed.len() != input.len() {
            violations.record(ValidationError::LeadingOrTrailingC0ControlOrSpace);
        }
        trimmed
    } else {
        input
    };

    if !has_tabs_or_newline(trimmed) {
        return Cow::Borrowed(trimmed);
    }

    violations.record(ValidationError::TabOrNewline);
    Cow::Owned(
        trimmed
            .chars()
            .filter(|&c| !is_ascii_tab_or_newline(c))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(input: &str, trim: bool) -> Cow<'_, str> {
        clean_input(input, trim, &mut Violations::default())
    }

    #[test]
    fn test_clean_input() {
        assert_eq!(clean("\t\nhello\r\n", true), "hello");
        assert_eq!(clean("hello", true), "hello");
        assert_eq!(clean("\t\n\r", true), "");
        assert_eq!(clean("hel\tlo\nworld", true), "helloworld");

        // Spaces are trimmed from the edges but kept internally
        assert_eq!(clean("  hello  ", true), "hello");
        assert_eq!(clean("  hello world  ", true), "hello world");
        assert_eq!(clean("\u{0}foo.com\u{1F}", true), "foo.com");
    }

    #[test]
    fn test_clean_input_without_trim() {
        assert_eq!(clean("  a\tb  ", false), "  ab  ");
        assert!(matches!(clean("plain", false), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_clean_input_records_violations() {
        let mut violations = Violations::default();
        clean_input(" a\nb", true, &mut violations);
        assert!(violations.contains(ValidationError::LeadingOrTrailingC0ControlOrSpace));
        assert!(violations.contains(ValidationError::TabOrNewline));
    }
}
