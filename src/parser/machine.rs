//! The basic URL parser state machine.
//!
//! One loop serves both entry points: a from-scratch parse starts in
//! [`State::SchemeStart`] on an empty record, an override parse starts in the
//! override's state on an existing record and stops as soon as its component
//! is done.

use super::{State, StateOverride, ValidationError, Violations};
use crate::character_sets::{is_authority_delimiter, is_scheme_char};
use crate::checkers::{
    is_double_dot_segment, is_normalized_windows_drive_letter, is_single_dot_segment,
    is_windows_drive_letter, parse_port, starts_with_windows_drive_letter,
};
use crate::compat::{String, Vec};
use crate::error::{ParseError, Result};
use crate::helpers::clean_input;
use crate::host::{Host, parse_host};
use crate::scheme::{default_port, get_scheme_type};
use crate::types::SchemeType;
use crate::unicode::percent_encode::{
    C0_CONTROL_SET, FRAGMENT_SET, PATH_SET, QUERY_SET, SPECIAL_QUERY_SET, USERINFO_SET,
    percent_encode_char_into, percent_encode_into,
};
use crate::url::{Hierarchy, Url, UrlKind};

pub(super) struct Machine<'a> {
    url: &'a mut Url,
    base: Option<&'a Url>,
    state_override: Option<StateOverride>,
    violations: &'a mut Violations,
    input: Vec<char>,
    pointer: isize,
    state: State,
    buffer: String,
    at_sign_seen: bool,
    inside_brackets: bool,
    password_token_seen: bool,
}

impl<'a> Machine<'a> {
    pub(super) fn new(
        input: &str,
        url: &'a mut Url,
        base: Option<&'a Url>,
        state_override: Option<StateOverride>,
        violations: &'a mut Violations,
    ) -> Self {
        let input = clean_input(input, state_override.is_none(), violations)
            .chars()
            .collect();
        Self {
            url,
            base,
            state_override,
            violations,
            input,
            pointer: 0,
            state: state_override.map_or(State::SchemeStart, State::from),
            buffer: String::new(),
            at_sign_seen: false,
            inside_brackets: false,
            password_token_seen: false,
        }
    }

    /// Code point at `pointer`; `None` is EOF
    fn c(&self) -> Option<char> {
        usize::try_from(self.pointer)
            .ok()
            .and_then(|pointer| self.input.get(pointer).copied())
    }

    /// Code points after `pointer`
    fn remaining(&self) -> &[char] {
        let start = usize::try_from(self.pointer + 1).unwrap_or(0);
        self.input.get(start..).unwrap_or(&[])
    }

    fn remaining_starts_with(&self, c: char) -> bool {
        self.remaining().first() == Some(&c)
    }

    fn is_special(&self) -> bool {
        get_scheme_type(&self.url.scheme).is_special()
    }

    fn is_override(&self) -> bool {
        self.state_override.is_some()
    }

    fn record(&mut self, violation: ValidationError) {
        self.violations.record(violation);
    }

    fn hierarchy(&mut self) -> Result<&mut Hierarchy> {
        self.url
            .hierarchy_mut()
            .ok_or(ParseError::OverrideNotApplicable)
    }

    /// Remove the last path segment, keeping a lone drive letter of a file URL
    fn shorten_path(&mut self) -> Result<()> {
        let is_file = self.url.scheme == "file";
        let path = &mut self.hierarchy()?.path;
        if is_file && path.len() == 1 && is_normalized_windows_drive_letter(&path[0]) {
            return Ok(());
        }
        path.pop();
        Ok(())
    }

    fn copy_base_authority(&mut self, base: &Url) -> Result<()> {
        let Some(base) = base.hierarchy() else {
            return Ok(());
        };
        let hierarchy = self.hierarchy()?;
        hierarchy.username.clone_from(&base.username);
        hierarchy.password.clone_from(&base.password);
        hierarchy.host.clone_from(&base.host);
        hierarchy.port = base.port;
        Ok(())
    }

    fn parse_buffer_as_host(&mut self) -> Result<Host> {
        let scheme_type = get_scheme_type(&self.url.scheme);
        parse_host(&self.buffer, scheme_type, self.violations)
    }

    /// Flag `%` not followed by two hex digits in path, query and fragment input
    fn check_percent_escape(&mut self, c: char) {
        if c != '%' {
            return;
        }
        let remaining = self.remaining();
        let valid = remaining.len() >= 2
            && remaining[0].is_ascii_hexdigit()
            && remaining[1].is_ascii_hexdigit();
        if !valid {
            self.record(ValidationError::InvalidUrlUnit);
        }
    }

    pub(super) fn run(mut self) -> Result<()> {
        let len = self.input.len() as isize;
        loop {
            if self.step()? {
                return Ok(());
            }
            if self.pointer >= len {
                return Ok(());
            }
            self.pointer += 1;
        }
    }

    /// Run the current state once. `Ok(true)` ends the parse early.
    fn step(&mut self) -> Result<bool> {
        let c = self.c();
        match self.state {
            State::SchemeStart => match c {
                Some(c) if c.is_ascii_alphabetic() => {
                    self.buffer.push(c.to_ascii_lowercase());
                    self.state = State::Scheme;
                }
                _ if !self.is_override() => {
                    self.state = State::NoScheme;
                    self.pointer -= 1;
                }
                _ => return Err(ParseError::InvalidScheme),
            },

            State::Scheme => match c {
                Some(c) if is_scheme_char(c) => self.buffer.push(c.to_ascii_lowercase()),
                Some(':') => return self.end_scheme(),
                _ if !self.is_override() => {
                    self.buffer.clear();
                    self.state = State::NoScheme;
                    self.pointer = -1;
                }
                _ => return Err(ParseError::InvalidScheme),
            },

            State::NoScheme => {
                let Some(base) = self.base else {
                    self.record(ValidationError::MissingSchemeNonRelativeUrl);
                    return Err(ParseError::RelativeUrlWithoutBase);
                };
                if !base.is_hierarchical() {
                    if c != Some('#') {
                        self.record(ValidationError::MissingSchemeNonRelativeUrl);
                        return Err(ParseError::RelativeUrlWithoutBase);
                    }
                    self.url.scheme.clone_from(&base.scheme);
                    self.url.kind = base.kind.clone();
                    self.url.query.clone_from(&base.query);
                    self.url.fragment = Some(String::new());
                    self.state = State::Fragment;
                } else if base.scheme == "file" {
                    self.state = State::File;
                    self.pointer -= 1;
                } else {
                    self.state = State::Relative;
                    self.pointer -= 1;
                }
            }

            State::SpecialRelativeOrAuthority => {
                if c == Some('/') && self.remaining_starts_with('/') {
                    self.state = State::SpecialAuthorityIgnoreSlashes;
                    self.pointer += 1;
                } else {
                    self.record(ValidationError::SpecialSchemeMissingFollowingSolidus);
                    self.state = State::Relative;
                    self.pointer -= 1;
                }
            }

            State::PathOrAuthority => {
                if c == Some('/') {
                    self.state = State::Authority;
                } else {
                    self.state = State::Path;
                    self.pointer -= 1;
                }
            }

            State::Relative => self.relative(c)?,

            State::RelativeSlash => {
                let special = self.is_special();
                if special && matches!(c, Some('/' | '\\')) {
                    if c == Some('\\') {
                        self.record(ValidationError::InvalidReverseSolidus);
                    }
                    self.state = State::SpecialAuthorityIgnoreSlashes;
                } else if c == Some('/') {
                    self.state = State::Authority;
                } else {
                    if let Some(base) = self.base {
                        self.copy_base_authority(base)?;
                    }
                    self.state = State::Path;
                    self.pointer -= 1;
                }
            }

            State::SpecialAuthoritySlashes => {
                if c == Some('/') && self.remaining_starts_with('/') {
                    self.state = State::SpecialAuthorityIgnoreSlashes;
                    self.pointer += 1;
                } else {
                    self.record(ValidationError::SpecialSchemeMissingFollowingSolidus);
                    self.state = State::SpecialAuthorityIgnoreSlashes;
                    self.pointer -= 1;
                }
            }

            State::SpecialAuthorityIgnoreSlashes => {
                if matches!(c, Some('/' | '\\')) {
                    self.record(ValidationError::SpecialSchemeMissingFollowingSolidus);
                } else {
                    self.state = State::Authority;
                    self.pointer -= 1;
                }
            }

            State::Authority => self.authority(c)?,

            State::Host | State::Hostname => return self.host(c),

            State::Port => return self.port(c),

            State::File => self.file(c)?,

            State::FileSlash => {
                if matches!(c, Some('/' | '\\')) {
                    if c == Some('\\') {
                        self.record(ValidationError::InvalidReverseSolidus);
                    }
                    self.state = State::FileHost;
                } else {
                    if let Some(base) = self.base.filter(|base| base.scheme == "file")
                        && let Some(base) = base.hierarchy()
                    {
                        let pointer = usize::try_from(self.pointer).unwrap_or(0);
                        let drive_letter_follows =
                            starts_with_windows_drive_letter(&self.input, pointer);
                        let hierarchy = self.hierarchy()?;
                        hierarchy.host.clone_from(&base.host);
                        if !drive_letter_follows
                            && let Some(first) = base.path.first()
                            && is_normalized_windows_drive_letter(first)
                        {
                            hierarchy.path.push(first.clone());
                        }
                    }
                    self.state = State::Path;
                    self.pointer -= 1;
                }
            }

            State::FileHost => return self.file_host(c),

            State::PathStart => {
                if self.is_special() {
                    if c == Some('\\') {
                        self.record(ValidationError::InvalidReverseSolidus);
                    }
                    self.state = State::Path;
                    if !matches!(c, Some('/' | '\\')) {
                        self.pointer -= 1;
                    }
                } else if !self.is_override() && c == Some('?') {
                    self.url.query = Some(String::new());
                    self.state = State::Query;
                } else if !self.is_override() && c == Some('#') {
                    self.url.fragment = Some(String::new());
                    self.state = State::Fragment;
                } else if c.is_some() {
                    self.state = State::Path;
                    if c != Some('/') {
                        self.pointer -= 1;
                    }
                } else if self.is_override() && self.url.host_value().is_none() {
                    self.hierarchy()?.path.push(String::new());
                }
            }

            State::Path => self.path(c)?,

            State::OpaquePath => match c {
                Some('?') => {
                    self.url.query = Some(String::new());
                    self.state = State::Query;
                }
                Some('#') => {
                    self.url.fragment = Some(String::new());
                    self.state = State::Fragment;
                }
                Some(c) => {
                    self.check_percent_escape(c);
                    let encoded_space =
                        c == ' ' && matches!(self.remaining().first(), Some('?' | '#'));
                    let UrlKind::Opaque(path) = &mut self.url.kind else {
                        return Err(ParseError::OverrideNotApplicable);
                    };
                    if encoded_space {
                        path.push_str("%20");
                    } else {
                        percent_encode_char_into(path, c, C0_CONTROL_SET);
                    }
                }
                None => {}
            },

            State::Query => {
                if c.is_none() || (!self.is_override() && c == Some('#')) {
                    let encode_set = if self.is_special() {
                        SPECIAL_QUERY_SET
                    } else {
                        QUERY_SET
                    };
                    let query = self.url.query.get_or_insert_with(String::new);
                    percent_encode_into(query, &self.buffer, encode_set);
                    self.buffer.clear();
                    if c == Some('#') {
                        self.url.fragment = Some(String::new());
                        self.state = State::Fragment;
                    }
                } else if let Some(c) = c {
                    self.check_percent_escape(c);
                    self.buffer.push(c);
                }
            }

            State::Fragment => {
                if let Some(c) = c {
                    self.check_percent_escape(c);
                    let fragment = self.url.fragment.get_or_insert_with(String::new);
                    percent_encode_char_into(fragment, c, FRAGMENT_SET);
                }
            }
        }
        Ok(false)
    }

    /// Scheme state on `:`
    fn end_scheme(&mut self) -> Result<bool> {
        let candidate = get_scheme_type(&self.buffer);

        if self.is_override() {
            if self.is_special() != candidate.is_special() {
                return Err(ParseError::OverrideRejected);
            }
            if let Some(hierarchy) = self.url.hierarchy() {
                let has_credentials_or_port =
                    hierarchy.includes_credentials() || hierarchy.port.is_some();
                if has_credentials_or_port && candidate == SchemeType::File {
                    return Err(ParseError::OverrideRejected);
                }
                if self.url.scheme == "file" && hierarchy.host.as_ref().is_some_and(Host::is_empty)
                {
                    return Err(ParseError::OverrideRejected);
                }
            }
        }

        self.url.scheme = core::mem::take(&mut self.buffer);

        if self.is_override() {
            let default = default_port(&self.url.scheme);
            if let Some(hierarchy) = self.url.hierarchy_mut()
                && hierarchy.port.is_some()
                && hierarchy.port == default
            {
                hierarchy.port = None;
            }
            return Ok(true);
        }

        if candidate == SchemeType::File {
            if !self.remaining().starts_with(&['/', '/']) {
                self.record(ValidationError::SpecialSchemeMissingFollowingSolidus);
            }
            self.state = State::File;
        } else if candidate.is_special() {
            let same_as_base = self.base.is_some_and(|base| base.scheme == self.url.scheme);
            self.state = if same_as_base {
                State::SpecialRelativeOrAuthority
            } else {
                State::SpecialAuthoritySlashes
            };
        } else if self.remaining_starts_with('/') {
            self.state = State::PathOrAuthority;
            self.pointer += 1;
        } else {
            self.url.kind = UrlKind::Opaque(String::new());
            self.state = State::OpaquePath;
        }
        Ok(false)
    }

    fn relative(&mut self, c: Option<char>) -> Result<()> {
        let Some(base) = self.base else {
            return Err(ParseError::RelativeUrlWithoutBase);
        };
        self.url.scheme.clone_from(&base.scheme);

        if c == Some('/') {
            self.state = State::RelativeSlash;
            return Ok(());
        }
        if self.is_special() && c == Some('\\') {
            self.record(ValidationError::InvalidReverseSolidus);
            self.state = State::RelativeSlash;
            return Ok(());
        }

        self.url.kind = base.kind.clone();
        self.url.query.clone_from(&base.query);
        match c {
            Some('?') => {
                self.url.query = Some(String::new());
                self.state = State::Query;
            }
            Some('#') => {
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
            Some(_) => {
                self.url.query = None;
                self.shorten_path()?;
                self.state = State::Path;
                self.pointer -= 1;
            }
            None => {}
        }
        Ok(())
    }

    fn authority(&mut self, c: Option<char>) -> Result<()> {
        if c == Some('@') {
            self.record(ValidationError::InvalidCredentials);
            if self.at_sign_seen {
                self.buffer.insert_str(0, "%40");
            }
            self.at_sign_seen = true;

            let buffer = core::mem::take(&mut self.buffer);
            let mut password_token_seen = self.password_token_seen;
            let hierarchy = self.hierarchy()?;
            for code_point in buffer.chars() {
                if code_point == ':' && !password_token_seen {
                    password_token_seen = true;
                    continue;
                }
                let target = if password_token_seen {
                    &mut hierarchy.password
                } else {
                    &mut hierarchy.username
                };
                percent_encode_char_into(target, code_point, USERINFO_SET);
            }
            self.password_token_seen = password_token_seen;
        } else if c.is_none_or(|c| is_authority_delimiter(c, self.is_special())) {
            if self.at_sign_seen && self.buffer.is_empty() {
                self.record(ValidationError::HostMissing);
                return Err(ParseError::HostMissing);
            }
            self.pointer -= self.buffer.chars().count() as isize + 1;
            self.buffer.clear();
            self.state = State::Host;
        } else if let Some(c) = c {
            self.buffer.push(c);
        }
        Ok(())
    }

    fn host(&mut self, c: Option<char>) -> Result<bool> {
        if self.is_override() && self.url.scheme == "file" {
            self.pointer -= 1;
            self.state = State::FileHost;
            return Ok(false);
        }

        let special = self.is_special();
        if c == Some(':') && !self.inside_brackets {
            if self.buffer.is_empty() {
                self.record(ValidationError::HostMissing);
                return Err(ParseError::HostMissing);
            }
            if self.state_override == Some(StateOverride::Hostname) {
                return Err(ParseError::OverrideRejected);
            }
            let host = self.parse_buffer_as_host()?;
            self.hierarchy()?.host = Some(host);
            self.buffer.clear();
            self.state = State::Port;
        } else if c.is_none_or(|c| is_authority_delimiter(c, special)) {
            self.pointer -= 1;
            if special && self.buffer.is_empty() {
                self.record(ValidationError::HostMissing);
                return Err(ParseError::HostMissing);
            }
            if self.is_override() && self.buffer.is_empty() {
                let hierarchy = self.hierarchy()?;
                if hierarchy.includes_credentials() || hierarchy.port.is_some() {
                    return Err(ParseError::OverrideRejected);
                }
            }
            let host = self.parse_buffer_as_host()?;
            self.hierarchy()?.host = Some(host);
            self.buffer.clear();
            self.state = State::PathStart;
            if self.is_override() {
                return Ok(true);
            }
        } else if let Some(c) = c {
            match c {
                '[' => self.inside_brackets = true,
                ']' => self.inside_brackets = false,
                _ => {}
            }
            self.buffer.push(c);
        }
        Ok(false)
    }

    fn port(&mut self, c: Option<char>) -> Result<bool> {
        match c {
            Some(c) if c.is_ascii_digit() => {
                self.buffer.push(c);
                return Ok(false);
            }
            _ if c.is_none_or(|c| is_authority_delimiter(c, self.is_special()))
                || self.is_override() => {}
            _ => {
                self.record(ValidationError::PortInvalid);
                return Err(ParseError::InvalidPort);
            }
        }

        if !self.buffer.is_empty() {
            let Some(port) = parse_port(&self.buffer) else {
                self.record(ValidationError::PortOutOfRange);
                return Err(ParseError::PortOutOfRange);
            };
            let default = default_port(&self.url.scheme);
            self.hierarchy()?.port = (default != Some(port)).then_some(port);
            self.buffer.clear();
            if self.is_override() {
                return Ok(true);
            }
        }

        match self.state_override {
            // A host override keeps the port it had when none follows the ':'
            Some(StateOverride::Host) => return Ok(true),
            Some(_) => return Err(ParseError::InvalidPort),
            None => {}
        }
        self.state = State::PathStart;
        self.pointer -= 1;
        Ok(false)
    }

    fn file(&mut self, c: Option<char>) -> Result<()> {
        self.url.scheme = String::from("file");
        self.hierarchy()?.host = Some(Host::Empty);

        if matches!(c, Some('/' | '\\')) {
            if c == Some('\\') {
                self.record(ValidationError::InvalidReverseSolidus);
            }
            self.state = State::FileSlash;
            return Ok(());
        }

        let Some(base) = self.base.filter(|base| base.scheme == "file") else {
            self.state = State::Path;
            self.pointer -= 1;
            return Ok(());
        };

        if let Some(base_hierarchy) = base.hierarchy() {
            let hierarchy = self.hierarchy()?;
            hierarchy.host.clone_from(&base_hierarchy.host);
            hierarchy.path.clone_from(&base_hierarchy.path);
        }
        self.url.query.clone_from(&base.query);

        match c {
            Some('?') => {
                self.url.query = Some(String::new());
                self.state = State::Query;
            }
            Some('#') => {
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
            Some(_) => {
                self.url.query = None;
                let pointer = usize::try_from(self.pointer).unwrap_or(0);
                if starts_with_windows_drive_letter(&self.input, pointer) {
                    self.record(ValidationError::FileInvalidWindowsDriveLetter);
                    self.hierarchy()?.path.clear();
                } else {
                    self.shorten_path()?;
                }
                self.state = State::Path;
                self.pointer -= 1;
            }
            None => {}
        }
        Ok(())
    }

    fn file_host(&mut self, c: Option<char>) -> Result<bool> {
        let Some(c) = c.filter(|&c| !matches!(c, '/' | '\\' | '?' | '#')) else {
            self.pointer -= 1;
            if !self.is_override() && is_windows_drive_letter(&self.buffer) {
                // The buffer is left in place and becomes the first path segment
                self.record(ValidationError::FileInvalidWindowsDriveLetterHost);
                self.state = State::Path;
                return Ok(false);
            }

            let host = if self.buffer.is_empty() {
                Host::Empty
            } else {
                let host = self.parse_buffer_as_host()?;
                if host.is_localhost() { Host::Empty } else { host }
            };
            self.hierarchy()?.host = Some(host);
            if self.is_override() {
                return Ok(true);
            }
            self.buffer.clear();
            self.state = State::PathStart;
            return Ok(false);
        };

        self.buffer.push(c);
        Ok(false)
    }

    fn path(&mut self, c: Option<char>) -> Result<()> {
        let special = self.is_special();
        let slash = c == Some('/') || (special && c == Some('\\'));
        let ends_segment =
            c.is_none() || slash || (!self.is_override() && matches!(c, Some('?' | '#')));

        if !ends_segment {
            if let Some(c) = c {
                self.check_percent_escape(c);
                percent_encode_char_into(&mut self.buffer, c, PATH_SET);
            }
            return Ok(());
        }

        if special && c == Some('\\') {
            self.record(ValidationError::InvalidReverseSolidus);
        }

        if is_double_dot_segment(&self.buffer) {
            self.shorten_path()?;
            if !slash {
                self.hierarchy()?.path.push(String::new());
            }
        } else if is_single_dot_segment(&self.buffer) {
            if !slash {
                self.hierarchy()?.path.push(String::new());
            }
        } else {
            let mut segment = core::mem::take(&mut self.buffer);
            let is_file = self.url.scheme == "file";
            let path = &mut self.hierarchy()?.path;
            if is_file && path.is_empty() && is_windows_drive_letter(&segment) {
                segment.replace_range(1..2, ":");
            }
            path.push(segment);
        }
        self.buffer.clear();

        match c {
            Some('?') => {
                self.url.query = Some(String::new());
                self.state = State::Query;
            }
            Some('#') => {
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
            _ => {}
        }
        Ok(())
    }
}
