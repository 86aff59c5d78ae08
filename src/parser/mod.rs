mod machine;
mod state;
mod violation;

pub use state::StateOverride;
pub use violation::{ValidationError, Violations};

use crate::error::{ParseError, Result};
use crate::url::Url;
use machine::Machine;
use state::State;

/// Parse `input` from scratch, resolving it against `base`.
///
/// # Errors
///
/// Returns an error if the input is not a valid URL.
pub fn parse(input: &str, base: Option<&Url>, violations: &mut Violations) -> Result<Url> {
    let mut url = Url::empty();
    match Machine::new(input, &mut url, base, None, violations).run() {
        Ok(()) => Ok(url),
        Err(error) => {
            tracing::debug!(%error, input, "url parse failed");
            Err(error)
        }
    }
}

/// Run the state machine on `url` starting at `state_override`.
///
/// On error `url` may be partially modified; [`Url::reparse`] runs this on a
/// scratch copy.
///
/// # Errors
///
/// Returns an error if the override does not apply to the shape of `url` or
/// if the override state rejects `input`.
pub fn parse_with_override(
    input: &str,
    url: &mut Url,
    state_override: StateOverride,
    violations: &mut Violations,
) -> Result<()> {
    let touches_hierarchy = matches!(
        state_override,
        StateOverride::Host
            | StateOverride::Hostname
            | StateOverride::Port
            | StateOverride::PathStart
    );
    if touches_hierarchy && !url.is_hierarchical() {
        return Err(ParseError::OverrideNotApplicable);
    }
    Machine::new(input, url, None, Some(state_override), violations).run()
}
