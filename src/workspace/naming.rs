//! Workspace naming rules
//!
//! SCA workspace names must start with a letter, may only contain ASCII
//! letters, digits, space, `-` and `_`, and are limited to 20 characters.
//!
//! The prefix decision looks at the raw first character, so a name starting
//! with a non-ASCII letter (`"Über"`) gets no prefix and loses that letter.
//! Such names can derive to `""` or to a digit-led name; callers check the
//! result with [`is_valid_workspace_name`].

/// Maximum workspace name length, in characters
pub const MAX_WORKSPACE_NAME_LEN: usize = 20;

/// Prepended when an application name does not start with a letter
pub const FORCED_PREFIX: char = 'A';

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ' ' | '-' | '_')
}

/// Map an application name to a workspace name the service will accept.
///
/// Disallowed characters are dropped (not replaced) and the result is cut to
/// [`MAX_WORKSPACE_NAME_LEN`] characters.
pub fn derive_workspace_name(app_name: &str) -> String {
    let needs_prefix = !app_name
        .chars()
        .next()
        .is_some_and(char::is_alphabetic);

    needs_prefix
        .then_some(FORCED_PREFIX)
        .into_iter()
        .chain(app_name.chars())
        .filter(|ch| is_allowed(*ch))
        .take(MAX_WORKSPACE_NAME_LEN)
        .collect()
}

/// Whether `name` already satisfies every workspace naming rule.
pub fn is_valid_workspace_name(name: &str) -> bool {
    name.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic())
        && name.chars().count() <= MAX_WORKSPACE_NAME_LEN
        && name.chars().all(is_allowed)
}
