//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// An unset `${VAR}` without a default is an error naming `field`. A value
/// with no `${` is returned untouched, bare `$VAR` included. Once a value
/// contains `${`, bare `$VAR` references in it are expanded as well and an
/// unset one is an error too.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CLARION_TEST_SIMPLE", "http://validator:8888");
        }
        let result = expand_env("${CLARION_TEST_SIMPLE}", "validator.url").unwrap();
        assert_eq!(result, "http://validator:8888");
        unsafe {
            std::env::remove_var("CLARION_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CLARION_TEST_UNSET");
        }
        let result = expand_env("${CLARION_TEST_UNSET:-Docs}", "site.name").unwrap();
        assert_eq!(result, "Docs");
    }

    #[test]
    fn test_expand_empty_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CLARION_TEST_EMPTY");
        }
        assert_eq!(expand_env("${CLARION_TEST_EMPTY:-}", "validator.url").unwrap(), "");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CLARION_TEST_MISSING");
        }
        let err = expand_env("${CLARION_TEST_MISSING}", "validator.url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CLARION_TEST_MISSING"));
        assert!(err.to_string().contains("validator.url"));
    }

    #[test]
    fn test_bare_var_expanded_alongside_braced() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CLARION_TEST_MIXED", "docs");
        }
        let result = expand_env("${CLARION_TEST_MIXED}/$CLARION_TEST_MIXED", "site.source_dir").unwrap();
        assert_eq!(result, "docs/docs");
        unsafe {
            std::env::remove_var("CLARION_TEST_MIXED");
        }
    }

    #[test]
    fn test_unset_bare_var_alongside_braced_is_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CLARION_TEST_BARE_UNSET");
        }
        let err = expand_env("${CLARION_TEST_BARE_UNSET:-x}/$CLARION_TEST_BARE_UNSET", "site.name")
            .unwrap_err();
        assert!(err.to_string().contains("CLARION_TEST_BARE_UNSET"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("plain", "site.name").unwrap(), "plain");
        assert_eq!(expand_env("$HOME/docs", "site.source_dir").unwrap(), "$HOME/docs");
    }
}
