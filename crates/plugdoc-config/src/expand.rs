//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Only the braced form is recognized; a string without `${` is returned
/// unchanged, so bare `$VAR` passes through.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Unset variable encountered during expansion.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("PLUGDOC_TEST_SIMPLE", "Meraki");
        }
        let result = expand_env("${PLUGDOC_TEST_SIMPLE} Docs", "site.title").unwrap();
        assert_eq!(result, "Meraki Docs");
        unsafe {
            std::env::remove_var("PLUGDOC_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("PLUGDOC_TEST_UNSET");
        }
        let result = expand_env("${PLUGDOC_TEST_UNSET:-2.1.0}", "site.version").unwrap();
        assert_eq!(result, "2.1.0");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("PLUGDOC_TEST_MISSING");
        }
        let err = expand_env("${PLUGDOC_TEST_MISSING}", "build.output_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("PLUGDOC_TEST_MISSING"));
        assert!(message.contains("build.output_dir"));
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("site", "build.output_dir").unwrap(), "site");
        assert_eq!(expand_env("$HOME/site", "build.output_dir").unwrap(), "$HOME/site");
    }
}
