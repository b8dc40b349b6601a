// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service name rules shared by the adapter and the configuration loader.

/// Longest name a service manager accepts.
pub const MAX_SERVICE_NAME_LEN: usize = 256;

/// Checks a service name, returning a description of the first violation.
///
/// Names must be non-blank, at most [`MAX_SERVICE_NAME_LEN`] characters,
/// and contain no path separators (they become unit file names).
pub fn validate_service_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("service name must not be empty".to_string());
    }
    if name.chars().count() > MAX_SERVICE_NAME_LEN {
        return Err(format!(
            "service name must be at most {MAX_SERVICE_NAME_LEN} characters"
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!(
            "service name `{name}` must not contain `/` or `\\`"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(validate_service_name("ExampleServer").is_ok());
        assert!(validate_service_name("my-svc.2").is_ok());
    }

    #[test]
    fn rejects_blank() {
        assert!(validate_service_name("").is_err());
        assert!(validate_service_name("   ").is_err());
    }

    #[test]
    fn rejects_separators() {
        assert!(validate_service_name("a/b").is_err());
        assert!(validate_service_name("a\\b").is_err());
    }

    #[test]
    fn rejects_overlong() {
        let name = "x".repeat(MAX_SERVICE_NAME_LEN + 1);
        assert!(validate_service_name(&name).is_err());
        let name = "x".repeat(MAX_SERVICE_NAME_LEN);
        assert!(validate_service_name(&name).is_ok());
    }
}
