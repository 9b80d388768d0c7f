//! Environment variable proxy
//!
//! Mutating the process environment is not thread-safe on POSIX; bridges
//! call the setters from their single setup thread before anything else is
//! running.

/// Get an environment variable, or `None` if unset or not unicode
pub fn get(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Set an environment variable
pub fn set(key: &str, value: &str) {
    std::env::set_var(key, value);
}

/// Remove an environment variable
pub fn remove(key: &str) {
    std::env::remove_var(key);
}

/// Check whether an environment variable is set
pub fn has(key: &str) -> bool {
    std::env::var_os(key).is_some()
}

/// Snapshot all environment variables as key/value pairs
pub fn all() -> Vec<(String, String)> {
    std::env::vars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let key = "GANTRY_ENV_TEST";
        set(key, "on");
        assert!(has(key));
        assert_eq!(get(key).as_deref(), Some("on"));
        assert!(all().iter().any(|(k, v)| k == key && v == "on"));

        remove(key);
        assert!(!has(key));
        assert_eq!(get(key), None);
    }
}
