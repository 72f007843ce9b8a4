//! Assertion helpers for testing

/// Assert that git stores `url` for the remote `name` in `repo`.
#[macro_export]
macro_rules! assert_remote_url {
    ($repo:expr, $name:expr, $url:expr) => {
        assert_eq!(
            $repo.configured_url($name).as_deref(),
            Some($url),
            "remote '{}' should point at {}",
            $name,
            $url
        );
    };
}

/// Assert that `repo` has no remote called `name`.
#[macro_export]
macro_rules! assert_no_remote {
    ($repo:expr, $name:expr) => {
        assert!(
            $repo.configured_url($name).is_none(),
            "remote '{}' should not exist",
            $name
        );
    };
}
