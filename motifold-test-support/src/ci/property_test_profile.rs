//! Property-test tuning read from the environment.
//!
//! Every property suite in the workspace loads the same profile, so CI can
//! raise case counts or enable forking for all of them with two variables.

use std::env;

/// Overrides the number of cases each property runs.
pub const PROPTEST_CASES_ENV_KEY: &str = "PROPTEST_CASES";
/// Runs property cases in forked subprocesses when truthy.
pub const MOTIFOLD_PBT_FORK_ENV_KEY: &str = "MOTIFOLD_PBT_FORK";

/// Resolved property-test settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the environment, falling back to the defaults
    /// when a variable is unset or unparsable.
    ///
    /// # Examples
    ///
    /// ```
    /// use motifold_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROPTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(MOTIFOLD_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T>(key: &'static str, default: T, parse: fn(&str) -> Result<T, String>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring invalid property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("case count must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("not a case count: {error}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("not a boolean flag: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets or clears one variable and restores it on drop.
    struct ScopedVar {
        key: &'static str,
        previous: Option<String>,
    }

    impl ScopedVar {
        fn new(key: &'static str, value: Option<&str>) -> Self {
            let previous = env::var(key).ok();
            Self::apply(key, value);
            Self { key, previous }
        }

        fn apply(key: &'static str, value: Option<&str>) {
            match value {
                // SAFETY: tests serialise environment access through ENV_LOCK.
                Some(value) => unsafe { env::set_var(key, value) },
                // SAFETY: tests serialise environment access through ENV_LOCK.
                None => unsafe { env::remove_var(key) },
            }
        }
    }

    impl Drop for ScopedVar {
        fn drop(&mut self) {
            Self::apply(self.key, self.previous.as_deref());
        }
    }

    fn load_with(cases: Option<&str>, fork: Option<&str>, default_fork: bool) -> ProptestRunProfile {
        let _lock = ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _cases = ScopedVar::new(PROPTEST_CASES_ENV_KEY, cases);
        let _fork = ScopedVar::new(MOTIFOLD_PBT_FORK_ENV_KEY, fork);
        ProptestRunProfile::load(64, default_fork)
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let profile = load_with(None, None, false);
        assert_eq!(profile, ProptestRunProfile { cases: 64, fork: false });
    }

    #[rstest]
    #[case::one("1", 1)]
    #[case::padded(" 250 ", 250)]
    #[case::large("25000", 25_000)]
    #[case::zero("0", 64)]
    #[case::negative("-3", 64)]
    #[case::garbage("many", 64)]
    fn case_overrides(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(load_with(Some(raw), None, false).cases(), expected);
    }

    #[rstest]
    #[case::word("true", false, true)]
    #[case::shouted("YES", false, true)]
    #[case::digit("0", true, false)]
    #[case::off("off", true, false)]
    #[case::invalid_keeps_default("maybe", true, true)]
    #[case::empty_keeps_default("", false, false)]
    fn fork_overrides(#[case] raw: &str, #[case] default: bool, #[case] expected: bool) {
        assert_eq!(load_with(None, Some(raw), default).fork(), expected);
    }
}
