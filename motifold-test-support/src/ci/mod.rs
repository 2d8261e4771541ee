//! Environment-driven knobs that CI uses to tune test suites.

pub mod property_test_profile;
