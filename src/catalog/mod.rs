//! Suite and type catalog
//!
//! The tables mirror the platform's own `dev:tests:run` mapping so that the
//! same type names select the same suites.

use crate::error::DispatchError;
use crate::models::{SuiteEntry, TypeEntry, TypeSuites};

/// Every known suite, in declaration order
pub const SUITES: &[SuiteEntry] = &[
    SuiteEntry::new("unit", "../tests/unit"),
    SuiteEntry::new("unit-static", "../tests/static/framework/tests/unit"),
    SuiteEntry::new("unit-integration", "../tests/integration/framework/tests/unit"),
    SuiteEntry::new("integration", "../tests/integration"),
    SuiteEntry::new("integration-integrity", "../tests/integration")
        .with_args("testsuite/Magento/Test/Integrity"),
    SuiteEntry::new("static-default", "../tests/static"),
    SuiteEntry::new("static-legacy", "../tests/static")
        .with_args("testsuite/Magento/Test/Legacy"),
    SuiteEntry::new("static-integration-js", "../tests/static")
        .with_args("testsuite/Magento/Test/Js/Exemplar"),
];

/// Every selectable type, in declaration order
pub const TYPES: &[TypeEntry] = &[
    TypeEntry::all("all"),
    TypeEntry::new("unit", &["unit", "unit-static", "unit-integration"]),
    TypeEntry::new("integration", &["integration"]),
    TypeEntry::new("integration-all", &["integration", "integration-integrity"]),
    TypeEntry::new("static", &["static-default"]),
    TypeEntry::new(
        "static-all",
        &["static-default", "static-legacy", "static-integration-js"],
    ),
    TypeEntry::new(
        "integrity",
        &["static-default", "static-legacy", "integration-integrity"],
    ),
    TypeEntry::new("legacy", &["static-legacy"]),
    TypeEntry::new(
        "default",
        &[
            "unit",
            "unit-static",
            "unit-integration",
            "integration",
            "static-default",
        ],
    ),
];

/// Type used when none is given on the command line
pub const DEFAULT_TYPE: &str = "default";

/// Look up a suite by key
pub fn suite(key: &str) -> Option<&'static SuiteEntry> {
    SUITES.iter().find(|s| s.key == key)
}

/// Names of all types, in declaration order
pub fn type_names() -> Vec<&'static str> {
    TYPES.iter().map(|t| t.name).collect()
}

/// Resolve a type name to its ordered suites
///
/// Matching is case-sensitive. Unknown names fail with every valid type
/// listed in declaration order.
pub fn resolve(type_name: &str) -> Result<Vec<&'static SuiteEntry>, DispatchError> {
    let entry = TYPES
        .iter()
        .find(|t| t.name == type_name)
        .ok_or_else(|| DispatchError::UnknownType {
            given: type_name.to_string(),
            available: type_names(),
        })?;

    Ok(suites_of(entry))
}

/// Suites selected by a type entry
pub fn suites_of(entry: &TypeEntry) -> Vec<&'static SuiteEntry> {
    match entry.suites {
        TypeSuites::All => SUITES.iter().collect(),
        // Keys are checked against SUITES by the catalog tests
        TypeSuites::Keys(keys) => keys.iter().filter_map(|key| suite(key)).collect(),
    }
}
