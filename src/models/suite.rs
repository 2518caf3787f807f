//! Suite and type table entries

/// A test-suite directory plus the fixed arguments always passed for it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuiteEntry {
    /// Unique identifier, e.g. `unit-static`
    pub key: &'static str,
    /// Directory relative to `<base>/dev/tests`
    pub directory: &'static str,
    /// Extra runner arguments, empty when the suite needs none
    pub extra_args: &'static str,
}

impl SuiteEntry {
    pub const fn new(key: &'static str, directory: &'static str) -> Self {
        Self {
            key,
            directory,
            extra_args: "",
        }
    }

    pub const fn with_args(self, extra_args: &'static str) -> Self {
        Self { extra_args, ..self }
    }

    /// Whether this suite contributes extra arguments to the command line
    pub fn has_extra_args(&self) -> bool {
        !self.extra_args.trim().is_empty()
    }
}

/// Which suites a type runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeSuites {
    /// Every suite, in declaration order
    All,
    /// An explicit ordered list of suite keys
    Keys(&'static [&'static str]),
}

/// A user-selectable grouping of suites
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    pub name: &'static str,
    pub suites: TypeSuites,
}

impl TypeEntry {
    pub const fn new(name: &'static str, keys: &'static [&'static str]) -> Self {
        Self {
            name,
            suites: TypeSuites::Keys(keys),
        }
    }

    pub const fn all(name: &'static str) -> Self {
        Self {
            name,
            suites: TypeSuites::All,
        }
    }
}
