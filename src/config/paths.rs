//! Installation paths
//!
//! Locates the installation root, its vendor directory and the runner
//! executable inside it.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Test root relative to the installation root
pub const TEST_ROOT: &str = "dev/tests";

/// Runner executable relative to the vendor directory
pub const RUNNER_BIN: &str = "bin/paratest";

/// File that records the vendor directory of an installation
const VENDOR_PATH_FILE: &str = "app/etc/vendor_path.php";

const DEFAULT_VENDOR_DIR: &str = "vendor";

/// Where the platform and its third-party executables live
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallPaths {
    /// Absolute installation root
    pub base_dir: PathBuf,
    /// Vendor directory, relative to `base_dir` unless absolute
    pub vendor_dir: String,
    /// Interpreter binary that launches the runner
    pub interpreter: String,
}

impl InstallPaths {
    /// Resolve paths, reading the vendor directory from the installation
    /// when it is not configured
    pub fn resolve(
        base_dir: Option<PathBuf>,
        vendor_dir: Option<String>,
        interpreter: impl Into<String>,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let base_dir = match base_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => cwd.join(dir),
            None => cwd,
        };

        let vendor_dir = match vendor_dir {
            Some(dir) => dir,
            None => read_vendor_dir(&base_dir)?,
        };

        Ok(Self {
            base_dir,
            vendor_dir,
            interpreter: interpreter.into(),
        })
    }

    /// Directory that suite directories are relative to
    pub fn test_root(&self) -> PathBuf {
        self.base_dir.join(TEST_ROOT)
    }

    /// Full path of the runner executable
    pub fn runner_executable(&self) -> PathBuf {
        self.base_dir.join(&self.vendor_dir).join(RUNNER_BIN)
    }
}

fn read_vendor_dir(base_dir: &Path) -> Result<String> {
    let file = base_dir.join(VENDOR_PATH_FILE);
    if !file.exists() {
        debug!(
            "{} not found, assuming '{}'",
            file.display(),
            DEFAULT_VENDOR_DIR
        );
        return Ok(DEFAULT_VENDOR_DIR.to_string());
    }

    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    parse_vendor_path(&content)
        .with_context(|| format!("No vendor path returned by {}", file.display()))
}

/// Extract the quoted string returned by a `vendor_path.php` file
///
/// Only a `return` statement in code counts; comments are ignored.
pub fn parse_vendor_path(content: &str) -> Option<String> {
    let code = strip_comments(content);
    code.match_indices("return").find_map(|(at, keyword)| {
        let before = code[..at].chars().next_back();
        if before.is_some_and(is_word_char) {
            return None;
        }
        returned_string(&code[at + keyword.len()..])
    })
}

fn returned_string(rest: &str) -> Option<String> {
    let trimmed = rest.trim_start();
    let quote = trimmed.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let value = &trimmed[1..];
    let end = value.find(quote)?;
    let value = value[..end].trim();

    (!value.is_empty()).then(|| value.to_string())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Drop `/* */`, `//` and `#` comments, leaving string literals intact
fn strip_comments(content: &str) -> String {
    let mut code = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut quote = None;

    while let Some(c) = chars.next() {
        if let Some(open) = quote {
            code.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    code.push(escaped);
                }
            } else if c == open {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                code.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                code.push(' ');
            }
            '/' if chars.peek() == Some(&'/') => skip_line(&mut chars, &mut code),
            '#' => skip_line(&mut chars, &mut code),
            _ => code.push(c),
        }
    }

    code
}

fn skip_line(chars: &mut impl Iterator<Item = char>, code: &mut String) {
    if chars.any(|c| c == '\n') {
        code.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const VENDOR_PATH_PHP: &str =
        "<?php\n/**\n * Path to Composer vendor directory\n */\nreturn './vendor';\n";

    #[test]
    fn test_parse_vendor_path() {
        assert_eq!(
            parse_vendor_path(VENDOR_PATH_PHP),
            Some("./vendor".to_string())
        );
        assert_eq!(
            parse_vendor_path("<?php return \"lib/vendor\";"),
            Some("lib/vendor".to_string())
        );
    }

    #[test]
    fn test_parse_vendor_path_rejects_garbage() {
        assert_eq!(parse_vendor_path("<?php echo 'hi';"), None);
        assert_eq!(parse_vendor_path("<?php return VENDOR;"), None);
        assert_eq!(parse_vendor_path("<?php return '';"), None);
        assert_eq!(parse_vendor_path("<?php\n// return './vendor';\n"), None);
        assert_eq!(parse_vendor_path("<?php\n$noreturn = 'x';\n"), None);
    }

    #[test]
    fn test_parse_vendor_path_skips_comments() {
        let content =
            "<?php\n/**\n * This file returns the vendor directory\n */\nreturn './vendor';\n";
        assert_eq!(parse_vendor_path(content), Some("./vendor".to_string()));

        let content = "<?php\n# returns 'nothing'\n// return 'old';\nreturn \"lib/vendor\";\n";
        assert_eq!(parse_vendor_path(content), Some("lib/vendor".to_string()));
    }

    #[test]
    fn test_resolve_with_commented_vendor_path_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("app/etc")).unwrap();
        std::fs::write(
            dir.path().join(VENDOR_PATH_FILE),
            "<?php\n/**\n * This file returns the vendor directory\n */\nreturn './vendor';\n",
        )
        .unwrap();

        let paths = InstallPaths::resolve(Some(dir.path().to_path_buf()), None, "php").unwrap();
        assert_eq!(paths.vendor_dir, "./vendor");
    }

    #[test]
    fn test_resolve_reads_vendor_path_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("app/etc")).unwrap();
        std::fs::write(dir.path().join(VENDOR_PATH_FILE), VENDOR_PATH_PHP).unwrap();

        let paths = InstallPaths::resolve(Some(dir.path().to_path_buf()), None, "php").unwrap();
        assert_eq!(paths.vendor_dir, "./vendor");
        assert_eq!(
            paths.runner_executable(),
            dir.path().join("./vendor").join("bin/paratest")
        );
    }

    #[test]
    fn test_resolve_defaults_vendor_dir() {
        let dir = tempdir().unwrap();
        let paths = InstallPaths::resolve(Some(dir.path().to_path_buf()), None, "php").unwrap();
        assert_eq!(paths.vendor_dir, "vendor");
        assert_eq!(paths.test_root(), dir.path().join("dev/tests"));
    }

    #[test]
    fn test_configured_vendor_dir_wins() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("app/etc")).unwrap();
        std::fs::write(dir.path().join(VENDOR_PATH_FILE), VENDOR_PATH_PHP).unwrap();

        let paths = InstallPaths::resolve(
            Some(dir.path().to_path_buf()),
            Some("custom".to_string()),
            "php",
        )
        .unwrap();
        assert_eq!(paths.vendor_dir, "custom");
    }

    #[test]
    fn test_relative_base_dir_is_made_absolute() {
        let paths =
            InstallPaths::resolve(Some(PathBuf::from("shop")), Some("vendor".into()), "php")
                .unwrap();
        assert!(paths.base_dir.is_absolute());
        assert!(paths.base_dir.ends_with("shop"));
    }
}
