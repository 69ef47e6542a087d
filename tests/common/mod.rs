//! Shared test utilities for integration and E2E tests.
//!
//! This module provides module metadata fixtures and a temporary-directory
//! helper shared by the test files in `tests/`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_file("modules.yaml", documents::TESTMODULE);
//!     fixture.command().arg("validate").arg("modules.yaml").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::documents;
    #[allow(unused_imports)]
    pub use super::TestFixture;
}

/// Module metadata snippets for testing.
#[allow(dead_code)]
pub mod documents {
    /// The canonical single-document stream for `testmodule`.
    pub const TESTMODULE: &str = "document: modulemd
version: 2
data:
  name: testmodule
  stream: master
  summary: Test
  description: >
    A test module.
  license:
    module:
      - MIT
";

    /// Two documents with dependencies, written in canonical form.
    pub const TWO_MODULES: &str = "document: modulemd
version: 2
data:
  name: perl
  stream: \"5.26\"
  version: 20180205135154
  summary: Practical Extraction and Report Language
  description: >
    Perl is a high-level programming language.
  license:
    module:
      - MIT
    content:
      - Artistic
      - GPL+
  dependencies:
    - buildrequires:
        platform:
          - f28
      requires:
        platform:
          - f28
---
document: modulemd
version: 2
data:
  name: python
  stream: \"3.6\"
  summary: Python interpreter
  description: >
    Python is an interpreted language.
  license:
    module:
      - MIT
";

    /// Valid input in a non-canonical layout: shuffled keys, unsorted
    /// licenses, plain description and an unknown key.
    pub const UNORDERED: &str = "version: 2
data:
  license:
    module: [MIT, BSD, MIT]
  description: A test module.
  summary: Test
  stream: master
  name: testmodule
  xmd:
    builder: local
document: modulemd
";

    /// A document without the mandatory summary.
    pub const MISSING_SUMMARY: &str = "document: modulemd
version: 2
data:
  description: >
    A test module.
  license:
    module:
      - MIT
";

    /// A document that declares an unknown schema version.
    pub const UNSUPPORTED_VERSION: &str = "document: modulemd
version: 99
data:
  summary: Test
  description: A test module.
  license:
    module: [MIT]
";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "document: modulemd\ndata: [unclosed\n";
}

/// A test fixture that provides a temporary directory populated with files.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_file("modules.yaml", documents::TESTMODULE);
/// let mut cmd = fixture.command();
/// cmd.arg("fmt").arg("modules.yaml").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `name` inside the fixture.
    #[allow(dead_code)]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command for the `modulemd` binary running in this fixture.
    ///
    /// Colors are disabled so output assertions see the plain markers.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("modulemd");
        cmd.current_dir(self.path())
            .env_remove("MODULEMD_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_file() {
        let fixture = TestFixture::new().with_file("modules.yaml", documents::TESTMODULE);
        assert!(fixture.file_path("modules.yaml").exists());
    }

    #[test]
    fn test_fixtures_are_valid_yaml() {
        let fixtures = [
            documents::TESTMODULE,
            documents::UNORDERED,
            documents::MISSING_SUMMARY,
            documents::UNSUPPORTED_VERSION,
        ];

        for fixture in fixtures {
            serde_yaml::from_str::<serde_yaml::Value>(fixture).expect("Fixture should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(documents::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
