// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

pub static DEFAULT_PROTECTED_ROOTS: [&str; 2] = ["/Library", "/private/var"];

/// Prefix-based heuristic: it never inspects actual filesystem permissions.
#[derive(Clone, Debug)]
pub struct PrivilegePolicy {
    protected_roots: Vec<PathBuf>,
}

impl Default for PrivilegePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED_ROOTS.iter().map(PathBuf::from).collect())
    }
}

impl PrivilegePolicy {
    pub fn new(protected_roots: Vec<PathBuf>) -> Self {
        Self { protected_roots }
    }

    pub fn requires_elevated_privileges(&self, path: &Path) -> bool {
        self.protected_roots.iter().any(|root| path.starts_with(root))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::privileges::PrivilegePolicy;
    use assertor::BooleanAssertion;
    use std::path::{Path, PathBuf};

    #[test]
    fn should_flag_system_level_locations() {
        let policy = PrivilegePolicy::default();

        for path in [
            "/Library/Caches",
            "/Library/Application Support/com.apple.idleassetsd",
            "/private/var/log",
            "/private/var/db/diagnostics",
            "/Library",
        ] {
            assertor::assert_that!(policy.requires_elevated_privileges(Path::new(path))).is_true();
        }
    }

    #[test]
    fn should_not_flag_user_owned_locations() {
        let policy = PrivilegePolicy::default();

        for path in [
            "/Users/someone/Library/Caches",
            "/LibraryBackup/Caches",
            "/private/variables",
            "/System/Library/Caches",
            "/tmp/cachesweep",
        ] {
            assertor::assert_that!(policy.requires_elevated_privileges(Path::new(path))).is_false();
        }
    }

    #[test]
    fn should_honor_custom_protected_roots() {
        let policy = PrivilegePolicy::new(vec![PathBuf::from("/opt/shared")]);

        assertor::assert_that!(policy.requires_elevated_privileges(Path::new("/opt/shared/cache"))).is_true();
        assertor::assert_that!(policy.requires_elevated_privileges(Path::new("/Library/Caches"))).is_false();
    }
}
