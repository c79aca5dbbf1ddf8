// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::domain::models::CacheTarget;
use anyhow::Context;
use std::path::PathBuf;

static HOME_PREFIX: &str = "~";

struct KnownLocation {
    path: &'static str,
    name: &'static str,
    description: &'static str,
    is_critical: bool,
}

static KNOWN_LOCATIONS: [KnownLocation; 13] = [
    KnownLocation {
        path: "~/Library/Containers/com.apple.CoreDevice.CoreDeviceService/Data/Library/Caches/AppInstallationBinaryDeltas",
        name: "Core Device Service",
        description: "Caches for CoreDevice service, used for managing device connections and app installations (mainly for development).",
        is_critical: false,
    },
    KnownLocation {
        path: "~/Library/Containers/com.apple.wallpaper.agent/Data/Library/Caches",
        name: "Wallpaper Agent",
        description: "Wallpaper image cache and related data used by macOS wallpaper services.",
        is_critical: false,
    },
    KnownLocation {
        path: "~/Library/Caches",
        name: "User Caches",
        description: "General cache directory for user applications and system agents.",
        is_critical: false,
    },
    KnownLocation {
        path: "/Library/Caches",
        name: "System Caches",
        description: "Global cache directory used by system daemons and applications.",
        is_critical: false,
    },
    KnownLocation {
        path: "/Library/HTTPStorages",
        name: "HTTP Storages",
        description: "Caches for HTTP requests, cookies, and URL session data used by system services and apps.",
        is_critical: false,
    },
    KnownLocation {
        path: "/Library/Application Support/com.apple.idleassetsd",
        name: "Idle Assets",
        description: "Caches used by the IdleAssets daemon for preloaded background assets.",
        is_critical: false,
    },
    KnownLocation {
        path: "/Library/Logs",
        name: "System Logs",
        description: "System and application log files for all users.",
        is_critical: true,
    },
    KnownLocation {
        path: "/Library/Preferences/Logging",
        name: "Logging Preferences",
        description: "System logging configuration and preference data.",
        is_critical: true,
    },
    KnownLocation {
        path: "/private/var/log",
        name: "Core System Logs",
        description: "Primary system log directory containing kernel, install, and diagnostic logs.",
        is_critical: true,
    },
    KnownLocation {
        path: "/private/var/db/diagnostics",
        name: "Diagnostics Reports",
        description: "Diagnostic and analytics reports collected by macOS.",
        is_critical: true,
    },
    KnownLocation {
        path: "/private/var/db/powerlog",
        name: "Power Logs",
        description: "Logs related to power management and battery usage.",
        is_critical: false,
    },
    KnownLocation {
        path: "/private/var/tmp",
        name: "Temporary Files",
        description: "Temporary storage used by system and apps; cleared periodically.",
        is_critical: false,
    },
    KnownLocation {
        path: "/System/Library/Caches",
        name: "System Library Caches",
        description: "Caches used by macOS system components; should not be modified manually.",
        is_critical: true,
    },
];

#[derive(Debug)]
pub enum CatalogSource {
    BuiltIn,
    JsonFile(PathBuf),
}

pub struct CatalogLoader {
    home_dir: Option<PathBuf>,
}

impl CatalogLoader {
    pub fn new(home_dir: Option<PathBuf>) -> Self {
        Self { home_dir }
    }

    pub fn load(&self, source: &CatalogSource) -> anyhow::Result<Vec<CacheTarget>> {
        let declared = match source {
            CatalogSource::BuiltIn => KNOWN_LOCATIONS
                .iter()
                .map(|location| {
                    CacheTarget::with(location.path, location.name, location.description, location.is_critical)
                })
                .collect::<Vec<_>>(),
            CatalogSource::JsonFile(catalog_file) => {
                let contents = std::fs::read(catalog_file)
                    .with_context(|| format!("cachesweep.catalog : cannot read {:?}", catalog_file))?;
                let targets: Vec<CacheTarget> = serde_json::from_slice(&contents)
                    .with_context(|| format!("cachesweep.catalog : malformed catalog {:?}", catalog_file))?;
                log::info!("[cachesweep.catalog] loaded {} targets from {:?}", targets.len(), catalog_file);
                targets
            },
        };

        let resolved = declared
            .into_iter()
            .filter_map(|target| self.resolve_home(target))
            .collect();

        Ok(resolved)
    }

    fn resolve_home(&self, mut target: CacheTarget) -> Option<CacheTarget> {
        let Ok(relative) = target.path.strip_prefix(HOME_PREFIX) else {
            return Some(target);
        };

        match &self.home_dir {
            Some(home) => {
                target.path = home.join(relative);
                Some(target)
            },
            None => {
                log::warn!("[cachesweep.catalog] no home directory; skipping {}", target.name);
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::infra::catalog::{CatalogLoader, CatalogSource};
    use assertor::{BooleanAssertion, EqualityAssertion, ResultAssertion};
    use std::fs;
    use std::path::PathBuf;
    use temp_dir::TempDir;

    #[test]
    fn should_resolve_builtin_locations_against_home() {
        let loader = CatalogLoader::new(Some(PathBuf::from("/Users/someone")));

        let targets = loader.load(&CatalogSource::BuiltIn).expect("cannot load catalog");

        assertor::assert_that!(targets.len()).is_equal_to(13);
        let user_caches = targets
            .iter()
            .find(|target| target.name == "User Caches")
            .expect("missing user caches");
        assertor::assert_that!(user_caches.path.clone()).is_equal_to(PathBuf::from("/Users/someone/Library/Caches"));
        assertor::assert_that!(targets.iter().all(|target| target.size == 0)).is_true();
    }

    #[test]
    fn should_skip_home_relative_locations_without_home() {
        let loader = CatalogLoader::new(None);

        let targets = loader.load(&CatalogSource::BuiltIn).expect("cannot load catalog");

        assertor::assert_that!(targets.len()).is_equal_to(10);
        assertor::assert_that!(targets.iter().all(|target| target.path.is_absolute())).is_true();
    }

    #[test]
    fn should_load_custom_catalog_from_json() {
        let sandbox = TempDir::new().expect("cannot create temp dir");
        let catalog_file = sandbox.path().join("catalog.json");
        let contents = r#"
            [
                { "path": "~/.cache/pip", "name": "Pip", "description": "Wheels", "critical": false },
                { "path": "/var/cache/apt", "name": "Apt", "description": "Packages", "critical": true }
            ]
        "#;
        fs::write(&catalog_file, contents).expect("cannot write catalog");
        let loader = CatalogLoader::new(Some(PathBuf::from("/home/someone")));

        let targets = loader
            .load(&CatalogSource::JsonFile(catalog_file))
            .expect("cannot load catalog");

        let paths = targets.iter().map(|target| target.path.clone()).collect::<Vec<_>>();
        assertor::assert_that!(paths).is_equal_to(vec![
            PathBuf::from("/home/someone/.cache/pip"),
            PathBuf::from("/var/cache/apt"),
        ]);
        assertor::assert_that!(targets[1].is_critical).is_true();
    }

    #[test]
    fn should_reject_malformed_catalog() {
        let sandbox = TempDir::new().expect("cannot create temp dir");
        let catalog_file = sandbox.path().join("catalog.json");
        fs::write(&catalog_file, "{ not json").expect("cannot write catalog");
        let loader = CatalogLoader::new(None);

        let loaded = loader.load(&CatalogSource::JsonFile(catalog_file));

        assertor::assert_that!(loaded).is_err();
    }
}
