//! # Corpus Directory Resolution
//!
//! A corpus is a directory holding its `train` / `valid` / `test` splits.
//! Corpora live side by side under a data root; [`PathResolver`] finds the
//! root, and the named corpus inside it.

use std::{
    env,
    fmt,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, bail};
use directories_next::ProjectDirs;

use crate::path_utils::expand_path;

/// Static configuration for application path resolution.
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// Environment variables naming a data root; first set wins.
    pub data_env_vars: &'static [&'static str],
}

/// Where a data root or corpus directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// Passed by the caller.
    Explicit,

    /// Read from this environment variable.
    EnvVar(&'static str),

    /// The platform data directory.
    Platform,
}

impl fmt::Display for PathSource {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            PathSource::Explicit => write!(f, "explicit path"),
            PathSource::EnvVar(var) => write!(f, "${var}"),
            PathSource::Platform => write!(f, "platform data dir"),
        }
    }
}

/// A resolved corpus directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLocation {
    /// The corpus directory.
    pub dir: PathBuf,

    /// How `dir` was found.
    pub source: PathSource,
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.organization, self.application, self.qualifier)
    }

    /// Resolve the data root.
    ///
    /// Resolution Order:
    /// 1. `root`, if present.
    /// 2. ``env[$VAR]`` for each `self.data_env_vars` which is set and non-empty; in order.
    /// 3. `self.project_dirs().data_dir()`, if present.
    /// 4. `None`
    ///
    /// On Linux the platform root is `$XDG_DATA_HOME/wordstream`, falling back to
    /// `$HOME/.local/share/wordstream`.
    pub fn resolve_data_dir(
        &self,
        root: Option<&Path>,
    ) -> Option<(PathBuf, PathSource)> {
        if let Some(root) = root {
            return Some((root.to_path_buf(), PathSource::Explicit));
        }

        let from_env = self.data_env_vars.iter().find_map(|&var| {
            env::var_os(var)
                .filter(|v| !v.is_empty())
                .map(|v| (PathBuf::from(v), PathSource::EnvVar(var)))
        });
        if from_env.is_some() {
            return from_env;
        }

        self.project_dirs()
            .map(|pds| (pds.data_dir().to_path_buf(), PathSource::Platform))
    }

    /// Resolve a corpus directory.
    ///
    /// An explicit `path` names the corpus directory itself, after `~` and
    /// `$VAR` expansion. Otherwise the corpus is `corpus` under the resolved
    /// data root; `corpus` must then be a single plain directory name.
    pub fn resolve_corpus_dir(
        &self,
        path: Option<&str>,
        corpus: &str,
    ) -> anyhow::Result<CorpusLocation> {
        if let Some(path) = path {
            let dir = expand_path(path).with_context(|| format!("expanding {path:?}"))?;
            return Ok(CorpusLocation {
                dir,
                source: PathSource::Explicit,
            });
        }

        let mut components = Path::new(corpus).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            bail!("corpus name {corpus:?} must be a single directory name");
        }

        let (root, source) = self.resolve_data_dir(None).with_context(|| {
            format!(
                "no data directory; pass a path or set one of {:?}",
                self.data_env_vars
            )
        })?;
        Ok(CorpusLocation {
            dir: root.join(corpus),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const PRIMARY_ENV: &str = "_WS_TEST_DATA_PRIMARY";
    const FALLBACK_ENV: &str = "_WS_TEST_DATA_FALLBACK";

    const TEST_PATHS: PathResolver = PathResolver {
        qualifier: "io",
        organization: "crates",
        application: "wordstream-test",
        data_env_vars: &[PRIMARY_ENV, FALLBACK_ENV],
    };

    fn set_env(
        var: &str,
        value: Option<&str>,
    ) {
        unsafe {
            match value {
                Some(value) => env::set_var(var, value),
                None => env::remove_var(var),
            }
        }
    }

    #[test]
    #[serial]
    fn test_data_root_order() {
        set_env(PRIMARY_ENV, None);
        set_env(FALLBACK_ENV, None);

        let platform = TEST_PATHS
            .project_dirs()
            .expect("failed to get project dirs")
            .data_dir()
            .to_path_buf();
        assert_eq!(
            TEST_PATHS.resolve_data_dir(None),
            Some((platform, PathSource::Platform))
        );

        set_env(FALLBACK_ENV, Some("/srv/corpora"));
        assert_eq!(
            TEST_PATHS.resolve_data_dir(None),
            Some((PathBuf::from("/srv/corpora"), PathSource::EnvVar(FALLBACK_ENV)))
        );

        // An empty value does not shadow later variables.
        set_env(PRIMARY_ENV, Some(""));
        assert_eq!(
            TEST_PATHS.resolve_data_dir(None).map(|(_, s)| s),
            Some(PathSource::EnvVar(FALLBACK_ENV))
        );

        set_env(PRIMARY_ENV, Some("/mnt/lm-data"));
        assert_eq!(
            TEST_PATHS.resolve_data_dir(None),
            Some((PathBuf::from("/mnt/lm-data"), PathSource::EnvVar(PRIMARY_ENV)))
        );

        // The caller's root beats every variable.
        assert_eq!(
            TEST_PATHS.resolve_data_dir(Some(Path::new("/home/lm/data"))),
            Some((PathBuf::from("/home/lm/data"), PathSource::Explicit))
        );

        set_env(PRIMARY_ENV, None);
        set_env(FALLBACK_ENV, None);
    }

    #[test]
    #[serial]
    fn test_resolve_corpus_dir() {
        set_env(PRIMARY_ENV, Some("/srv/corpora"));
        set_env(FALLBACK_ENV, None);

        assert_eq!(
            TEST_PATHS.resolve_corpus_dir(None, "wikitext-2").unwrap(),
            CorpusLocation {
                dir: PathBuf::from("/srv/corpora/wikitext-2"),
                source: PathSource::EnvVar(PRIMARY_ENV),
            }
        );

        // An explicit directory is the corpus itself; the name is ignored.
        assert_eq!(
            TEST_PATHS
                .resolve_corpus_dir(Some("${_WS_TEST_DATA_PRIMARY}/ptb"), "wikitext-2")
                .unwrap(),
            CorpusLocation {
                dir: PathBuf::from("/srv/corpora/ptb"),
                source: PathSource::Explicit,
            }
        );

        for bad in ["", "..", "a/b", "/abs"] {
            assert!(TEST_PATHS.resolve_corpus_dir(None, bad).is_err(), "{bad:?}");
        }

        set_env(PRIMARY_ENV, None);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(
            PathSource::EnvVar("WORDSTREAM_DATA_DIR").to_string(),
            "$WORDSTREAM_DATA_DIR"
        );
        assert_eq!(PathSource::Explicit.to_string(), "explicit path");
    }
}
