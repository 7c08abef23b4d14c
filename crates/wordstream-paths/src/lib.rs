//! # wordstream-paths
//!
//! Where `wordstream` looks for corpus directories.
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod path_resolver;
pub mod path_utils;

pub use path_resolver::{CorpusLocation, PathSource};

/// Environment variable key to override the default data directory.
pub const WORDSTREAM_DATA_DIR: &str = "WORDSTREAM_DATA_DIR";

/// The corpus sub-directory used when none is named.
pub const DEFAULT_CORPUS: &str = "wikitext-2";

/// Default [`PathResolver`] for wordstream.
pub const WORDSTREAM_PATHS: PathResolver = PathResolver {
    qualifier: "io.crates.wordstream",
    organization: "",
    application: "wordstream",
    data_env_vars: &[WORDSTREAM_DATA_DIR],
};
