use std::path::PathBuf;

/// Startup configuration failures. These abort the whole run before any
/// test case executes; they are never reported as per-file failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured corpus root does not exist or is not a directory.
    #[error("corpus root is not a directory: {}", .path.display())]
    RootNotADirectory { path: PathBuf },

    /// A required `good/` or `bad/` subtree is missing under the root.
    #[error("missing corpus subtree: {}", .path.display())]
    MissingSubtree { path: PathBuf },

    /// A corpus directory exists but cannot be enumerated.
    #[error("cannot read corpus directory {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}
