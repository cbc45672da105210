//! Shell artifacts generated from resolved configuration.
//!
//! Every generator resolves all of its inputs before touching the
//! filesystem, so a configuration error never leaves a partial artifact.

pub mod runner;
pub mod server;

use std::path::Path;

use tracing::info;

use crate::Error;

/// Writes `contents` to `path` and marks it executable (`0o755` on Unix).
pub(crate) fn write_executable(path: &Path, contents: &str) -> Result<(), Error> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    std::fs::write(path, contents).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .map_err(write_error)?;
    }

    info!(path = %path.display(), "wrote script");
    Ok(())
}

/// Quotes `arg` for a POSIX shell unless it only contains safe characters.
pub(crate) fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
