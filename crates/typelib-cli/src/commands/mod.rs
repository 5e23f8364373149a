pub mod compile;
pub mod dump;

#[cfg(test)]
mod dump_tests;

use std::io;
use std::path::PathBuf;

use typelib_compiler::CompileError;
use typelib_format::TypelibError;

/// Failure of a CLI command, printed as `error: ...`.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid namespace document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("invalid typelib: {0}")]
    Load(#[from] TypelibError),
}

/// Print the error and exit with status 1.
pub fn exit_on_error(result: Result<(), CommandError>) {
    if let Err(e) = result {
        tracing::debug!("{e:?}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
