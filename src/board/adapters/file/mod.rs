//! Filesystem adapters scoped to a single directory capability.

mod export;
mod store;

pub use export::DirExportSink;
pub use store::FileBoardStore;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

/// Opens (creating if necessary) the directory at `path`.
fn open_or_create_dir(path: &Utf8Path) -> io::Result<Dir> {
    Dir::create_ambient_dir_all(path, ambient_authority())?;
    Dir::open_ambient_dir(path, ambient_authority())
}

/// Runs blocking filesystem work off the async executor.
async fn run_blocking<F, T>(f: F) -> io::Result<T>
where
    F: FnOnce() -> io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| io::Error::other(format!("task join error: {err}")))?
}
