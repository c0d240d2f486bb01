use std::future::Future;
use std::io;
use tokio::runtime::Builder;

/// Run `fut` to completion on a fresh single-threaded runtime.
pub(crate) fn block_on<F: Future>(fut: F) -> io::Result<F::Output> {
    let rt = Builder::new_current_thread().enable_all().build()?;
    Ok(rt.block_on(fut))
}
