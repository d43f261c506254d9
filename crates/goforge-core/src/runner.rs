//! Streaming subprocess execution.
//!
//! One invocation at a time: spawn the tool, drain stdout and stderr with
//! one reader task each so neither pipe can fill up and stall the child,
//! forward every line to the caller's sink, then wait for exit. Lines keep
//! their order within a stream; there is no ordering guarantee between the
//! two streams.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::error::ExecError;

/// Callback invoked once per line of subprocess output.
pub type LineSink = Arc<dyn Fn(String) + Send + Sync>;

/// Run `tool` with `args` in `dir`, streaming output to `sink`.
///
/// Returns only after the process has exited and both output streams are
/// fully drained, so no line is lost past completion. A missing sink
/// discards output silently. Non-zero exit is an error; there are no
/// retries and no timeout.
pub async fn run_tool(
    tool: &str,
    dir: &Path,
    args: &[&str],
    sink: Option<LineSink>,
) -> Result<(), ExecError> {
    tracing::debug!(tool, ?args, dir = %dir.display(), "running tool");

    let mut child = Command::new(tool)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExecError::Spawn {
            tool: tool.to_string(),
            source,
        })?;

    // Both handles are present after a spawn with Stdio::piped().
    let stdout = child.stdout.take().expect("stdout piped");
    let stderr = child.stderr.take().expect("stderr piped");

    let out_task = tokio::spawn(stream_lines(stdout, sink.clone()));
    let err_task = tokio::spawn(stream_lines(stderr, sink));

    // Readers finish before wait(), so output never races process exit.
    let _ = out_task.await;
    let _ = err_task.await;

    let status = child.wait().await.map_err(|source| ExecError::Wait {
        tool: tool.to_string(),
        source,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(ExecError::Failed {
            tool: tool.to_string(),
            status,
        })
    }
}

/// Forward each line from `reader` to `sink`. Without a sink the stream is
/// still drained so the child never blocks on a full pipe.
async fn stream_lines<R>(reader: R, sink: Option<LineSink>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(sink) = &sink {
            sink(line);
        }
    }
}
