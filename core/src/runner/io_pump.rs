use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::RunnerError;

/// One completed line read off a child stream, newline trimmed.
#[derive(Debug)]
pub struct LineTap {
    pub line: String,
    pub stream: LineStream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStream {
    Stdout,
    Stderr,
}

pub fn pump_stdout<R>(
    rd: R,
    line_tx: mpsc::Sender<LineTap>,
    quiet: bool,
) -> JoinHandle<Result<String, RunnerError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    pump(
        rd,
        tokio::io::stdout(),
        "stdout",
        line_tx,
        quiet,
        LineStream::Stdout,
    )
}

pub fn pump_stderr<R>(
    rd: R,
    line_tx: mpsc::Sender<LineTap>,
    quiet: bool,
) -> JoinHandle<Result<String, RunnerError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    pump(
        rd,
        tokio::io::stderr(),
        "stderr",
        line_tx,
        quiet,
        LineStream::Stderr,
    )
}

/// Drain one child stream to EOF. Raw bytes accumulate into a private
/// capture buffer (returned on completion); unless quiet, each chunk is
/// echoed to the parent's matching stream; completed lines go out over
/// `line_tx` for the log writer.
fn pump<R, W>(
    mut rd: R,
    mut wr: W,
    label: &'static str,
    line_tx: mpsc::Sender<LineTap>,
    quiet: bool,
    stream: LineStream,
) -> JoinHandle<Result<String, RunnerError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
    W: tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 16 * 1024];
        let mut captured: Vec<u8> = Vec::with_capacity(8 * 1024);
        let mut line_buf: Vec<u8> = Vec::with_capacity(8 * 1024);

        loop {
            let n = rd.read(&mut buf).await.map_err(|e| RunnerError::StreamIo {
                stream: label,
                source: e,
            })?;
            if n == 0 {
                break;
            }

            captured.extend_from_slice(&buf[..n]);

            if !quiet {
                wr.write_all(&buf[..n])
                    .await
                    .map_err(|e| RunnerError::StreamIo {
                        stream: label,
                        source: e,
                    })?;
                wr.flush().await.map_err(|e| RunnerError::StreamIo {
                    stream: label,
                    source: e,
                })?;
            }

            line_buf.extend_from_slice(&buf[..n]);
            while let Some(pos) = line_buf.iter().position(|&b| b == b'\n') {
                let mut one = line_buf.drain(..=pos).collect::<Vec<u8>>();
                trim_newline(&mut one);
                let line = String::from_utf8_lossy(&one).to_string();
                let _ = line_tx.send(LineTap { line, stream }).await;
            }
        }

        // EOF flush: deliver the last partial line if it doesn't end with '\n'.
        if !line_buf.is_empty() {
            trim_newline(&mut line_buf);
            if !line_buf.is_empty() {
                let line = String::from_utf8_lossy(&line_buf).to_string();
                let _ = line_tx.send(LineTap { line, stream }).await;
            }
        }

        Ok(String::from_utf8_lossy(&captured).to_string())
    })
}

fn trim_newline(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}
