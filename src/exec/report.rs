// src/exec/report.rs

//! User-facing build report written to stdout.
//!
//! Every write goes through [`Console`], which holds a mutex around the
//! underlying writer. A whole error block is rendered into one buffer first
//! and written under a single lock, so output from concurrent builds may
//! interleave line by line but never inside a block.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use crate::engine::Trigger;

pub const ERROR_BLOCK_HEADER: &str = "--------- build error ------------------";
pub const ERROR_BLOCK_FOOTER: &str = "========= build error ==================";
pub const SUCCESS_LINE: &str = "# -- build complete!";

/// Line printed for each installed watch target.
pub fn target_line(path: &str) -> String {
    format!("target: {path}")
}

/// Line printed right before a build is spawned.
pub fn announce_line(trigger: &Trigger, command: &str) -> String {
    format!("# -- changed: {trigger} run: {command}")
}

/// Render the delimited block for a failed build.
///
/// Captured stdout comes first, then stderr, both verbatim.
pub fn format_build_error(status: i32, stdout: &[u8], stderr: &[u8]) -> Vec<u8> {
    let mut block = Vec::with_capacity(stdout.len() + stderr.len() + 128);
    block.extend_from_slice(ERROR_BLOCK_HEADER.as_bytes());
    block.push(b'\n');
    block.extend_from_slice(format!("return code:{status}\n").as_bytes());
    push_terminated(&mut block, stdout);
    push_terminated(&mut block, stderr);
    block.extend_from_slice(ERROR_BLOCK_FOOTER.as_bytes());
    block.push(b'\n');
    block
}

fn push_terminated(block: &mut Vec<u8>, chunk: &[u8]) {
    if chunk.is_empty() {
        return;
    }
    block.extend_from_slice(chunk);
    if !chunk.ends_with(b"\n") {
        block.push(b'\n');
    }
}

/// Serialized output sink shared by every build and watcher.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

impl Console {
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// A console that captures everything in memory, plus a handle to read it.
    pub fn in_memory() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (Self::from_writer(buffer.clone()), buffer)
    }

    /// Write one line (a newline is appended).
    pub fn line(&self, line: &str) {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.write_all(&bytes);
    }

    /// Write a pre-rendered block atomically with respect to other writers.
    pub fn block(&self, bytes: &[u8]) {
        self.write_all(bytes);
    }

    fn write_all(&self, bytes: &[u8]) {
        let mut out = self.lock();
        if let Err(err) = out.write_all(bytes).and_then(|_| out.flush()) {
            warn!(error = %err, "failed to write build report");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        // The writer holds no invariant worth refusing a poisoned lock over.
        self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Cloneable in-memory writer backing [`Console::in_memory`].
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn contents(&self) -> Vec<u8> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
