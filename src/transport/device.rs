//! # Raw Device Transport
//!
//! Writes label data straight to a printer device node, such as the USB
//! printer class device `/dev/usb/lp0` on Linux or a serial port that has
//! already been configured.
//!
//! The device is never created: a missing path is an error rather than a
//! new regular file full of ZPL.
//!
//! ## Chunked Writes
//!
//! Large graphic fields can exceed the kernel's printer buffer. Data larger
//! than the chunk size is written in pieces with a short pause between
//! them. The default chunk size is 4096 bytes.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{CebraError, Result};

/// Default USB printer device path
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Device Transport
///
/// ## Example
///
/// ```no_run
/// use cebra::transport::DeviceTransport;
///
/// let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
/// transport.write_all(b"^XA^FO10,10^A0N,30,30^FDHello^FS^XZ")?;
/// # Ok::<(), cebra::CebraError>(())
/// ```
pub struct DeviceTransport {
    file: File,
    path: PathBuf,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open an existing printer device for writing.
    ///
    /// ## Errors
    ///
    /// Returns [`CebraError::Transport`] if the device doesn't exist or
    /// permission is denied (the user may need to be in the `lp` group).
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            CebraError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;
        debug!(device = %path.display(), "opened printer device");

        Ok(Self {
            file,
            path: path.to_path_buf(),
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Open with default device path (/dev/usb/lp0)
    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_DEVICE)
    }

    /// Set the chunk size for large writes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    /// Write data to the printer and flush.
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        if data.len() <= self.chunk_size {
            self.write_chunk(data)?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                self.write_chunk(chunk)?;
                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        self.file
            .flush()
            .map_err(|e| CebraError::Transport(format!("Flush failed: {}", e)))?;
        info!(
            device = %self.path.display(),
            bytes = data.len(),
            "sent label data"
        );
        Ok(())
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.file
            .write_all(chunk)
            .map_err(|e| CebraError::Transport(format!("Write failed: {}", e)))
    }
}
