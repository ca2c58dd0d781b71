//! sysfs adapter.
//!
//! Implements [`ControlSurface`] with plain `std::fs` calls.  Nodes are
//! `File`s; each read and write is a single syscall so the kernel sees
//! exactly the bytes the channel logic produced.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::ports::ControlSurface;

/// The real PWM class filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysfsSurface;

impl SysfsSurface {
    pub fn new() -> Self {
        Self
    }
}

impl ControlSurface for SysfsSurface {
    type Node = File;

    fn stat(&mut self, path: &Path) -> io::Result<()> {
        fs::metadata(path).map(drop)
    }

    fn open_read(&mut self, path: &Path) -> io::Result<File> {
        File::open(path)
    }

    fn open_write(&mut self, path: &Path) -> io::Result<File> {
        OpenOptions::new().write(true).open(path)
    }

    fn write(&mut self, node: &mut File, bytes: &[u8]) -> io::Result<usize> {
        node.write(bytes)
    }

    fn read(&mut self, node: &mut File, buf: &mut [u8]) -> io::Result<usize> {
        node.read(buf)
    }

    /// std does not surface `close(2)` errors; dropping the file is the
    /// release.
    fn close(&mut self, node: File) -> io::Result<()> {
        drop(node);
        Ok(())
    }
}
