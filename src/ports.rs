//! Port traits: the boundary between channel logic and the filesystem.
//!
//! ```text
//!   SysfsSurface ──▶ ControlSurface ──▶ PwmChannel
//! ```
//!
//! The channel logic never calls `std::fs` directly; it drives a
//! [`ControlSurface`].  The production adapter is
//! [`SysfsSurface`](crate::adapters::sysfs::SysfsSurface); tests plug in a
//! recording fake.

use std::io;
use std::path::Path;

/// Pseudo-filesystem access used by [`PwmChannel`](crate::PwmChannel).
///
/// Every method may fail.  Errors are plain [`io::Error`]s so OS error codes
/// survive into the channel's error reports.
pub trait ControlSurface {
    /// An open node.  Released only through [`close`](Self::close).
    type Node;

    /// Check that `path` exists.  A missing path must be reported with
    /// [`io::ErrorKind::NotFound`]; any other error is a real failure.
    fn stat(&mut self, path: &Path) -> io::Result<()>;

    fn open_read(&mut self, path: &Path) -> io::Result<Self::Node>;

    fn open_write(&mut self, path: &Path) -> io::Result<Self::Node>;

    /// Single write call.  Returns the number of bytes accepted.
    fn write(&mut self, node: &mut Self::Node, bytes: &[u8]) -> io::Result<usize>;

    /// Single read call into `buf`.  May fail with
    /// [`io::ErrorKind::Interrupted`]; callers retry in that case.
    fn read(&mut self, node: &mut Self::Node, buf: &mut [u8]) -> io::Result<usize>;

    fn close(&mut self, node: Self::Node) -> io::Result<()>;
}

impl<T: ControlSurface + ?Sized> ControlSurface for &mut T {
    type Node = T::Node;

    fn stat(&mut self, path: &Path) -> io::Result<()> {
        (**self).stat(path)
    }

    fn open_read(&mut self, path: &Path) -> io::Result<Self::Node> {
        (**self).open_read(path)
    }

    fn open_write(&mut self, path: &Path) -> io::Result<Self::Node> {
        (**self).open_write(path)
    }

    fn write(&mut self, node: &mut Self::Node, bytes: &[u8]) -> io::Result<usize> {
        (**self).write(node, bytes)
    }

    fn read(&mut self, node: &mut Self::Node, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(node, buf)
    }

    fn close(&mut self, node: Self::Node) -> io::Result<()> {
        (**self).close(node)
    }
}
