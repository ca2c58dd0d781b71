//! Scoped access to a single control node.
//!
//! Open, transfer once, always close.  The outcome says which stage failed
//! so callers can attach their own context.  A close failure is reported
//! only when the transfer succeeded; otherwise the transfer error wins.

use std::io;
use std::path::Path;

use crate::ports::ControlSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Open,
    Transfer,
    Close,
}

#[derive(Debug)]
pub(crate) struct NodeFailure {
    pub stage: Stage,
    pub source: io::Error,
}

impl NodeFailure {
    fn at(stage: Stage) -> impl FnOnce(io::Error) -> Self {
        move |source| Self { stage, source }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
}

fn with_node<S, T, F>(
    surface: &mut S,
    path: &Path,
    access: Access,
    transfer: F,
) -> Result<T, NodeFailure>
where
    S: ControlSurface,
    F: FnOnce(&mut S, &mut S::Node) -> io::Result<T>,
{
    let mut node = match access {
        Access::Read => surface.open_read(path),
        Access::Write => surface.open_write(path),
    }
    .map_err(NodeFailure::at(Stage::Open))?;

    let outcome = transfer(surface, &mut node);
    let closed = surface.close(node);

    let value = outcome.map_err(NodeFailure::at(Stage::Transfer))?;
    closed.map_err(NodeFailure::at(Stage::Close))?;
    Ok(value)
}

/// Write `bytes` to the node at `path` in a single call.
pub(crate) fn write_node<S: ControlSurface>(
    surface: &mut S,
    path: &Path,
    bytes: &[u8],
) -> Result<(), NodeFailure> {
    with_node(surface, path, Access::Write, |s, node| {
        s.write(node, bytes).map(drop)
    })
}

/// Read up to `N` bytes from the node at `path`, retrying interrupted reads.
pub(crate) fn read_node<S: ControlSurface, const N: usize>(
    surface: &mut S,
    path: &Path,
) -> Result<heapless::Vec<u8, N>, NodeFailure> {
    with_node(surface, path, Access::Read, |s, node| {
        let mut buf = [0u8; N];
        let len = loop {
            match s.read(node, &mut buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => break other?,
            }
        };
        Ok(buf[..len.min(N)].iter().copied().collect())
    })
}
