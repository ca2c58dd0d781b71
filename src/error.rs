//! Error types for PWM channel operations.
//!
//! Every fallible operation funnels into a single [`Error`]: a [`ErrorKind`]
//! naming the step that failed, a context string, and the underlying I/O
//! error when the failure came from the control surface.  Parse and timeout
//! failures carry no I/O cause.

use core::fmt;
use std::io;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Error kind
// ---------------------------------------------------------------------------

/// Which operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The PWM sysfs root is missing: no PWM support in the kernel.
    Unsupported,
    /// The requested `pwmchipN` does not exist.
    InvalidChip,
    /// Opening, writing, closing or polling during export failed.
    ExportFailed,
    /// Export was requested but the channel directory never appeared.
    ExportTimeout,
    SetEnableFailed,
    SetDutyFailed,
    SetPeriodFailed,
    GetEnableFailed,
    GetDutyFailed,
    GetPeriodFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "unsupported"),
            Self::InvalidChip => write!(f, "invalid chip"),
            Self::ExportFailed => write!(f, "export failed"),
            Self::ExportTimeout => write!(f, "export timed out"),
            Self::SetEnableFailed => write!(f, "set enable failed"),
            Self::SetDutyFailed => write!(f, "set duty cycle failed"),
            Self::SetPeriodFailed => write!(f, "set period failed"),
            Self::GetEnableFailed => write!(f, "get enable failed"),
            Self::GetDutyFailed => write!(f, "get duty cycle failed"),
            Self::GetPeriodFailed => write!(f, "get period failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A failed PWM operation.
///
/// Cheap to clone: the I/O cause is shared, so the same error can be both
/// returned to the caller and recorded on the channel handle.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    context: String,
    cause: Option<Arc<io::Error>>,
}

impl Error {
    /// Failure without an OS-level cause (parse error, timeout).
    pub(crate) fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
            cause: None,
        }
    }

    /// Failure caused by the control surface.
    pub(crate) fn io(kind: ErrorKind, context: impl Into<String>, cause: io::Error) -> Self {
        Self {
            kind,
            context: context.into(),
            cause: Some(Arc::new(cause)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The context describing the step that failed, without the cause.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Raw OS error code of the cause, if there is one.
    pub fn os_code(&self) -> Option<i32> {
        self.cause.as_deref().and_then(io::Error::raw_os_error)
    }

    /// The underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        self.cause.as_deref()
    }

    /// Full human-readable message: context plus cause description.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.context)?;
        match &self.cause {
            // std renders OS errors as "<strerror> (os error N)"
            Some(cause) => write!(f, ": {cause}"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl embedded_hal::pwm::Error for Error {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
