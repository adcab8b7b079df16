//! Driver error taxonomy
//!
//! The chip itself never reports failures. Everything that can go wrong is
//! either a bus transfer failing or a caller handing in a value that has
//! no register behind it.

use core::fmt;

/// Invalid argument passed to a driver operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgumentError {
    /// Channel number outside 0-16
    ChannelOutOfRange(u8),
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::ChannelOutOfRange(n) => {
                write!(f, "channel {} out of range (0-16)", n)
            }
        }
    }
}

/// Error from a driver operation
///
/// `E` is the error type of the underlying register bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transfer failed
    Transport(E),
    /// An argument was rejected before touching the bus
    InvalidArgument(ArgumentError),
}

impl<E> Error<E> {
    /// Check if this is a bus failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl<E> From<ArgumentError> for Error<E> {
    fn from(err: ArgumentError) -> Self {
        Error::InvalidArgument(err)
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "transport error: {}", err),
            Error::InvalidArgument(err) => write!(f, "invalid argument: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_error_converts() {
        let err: Error<()> = ArgumentError::ChannelOutOfRange(17).into();
        assert_eq!(err, Error::InvalidArgument(ArgumentError::ChannelOutOfRange(17)));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_display() {
        let err: Error<&str> = Error::Transport("nack");
        assert_eq!(err.to_string(), "transport error: nack");

        let err: Error<&str> = ArgumentError::ChannelOutOfRange(42).into();
        assert_eq!(err.to_string(), "invalid argument: channel 42 out of range (0-16)");
    }
}
