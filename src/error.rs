//! Error taxonomy for the edge-detection pipeline.
//!
//! Every error is fatal to the invocation that produced it; there is no
//! partial result to recover.
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CannyError {
    #[error("volume has no slices or no pixels")]
    EmptyInput,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CannyError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CannyError>;

/// Kernel sizes must be positive and odd so the kernel has a centre voxel.
pub(crate) fn check_kernel_size(ksize: usize) -> Result<()> {
    if ksize < 1 || ksize % 2 == 0 {
        return Err(CannyError::invalid(format!(
            "kernel size must be a positive odd integer, got {ksize}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_size_must_be_odd_and_positive() {
        assert!(check_kernel_size(3).is_ok());
        assert!(check_kernel_size(1).is_ok());
        assert!(matches!(
            check_kernel_size(0),
            Err(CannyError::InvalidArgument(_))
        ));
        assert!(matches!(
            check_kernel_size(4),
            Err(CannyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn messages_name_the_problem() {
        let err = CannyError::invalid("fewer than 3 slices");
        assert_eq!(err.to_string(), "invalid argument: fewer than 3 slices");
        assert_eq!(
            CannyError::EmptyInput.to_string(),
            "volume has no slices or no pixels"
        );
    }
}
