pub type BlueNoiseResult<T> = Result<T, BlueNoiseError>;

#[derive(thiserror::Error, Debug)]
pub enum BlueNoiseError {
    #[error("validation error: {0}")]
    Validation(String),

    #[cfg(feature = "png")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BlueNoiseError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(BlueNoiseError::validation("x")
            .to_string()
            .contains("validation error:"));
    }

    #[test]
    fn io_preserves_source() {
        let err = BlueNoiseError::from(std::io::Error::other("boom"));
        assert!(err.to_string().contains("boom"));
    }
}
