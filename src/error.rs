//! Error type shared by both exercises

use thiserror::Error;

use crate::challenge::jagged::RowKey;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A required argument was absent (`null` or missing in the challenge definition).
    #[error("required argument '{name}' is absent")]
    ArgumentNull { name: String },

    #[error("a polynomial needs at least one coefficient")]
    EmptyCoefficients,

    /// Max and min have no value for a row without elements.
    #[error("row {row} is empty and has no {key}")]
    EmptyRow { row: usize, key: RowKey },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index {index} is out of range for a polynomial of degree {degree}")]
    IndexOutOfRange { index: i64, degree: usize },

    #[error("the sum of row {row} does not fit into a 32 bit signed integer")]
    ArithmeticOverflow { row: usize },
}

impl Error {
    pub fn null(name: &str) -> Self {
        Self::ArgumentNull {
            name: name.to_string(),
        }
    }

    /// True for every flavour of invalid argument: absent, empty or malformed input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::ArgumentNull { .. }
                | Self::EmptyCoefficients
                | Self::EmptyRow { .. }
                | Self::InvalidArgument(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_invalid_argument_grouping() {
        assert!(Error::null("matrix").is_invalid_argument());
        assert!(Error::EmptyCoefficients.is_invalid_argument());
        assert!(Error::EmptyRow {
            row: 0,
            key: RowKey::Max
        }
        .is_invalid_argument());
        assert!(!Error::ArithmeticOverflow { row: 2 }.is_invalid_argument());
        assert!(!Error::IndexOutOfRange {
            index: -1,
            degree: 3
        }
        .is_invalid_argument());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::null("coefficients").to_string(),
            "required argument 'coefficients' is absent"
        );
        assert_eq!(
            Error::EmptyRow {
                row: 1,
                key: RowKey::Min
            }
            .to_string(),
            "row 1 is empty and has no min"
        );
    }
}
