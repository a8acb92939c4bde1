//! Helps parse the arguments of the JSON challenge definitions

use serde::de::DeserializeOwned;

use crate::challenge::jagged::RaggedMatrix;
use crate::challenge::polynomial::Polynomial;
use crate::error::{Error, Result};

/// Deserialize the argument `key` of a testcase.
///
/// A missing key and an explicit `null` are both reported as [Error::ArgumentNull]; anything that
/// does not fit `T` is an [Error::InvalidArgument].
pub fn get_any<T: DeserializeOwned>(args: &serde_json::Value, key: &str) -> Result<T> {
    get_maybe(args, key)?.ok_or_else(|| Error::null(key))
}

/// Like [get_any], but absence is not an error.
pub fn get_maybe<T: DeserializeOwned>(args: &serde_json::Value, key: &str) -> Result<Option<T>> {
    let raw = &args[key];
    if raw.is_null() {
        return Ok(None);
    }
    serde_json::from_value(raw.clone())
        .map(Some)
        .map_err(|e| Error::InvalidArgument(format!("{key}: {e}")))
}

/// Read a ragged matrix of [i32], a list of lists of numbers.
#[inline]
pub fn get_matrix(args: &serde_json::Value, key: &str) -> Result<RaggedMatrix> {
    get_any(args, key)
}

/// Read a [Polynomial] from its list of coefficients.
///
/// An empty list fails with [Error::EmptyCoefficients], not with a parsing error.
pub fn get_polynomial(args: &serde_json::Value, key: &str) -> Result<Polynomial> {
    let coefficients: Vec<f64> = get_any(args, key)?;
    Polynomial::new(coefficients)
}

pub fn get_maybe_polynomial(args: &serde_json::Value, key: &str) -> Result<Option<Polynomial>> {
    get_maybe::<Vec<f64>>(args, key)?
        .map(Polynomial::new)
        .transpose()
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_get_any_absent() {
        let args = json!({ "here": 1, "null": null });
        assert_eq!(get_any::<i64>(&args, "here"), Ok(1));
        assert_eq!(get_any::<i64>(&args, "null"), Err(Error::null("null")));
        assert_eq!(get_any::<i64>(&args, "gone"), Err(Error::null("gone")));
        assert_eq!(get_maybe::<i64>(&args, "gone"), Ok(None));
    }

    #[test]
    fn test_get_any_wrong_type() {
        let args = json!({ "matrix": [[1, 2], "three"] });
        let err = get_matrix(&args, "matrix").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_get_matrix_out_of_i32_range() {
        let args = json!({ "matrix": [[1, 4294967296_i64]] });
        assert!(matches!(
            get_matrix(&args, "matrix"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_get_polynomial() {
        let args = json!({ "p": [1, 2.5], "empty": [] });
        assert_eq!(get_polynomial(&args, "p").unwrap().coefficients(), &[1.0, 2.5]);
        assert_eq!(
            get_polynomial(&args, "empty").unwrap_err(),
            Error::EmptyCoefficients
        );
        assert_eq!(get_maybe_polynomial(&args, "gone"), Ok(None));
        assert_eq!(
            get_maybe_polynomial(&args, "empty"),
            Err(Error::EmptyCoefficients)
        );
    }
}
