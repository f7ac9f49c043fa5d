//! Random key generation for exercising the tree.
//!
//! This is a thin collaborator around [`rand`]: it produces an array of
//! random keys for [`Tree::build`](crate::tree::Tree::build) after validating
//! the requested length and range.

use rand::Rng;
use thiserror::Error;

/// The requested key array could not be generated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenError {
    /// The requested length was zero.
    #[error("array length must be greater than 0")]
    EmptyLength,
    /// The lower bound of the range was above the upper bound.
    #[error("minimum value {min} cannot be greater than the maximum value {max}")]
    InvertedRange {
        /// The requested lower bound.
        min: i32,
        /// The requested upper bound.
        max: i32,
    },
}

/// Generates `len` random keys drawn uniformly from `min..=max`. The result
/// may contain duplicates; building a tree from it collapses them.
///
/// # Examples
///
/// ```
/// use balanced_bst::gen::random_keys;
///
/// let keys = random_keys(10, 0, 100).unwrap();
///
/// assert_eq!(keys.len(), 10);
/// assert!(keys.iter().all(|key| (0..=100).contains(key)));
/// ```
pub fn random_keys(len: usize, min: i32, max: i32) -> Result<Vec<i32>, GenError> {
    if len == 0 {
        return Err(GenError::EmptyLength);
    }
    if min > max {
        return Err(GenError::InvertedRange { min, max });
    }

    let mut rng = rand::thread_rng();
    Ok((0..len).map(|_| rng.gen_range(min..=max)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_length() {
        assert_eq!(random_keys(0, 0, 100), Err(GenError::EmptyLength));
    }

    #[test]
    fn rejects_inverted_range() {
        assert_eq!(
            random_keys(5, 10, 1),
            Err(GenError::InvertedRange { min: 10, max: 1 })
        );
    }

    #[test]
    fn keys_stay_in_range() {
        let keys = random_keys(100, -5, 5).unwrap();

        assert_eq!(keys.len(), 100);
        assert!(keys.iter().all(|key| (-5..=5).contains(key)));
    }

    #[test]
    fn single_value_range() {
        assert_eq!(random_keys(3, 7, 7), Ok(vec![7, 7, 7]));
    }
}
