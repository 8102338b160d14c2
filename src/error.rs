use core::fmt;

/// Result alias for `lloyd`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering primitives.
///
/// All of these are detected before the first iteration runs; the fit loop
/// itself cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input had no rows, or rows of width zero.
    EmptyInput,

    /// Row width mismatch (usize).
    DimensionMismatch {
        /// Expected width.
        expected: usize,
        /// Found width.
        found: usize,
    },

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// Initial centroid set has the wrong number of rows.
    CentroidCountMismatch {
        /// Expected row count (k).
        expected: usize,
        /// Found row count.
        found: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Generic error with message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::CentroidCountMismatch { expected, found } => {
                write!(
                    f,
                    "initial centroid count mismatch: expected {expected}, found {found}"
                )
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}
