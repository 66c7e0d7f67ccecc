//! Error types for N-body system construction and mutation.

use std::error::Error;
use std::fmt;

use orrery_core::BodyId;

/// Errors from system construction, setup helpers, and merges.
///
/// All of these are contract violations caught at the boundary; the
/// integration step itself never fails.
#[derive(Clone, Debug, PartialEq)]
pub enum SystemError {
    /// A body was supplied with zero, negative, or non-finite mass.
    NonPositiveMass {
        /// The offending value.
        value: f64,
    },
    /// A body was supplied with zero, negative, or non-finite radius.
    NonPositiveRadius {
        /// The offending value.
        value: f64,
    },
    /// An orbit radius is zero, negative, or non-finite.
    NonPositiveOrbitRadius {
        /// The offending value.
        value: f64,
    },
    /// An eccentricity is outside `[0, 1)`.
    EccentricityOutOfRange {
        /// The offending value.
        value: f64,
    },
    /// A referenced body id is not present in the system.
    UnknownBody {
        /// The missing id.
        id: BodyId,
    },
    /// A merge referenced the same body twice.
    MergeWithSelf {
        /// The duplicated id.
        id: BodyId,
    },
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMass { value } => {
                write!(f, "body mass must be positive, got {value}")
            }
            Self::NonPositiveRadius { value } => {
                write!(f, "body radius must be positive, got {value}")
            }
            Self::NonPositiveOrbitRadius { value } => {
                write!(f, "orbit radius must be positive, got {value}")
            }
            Self::EccentricityOutOfRange { value } => {
                write!(f, "eccentricity must be in [0, 1), got {value}")
            }
            Self::UnknownBody { id } => write!(f, "no body with id {id}"),
            Self::MergeWithSelf { id } => {
                write!(f, "cannot merge body {id} with itself")
            }
        }
    }
}

impl Error for SystemError {}
