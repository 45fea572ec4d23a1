use std::fmt;

/// Rejected curve polynomials and out-of-range arc requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// The polynomial does not depend on y.
    NoYDependence,
    /// A factor depending on x alone (vertical line components).
    NotPrimitive { content: String },
    /// Repeated factors.
    NotSquareFree { factor: String },
    ArcOutOfRange { arc: usize, events: usize },
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoYDependence => write!(f, "curve polynomial must have positive degree in y"),
            Self::NotPrimitive { content } => {
                write!(f, "curve polynomial has vertical components: content {content}")
            }
            Self::NotSquareFree { factor } => {
                write!(f, "curve polynomial is not square-free: repeated factor {factor}")
            }
            Self::ArcOutOfRange { arc, events } => {
                write!(f, "arc {arc} out of range for a fiber with {events} events")
            }
        }
    }
}

impl std::error::Error for CurveError {}
