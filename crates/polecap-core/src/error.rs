//! Cap synthesis error types.

/// Errors raised while synthesizing polar-cap geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CapError {
    /// An edge was asked to cross a latitude that does not lie strictly
    /// between its endpoints.
    #[error("edge from latitude {lat_a} to {lat_b} does not cross latitude {target}")]
    InvariantViolation {
        /// Latitude the edge was supposed to cross.
        target: f64,
        /// Latitude of the first endpoint.
        lat_a: f64,
        /// Latitude of the second endpoint.
        lat_b: f64,
    },

    /// A cap threshold outside `(0, 90]` degrees.
    #[error("cap threshold {0} is outside (0, 90] degrees")]
    InvalidThreshold(f64),
}
