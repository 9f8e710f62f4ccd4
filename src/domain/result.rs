//! Result type alias for calbridge

use super::errors::BridgeError;

/// Result type alias for calbridge operations
///
/// # Examples
///
/// ```
/// use calbridge::domain::result::Result;
/// use calbridge::domain::errors::BridgeError;
///
/// fn failing_function() -> Result<()> {
///     Err(BridgeError::InvalidRequest("bad updated_since".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BridgeError>;
