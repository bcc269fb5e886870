use crate::error::RecordFormatError;
use crate::record::{number, tokens};

/// Parse a `"<preference> <exchange>"` MX value into `(exchange, preference)`.
///
/// # Errors
///
/// Returns [`RecordFormatError::TokenCount`] unless the value has exactly two tokens, and
/// [`RecordFormatError::InvalidNumber`] if the preference isn't a 16 bit unsigned integer.
pub fn parse(text: &str) -> Result<(String, u16), RecordFormatError> {
    let [preference, exchange] = tokens::<2>(text)?;
    Ok((exchange.to_string(), number(preference)?))
}
