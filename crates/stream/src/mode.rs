/// Direction of a stream, fixed when it is opened.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Bytes flow from the transport to the caller.
    Read,
    /// Bytes flow from the caller to the transport.
    Write,
}

impl Direction {
    /// Parses an fopen-style mode string.
    ///
    /// Only the first character is significant: `r` selects reading and `w`
    /// selects writing. Anything else, including an empty mode, is rejected.
    pub fn from_mode(mode: &str) -> Result<Self, crate::StreamError> {
        match mode.as_bytes().first() {
            Some(b'r') => Ok(Self::Read),
            Some(b'w') => Ok(Self::Write),
            _ => Err(crate::StreamError::InvalidMode(mode.to_owned())),
        }
    }
}
