use crate::errors::SizeError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Failure while reading whitespace-delimited element values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    Invalid { token: String },
    NotEnoughValues { expected: usize, found: usize },
    Size(SizeError),
}

impl From<SizeError> for ReadError {
    fn from(e: SizeError) -> Self {
        Self::Size(e)
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::Invalid { token } => {
                write!(f, "could not parse element value from {:?}", token)
            }
            Self::NotEnoughValues { expected, found } => {
                write!(f, "expected {} element values, found {}", expected, found)
            }
            Self::Size(e) => {
                write!(f, "{}", e)
            }
        }
    }
}
impl std::error::Error for ReadError {}

/// Parses one whitespace-separated token of `src` into each slot, in order.
/// Tokens beyond the last slot are left unread.
pub(crate) fn fill_from_tokens<'a, T>(
    slots: impl Iterator<Item = &'a mut T>,
    src: &str,
    expected: usize,
) -> Result<(), ReadError>
where
    T: FromStr + 'a,
{
    let mut tokens = src.split_whitespace();
    let mut found = 0;
    for slot in slots {
        let token = tokens
            .next()
            .ok_or(ReadError::NotEnoughValues { expected, found })?;
        *slot = token.parse().map_err(|_| ReadError::Invalid {
            token: token.to_string(),
        })?;
        found += 1;
    }
    Ok(())
}
