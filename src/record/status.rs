//! Response outcome of a probe.

use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::error_handling::RecordError;

/// Whether the probed site answered at all.
///
/// Stored in Postgres as the `response_status` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Status {
    /// The site answered (with any HTTP status).
    #[strum(serialize = "responsive")]
    Responsive,
    /// The site could not be reached.
    #[strum(serialize = "unresponsive")]
    Unresponsive,
}

impl Status {
    /// Canonical lower-case text, as stored and transmitted.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = RecordError;

    /// Parses case-insensitively, so "reSponsive" yields [`Status::Responsive`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Status::iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RecordError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Responsive.as_str(), "responsive");
        assert_eq!(Status::Unresponsive.to_string(), "unresponsive");
    }

    #[test]
    fn test_status_parse_mixed_case() {
        assert_eq!("reSponsive".parse::<Status>().unwrap(), Status::Responsive);
        assert_eq!("UNRESPONSIVE".parse::<Status>().unwrap(), Status::Unresponsive);
        assert_eq!(" responsive ".parse::<Status>().unwrap(), Status::Responsive);
    }

    #[test]
    fn test_status_parse_unknown() {
        assert_eq!(
            "flaky".parse::<Status>(),
            Err(RecordError::UnknownStatus("flaky".to_string()))
        );
    }
}
