//! Protocol response types for the teller server
//!
//! Every line the server can send back is one variant of [`Response`];
//! the `Display` impl produces the exact wire text. Keeping responses in
//! an enum lets the session return structured results and the connection
//! layer decide when to close.

use std::fmt;

/// One response line of the wire protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `500 AUTH REQUIRE` - account id recorded, password expected next
    AuthRequire,

    /// `525 OK!` - successful authentication or withdrawal
    Accepted,

    /// `AMNT:<balance>` - balance inquiry result
    Amount(u64),

    /// `BYE` - session end acknowledgement; the connection closes after this
    Bye,

    /// `401 ERROR!` - missing or failed authentication
    AuthError,

    /// `401 ERROR! Insufficient balance` - withdrawal exceeding the balance
    InsufficientBalance,

    /// `400 INVALID AMOUNT FORMAT` - withdrawal amount not a non-negative integer
    InvalidAmountFormat,

    /// `400 INVALID COMMAND` - unknown verb or malformed line
    InvalidCommand,
}

impl Response {
    /// Whether this response ends the session
    ///
    /// Only `BYE` is terminal: the server closes the connection after
    /// writing it, regardless of whether the client reciprocates.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Response::Bye)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::AuthRequire => write!(f, "500 AUTH REQUIRE"),
            Response::Accepted => write!(f, "525 OK!"),
            Response::Amount(balance) => write!(f, "AMNT:{}", balance),
            Response::Bye => write!(f, "BYE"),
            Response::AuthError => write!(f, "401 ERROR!"),
            Response::InsufficientBalance => write!(f, "401 ERROR! Insufficient balance"),
            Response::InvalidAmountFormat => write!(f, "400 INVALID AMOUNT FORMAT"),
            Response::InvalidCommand => write!(f, "400 INVALID COMMAND"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::auth_require(Response::AuthRequire, "500 AUTH REQUIRE")]
    #[case::accepted(Response::Accepted, "525 OK!")]
    #[case::amount(Response::Amount(100), "AMNT:100")]
    #[case::amount_zero(Response::Amount(0), "AMNT:0")]
    #[case::bye(Response::Bye, "BYE")]
    #[case::auth_error(Response::AuthError, "401 ERROR!")]
    #[case::insufficient(Response::InsufficientBalance, "401 ERROR! Insufficient balance")]
    #[case::invalid_amount(Response::InvalidAmountFormat, "400 INVALID AMOUNT FORMAT")]
    #[case::invalid_command(Response::InvalidCommand, "400 INVALID COMMAND")]
    fn test_wire_text(#[case] response: Response, #[case] expected: &str) {
        assert_eq!(response.to_string(), expected);
    }

    #[test]
    fn test_only_bye_is_terminal() {
        assert!(Response::Bye.is_terminal());
        assert!(!Response::Accepted.is_terminal());
        assert!(!Response::AuthError.is_terminal());
        assert!(!Response::InvalidCommand.is_terminal());
    }
}
