//! Probe outcome phrases.
//!
//! The set is fixed at compile time: every standard HTTP reason phrase followed by
//! four phrases for failures that never produce an HTTP response. The order of the
//! variants is the order of the labels in the `phrase_status` Postgres enum type, so
//! new phrases may only be appended.

use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::error_handling::RecordError;

/// Human-readable classification of a probe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Phrase {
    // Standard HTTP reason phrases
    /// HTTP 100.
    #[strum(serialize = "continue")]
    Continue,
    /// HTTP 101.
    #[strum(serialize = "switching protocols")]
    SwitchingProtocols,
    /// HTTP 102.
    #[strum(serialize = "processing")]
    Processing,
    /// HTTP 103.
    #[strum(serialize = "early hints")]
    EarlyHints,
    /// HTTP 200.
    #[strum(serialize = "ok")]
    Ok,
    /// HTTP 201.
    #[strum(serialize = "created")]
    Created,
    /// HTTP 202.
    #[strum(serialize = "accepted")]
    Accepted,
    /// HTTP 203.
    #[strum(serialize = "non-authoritative information")]
    NonAuthoritativeInformation,
    /// HTTP 204.
    #[strum(serialize = "no content")]
    NoContent,
    /// HTTP 205.
    #[strum(serialize = "reset content")]
    ResetContent,
    /// HTTP 206.
    #[strum(serialize = "partial content")]
    PartialContent,
    /// HTTP 207.
    #[strum(serialize = "multi-status")]
    MultiStatus,
    /// HTTP 208.
    #[strum(serialize = "already reported")]
    AlreadyReported,
    /// HTTP 226.
    #[strum(serialize = "im used")]
    ImUsed,
    /// HTTP 300.
    #[strum(serialize = "multiple choices")]
    MultipleChoices,
    /// HTTP 301.
    #[strum(serialize = "moved permanently")]
    MovedPermanently,
    /// HTTP 302.
    #[strum(serialize = "found")]
    Found,
    /// HTTP 303.
    #[strum(serialize = "see other")]
    SeeOther,
    /// HTTP 304.
    #[strum(serialize = "not modified")]
    NotModified,
    /// HTTP 305.
    #[strum(serialize = "use proxy")]
    UseProxy,
    /// HTTP 307.
    #[strum(serialize = "temporary redirect")]
    TemporaryRedirect,
    /// HTTP 308.
    #[strum(serialize = "permanent redirect")]
    PermanentRedirect,
    /// HTTP 400.
    #[strum(serialize = "bad request")]
    BadRequest,
    /// HTTP 401.
    #[strum(serialize = "unauthorized")]
    Unauthorized,
    /// HTTP 402.
    #[strum(serialize = "payment required")]
    PaymentRequired,
    /// HTTP 403.
    #[strum(serialize = "forbidden")]
    Forbidden,
    /// HTTP 404.
    #[strum(serialize = "not found")]
    NotFound,
    /// HTTP 405.
    #[strum(serialize = "method not allowed")]
    MethodNotAllowed,
    /// HTTP 406.
    #[strum(serialize = "not acceptable")]
    NotAcceptable,
    /// HTTP 407.
    #[strum(serialize = "proxy authentication required")]
    ProxyAuthenticationRequired,
    /// HTTP 408.
    #[strum(serialize = "request timeout")]
    RequestTimeout,
    /// HTTP 409.
    #[strum(serialize = "conflict")]
    Conflict,
    /// HTTP 410.
    #[strum(serialize = "gone")]
    Gone,
    /// HTTP 411.
    #[strum(serialize = "length required")]
    LengthRequired,
    /// HTTP 412.
    #[strum(serialize = "precondition failed")]
    PreconditionFailed,
    /// HTTP 413.
    #[strum(serialize = "request entity too large")]
    RequestEntityTooLarge,
    /// HTTP 414.
    #[strum(serialize = "request-uri too long")]
    RequestUriTooLong,
    /// HTTP 415.
    #[strum(serialize = "unsupported media type")]
    UnsupportedMediaType,
    /// HTTP 416.
    #[strum(serialize = "requested range not satisfiable")]
    RequestedRangeNotSatisfiable,
    /// HTTP 417.
    #[strum(serialize = "expectation failed")]
    ExpectationFailed,
    /// HTTP 418.
    #[strum(serialize = "i'm a teapot")]
    ImATeapot,
    /// HTTP 421.
    #[strum(serialize = "misdirected request")]
    MisdirectedRequest,
    /// HTTP 422.
    #[strum(serialize = "unprocessable entity")]
    UnprocessableEntity,
    /// HTTP 423.
    #[strum(serialize = "locked")]
    Locked,
    /// HTTP 424.
    #[strum(serialize = "failed dependency")]
    FailedDependency,
    /// HTTP 425.
    #[strum(serialize = "too early")]
    TooEarly,
    /// HTTP 426.
    #[strum(serialize = "upgrade required")]
    UpgradeRequired,
    /// HTTP 428.
    #[strum(serialize = "precondition required")]
    PreconditionRequired,
    /// HTTP 429.
    #[strum(serialize = "too many requests")]
    TooManyRequests,
    /// HTTP 431.
    #[strum(serialize = "request header fields too large")]
    RequestHeaderFieldsTooLarge,
    /// HTTP 451.
    #[strum(serialize = "unavailable for legal reasons")]
    UnavailableForLegalReasons,
    /// HTTP 500.
    #[strum(serialize = "internal server error")]
    InternalServerError,
    /// HTTP 501.
    #[strum(serialize = "not implemented")]
    NotImplemented,
    /// HTTP 502.
    #[strum(serialize = "bad gateway")]
    BadGateway,
    /// HTTP 503.
    #[strum(serialize = "service unavailable")]
    ServiceUnavailable,
    /// HTTP 504.
    #[strum(serialize = "gateway timeout")]
    GatewayTimeout,
    /// HTTP 505.
    #[strum(serialize = "http version not supported")]
    HttpVersionNotSupported,
    /// HTTP 506.
    #[strum(serialize = "variant also negotiates")]
    VariantAlsoNegotiates,
    /// HTTP 507.
    #[strum(serialize = "insufficient storage")]
    InsufficientStorage,
    /// HTTP 508.
    #[strum(serialize = "loop detected")]
    LoopDetected,
    /// HTTP 510.
    #[strum(serialize = "not extended")]
    NotExtended,
    /// HTTP 511.
    #[strum(serialize = "network authentication required")]
    NetworkAuthenticationRequired,
    // Failures without an HTTP response
    /// The domain did not resolve.
    #[strum(serialize = "domain not exist")]
    DomainNotExist,
    /// The TLS handshake or certificate check failed.
    #[strum(serialize = "ssl error")]
    SslError,
    /// No response within the probe deadline.
    #[strum(serialize = "connection timeout")]
    ConnectionTimeout,
    /// The page loaded but did not match the expected content pattern.
    #[strum(serialize = "page content not expected")]
    PageContentNotExpected,
}

impl Phrase {
    /// Canonical lower-case text, as stored and transmitted.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// All phrases, in enum-label order.
    pub fn all() -> impl Iterator<Item = Phrase> {
        Phrase::iter()
    }

    /// HTTP status code for standard phrases, `None` for the custom ones.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Phrase::Continue => Some(100),
            Phrase::SwitchingProtocols => Some(101),
            Phrase::Processing => Some(102),
            Phrase::EarlyHints => Some(103),
            Phrase::Ok => Some(200),
            Phrase::Created => Some(201),
            Phrase::Accepted => Some(202),
            Phrase::NonAuthoritativeInformation => Some(203),
            Phrase::NoContent => Some(204),
            Phrase::ResetContent => Some(205),
            Phrase::PartialContent => Some(206),
            Phrase::MultiStatus => Some(207),
            Phrase::AlreadyReported => Some(208),
            Phrase::ImUsed => Some(226),
            Phrase::MultipleChoices => Some(300),
            Phrase::MovedPermanently => Some(301),
            Phrase::Found => Some(302),
            Phrase::SeeOther => Some(303),
            Phrase::NotModified => Some(304),
            Phrase::UseProxy => Some(305),
            Phrase::TemporaryRedirect => Some(307),
            Phrase::PermanentRedirect => Some(308),
            Phrase::BadRequest => Some(400),
            Phrase::Unauthorized => Some(401),
            Phrase::PaymentRequired => Some(402),
            Phrase::Forbidden => Some(403),
            Phrase::NotFound => Some(404),
            Phrase::MethodNotAllowed => Some(405),
            Phrase::NotAcceptable => Some(406),
            Phrase::ProxyAuthenticationRequired => Some(407),
            Phrase::RequestTimeout => Some(408),
            Phrase::Conflict => Some(409),
            Phrase::Gone => Some(410),
            Phrase::LengthRequired => Some(411),
            Phrase::PreconditionFailed => Some(412),
            Phrase::RequestEntityTooLarge => Some(413),
            Phrase::RequestUriTooLong => Some(414),
            Phrase::UnsupportedMediaType => Some(415),
            Phrase::RequestedRangeNotSatisfiable => Some(416),
            Phrase::ExpectationFailed => Some(417),
            Phrase::ImATeapot => Some(418),
            Phrase::MisdirectedRequest => Some(421),
            Phrase::UnprocessableEntity => Some(422),
            Phrase::Locked => Some(423),
            Phrase::FailedDependency => Some(424),
            Phrase::TooEarly => Some(425),
            Phrase::UpgradeRequired => Some(426),
            Phrase::PreconditionRequired => Some(428),
            Phrase::TooManyRequests => Some(429),
            Phrase::RequestHeaderFieldsTooLarge => Some(431),
            Phrase::UnavailableForLegalReasons => Some(451),
            Phrase::InternalServerError => Some(500),
            Phrase::NotImplemented => Some(501),
            Phrase::BadGateway => Some(502),
            Phrase::ServiceUnavailable => Some(503),
            Phrase::GatewayTimeout => Some(504),
            Phrase::HttpVersionNotSupported => Some(505),
            Phrase::VariantAlsoNegotiates => Some(506),
            Phrase::InsufficientStorage => Some(507),
            Phrase::LoopDetected => Some(508),
            Phrase::NotExtended => Some(510),
            Phrase::NetworkAuthenticationRequired => Some(511),
            Phrase::DomainNotExist
            | Phrase::SslError
            | Phrase::ConnectionTimeout
            | Phrase::PageContentNotExpected => None,
        }
    }

    /// Maps an HTTP status code to its standard phrase.
    pub fn from_status_code(code: u16) -> Option<Phrase> {
        Phrase::iter().find(|phrase| phrase.status_code() == Some(code))
    }

    /// True for the four phrases that describe failures outside HTTP.
    pub fn is_custom(&self) -> bool {
        self.status_code().is_none()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phrase {
    type Err = RecordError;

    /// Parses case-insensitively ("Page content not expected" is accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Phrase::iter()
            .find(|phrase| phrase.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RecordError::UnknownPhrase(s.to_string()))
    }
}
