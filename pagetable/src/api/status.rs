//! HTTP status codes and user-facing messages for them.

/// Status codes the data layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HttpStatus {
    // Success
    Ok = 200,
    Created = 201,
    NoContent = 204,

    // Client errors
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    Conflict = 409,
    PreconditionFailed = 412,
    UnprocessableEntity = 422,

    // Server errors
    InternalServerError = 500,
    NotImplemented = 501,
    BadGateway = 502,
    ServiceUnavailable = 503,
}

impl HttpStatus {
    pub const ALL: [HttpStatus; 14] = [
        HttpStatus::Ok,
        HttpStatus::Created,
        HttpStatus::NoContent,
        HttpStatus::BadRequest,
        HttpStatus::Unauthorized,
        HttpStatus::Forbidden,
        HttpStatus::NotFound,
        HttpStatus::Conflict,
        HttpStatus::PreconditionFailed,
        HttpStatus::UnprocessableEntity,
        HttpStatus::InternalServerError,
        HttpStatus::NotImplemented,
        HttpStatus::BadGateway,
        HttpStatus::ServiceUnavailable,
    ];

    /// The numeric code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look up a known status by code.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn is_success(self) -> bool {
        (200..300).contains(&self.code())
    }
}

impl From<HttpStatus> for u16 {
    fn from(status: HttpStatus) -> Self {
        status.code()
    }
}

/// Message to show for a failed response with the given status code.
///
/// Statuses without a dedicated message use `default`.
pub fn status_message(status: u16, default: &str) -> String {
    match HttpStatus::from_code(status) {
        Some(HttpStatus::Unauthorized) => "You do not have authorization".to_string(),
        Some(HttpStatus::NotFound) => "The requested resource was not found".to_string(),
        _ => default.to_string(),
    }
}
