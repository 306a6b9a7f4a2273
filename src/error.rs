use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Ошибки клиента API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication required: {0}")]
    Unauthorized(String),

    #[error("access denied: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("server rejected request ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cinema API temporarily unavailable (circuit breaker is open)")]
    CircuitOpen,

    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("session storage error: {0}")]
    Session(#[from] std::io::Error),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

// Тело ошибки от сервера: обычно {"message": "..."}, иногда {"error": "..."}
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Строит типизированную ошибку из статуса и сырого тела ответа.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
            StatusCode::FORBIDDEN => ApiError::Forbidden(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::CONFLICT => ApiError::Conflict(message),
            _ => ApiError::Server { status: status.as_u16(), message },
        }
    }

    /// Сбои, которые считаются отказом самого сервиса (для circuit breaker).
    pub fn is_service_failure(&self) -> bool {
        match self {
            ApiError::Transport(e) => !e.is_decode(),
            ApiError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Нарушения порядка шагов бронирования на стороне клиента.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("select a screening date first")]
    NoDateSelected,

    #[error("select a schedule first")]
    NoScheduleSelected,

    #[error("schedule {0} is not offered for the selected date")]
    UnknownSchedule(i64),

    #[error("select a seat first")]
    NoSeatSelected,

    #[error("only {0} seat(s) can be reserved at once")]
    TooManySeats(usize),

    #[error("seat {0} does not exist in this screen")]
    UnknownSeat(String),

    #[error("seat {0} is already taken")]
    SeatUnavailable(String),

    #[error("log in or enter a phone number to reserve as a guest")]
    GuestPhoneRequired,

    #[error("choose a payment method")]
    NoPaymentMethod,

    #[error("the terms of payment must be accepted")]
    TermsNotAccepted,

    #[error("paying with points requires a member login")]
    PointsRequireLogin,

    #[error("cannot {action} while the reservation is {stage}")]
    InvalidStage { action: &'static str, stage: String },
}

pub type ApiResult<T> = Result<T, ApiError>;
