use axum::http::StatusCode;

/// Failures of the habit list client and its session bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The host environment is present but exposes no user.
    #[error("host environment provided no user")]
    MissingUser,

    #[error("invalid host init data: {0}")]
    InitData(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{path} responded with {status}")]
    Status { path: &'static str, status: StatusCode },

    #[error("malformed response from {path}: {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("habit {0} is not in the rendered list")]
    UnknownHabit(i64),

    #[error("habit title must be at least {min} characters")]
    InvalidTitle { min: usize },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_gateway(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::UnknownHabit(_) => Self::not_found(err.to_string()),
            ClientError::InvalidTitle { .. } => Self::bad_request(err.to_string()),
            ClientError::Transport(_) | ClientError::Status { .. } | ClientError::Decode { .. } => {
                Self::bad_gateway(err)
            }
            ClientError::MissingUser | ClientError::InitData(_) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
