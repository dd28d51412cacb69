use serde::Serialize;

/// `{"error":{"message":"..."}}`, the envelope for expected failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorBody {
    pub fn new(msg: &str) -> Self {
        ErrorBody {
            error: ErrorMessage { message: msg.to_owned() },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnauthorizedBody {
    pub error: &'static str,
}

impl UnauthorizedBody {
    pub fn new() -> Self {
        UnauthorizedBody {
            error: "Unauthorized request",
        }
    }
}

/// Body of a 500 response outside production: the message is repeated at the
/// top level and inside the error envelope.
#[derive(Debug, Serialize)]
pub struct FaultBody {
    pub message: String,
    pub error: ErrorMessage,
}

impl FaultBody {
    pub fn new(detail: &str) -> Self {
        FaultBody {
            message: detail.to_owned(),
            error: ErrorMessage {
                message: detail.to_owned(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: String,
}

impl StatusBody {
    pub fn new(msg: &str) -> Self {
        StatusBody { status: msg.to_owned() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_shape() {
        let body = serde_json::to_value(ErrorBody::new("Missing url in request body")).unwrap();
        assert_eq!(body, json!({ "error": { "message": "Missing url in request body" } }));
    }

    #[test]
    fn fault_body_shape() {
        let body = serde_json::to_value(FaultBody::new("boom")).unwrap();
        assert_eq!(body, json!({ "message": "boom", "error": { "message": "boom" } }));
    }
}
