use serde::Serialize;
use serde_json::json;

use crate::constant::CORS_HEADERS;
use crate::error::ProductError;

#[derive(Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Option<String>,
}

impl Response {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Result<Self, ProductError> {
        Ok(Self {
            status,
            body: Some(serde_json::to_string(value)?),
        })
    }

    pub fn message(status: u16, message: &str) -> Self {
        Self {
            status,
            body: Some(json!({ "message": message }).to_string()),
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: Some(json!({ "error": message }).to_string()),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    /// Serialises the response as a complete HTTP/1.1 message.
    pub fn to_http(&self) -> String {
        let body = self.body.as_deref().unwrap_or("");
        let mut out = format!("HTTP/1.1 {} {}\r\n", self.status, reason(self.status));
        if self.body.is_some() {
            out.push_str("Content-Type: application/json\r\n");
        }
        out.push_str(&format!("Content-Length: {}\r\n", body.len()));
        out.push_str(CORS_HEADERS);
        out.push_str("Connection: close\r\n\r\n");
        out.push_str(body);
        out
    }
}

impl From<ProductError> for Response {
    fn from(err: ProductError) -> Self {
        Response::error(err.status(), &err.public_message())
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}
