use actix_web::{http::StatusCode, HttpResponse};
pub use ag_shared::errors::ErrorResponse;

// Extension trait for ErrorResponse to add actix-web specific methods
pub trait ErrorResponseExt {
    fn to_response(&self) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}
