use std::{error::Error, fmt::Debug};

use crate::constant::{
    MSG_BAD_REQUEST, MSG_INTERNAL_ERROR, MSG_NOT_FOUND, MSG_PRODUCT_NOT_FOUND, MSG_QUERY_REQUIRED,
};

#[derive(thiserror::Error)]
pub enum ProductError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Query parameter is required")]
    MissingQuery,

    #[error("Product not found")]
    NotFound,

    #[error("Route not found")]
    RouteNotFound,

    #[error("Request format invalid")]
    BadRequest,

    #[error("Serde error")]
    Serde(#[from] serde_json::Error),

    #[error("Query error")]
    Database(#[from] sqlx::Error),
}

impl ProductError {
    pub fn status(&self) -> u16 {
        match self {
            ProductError::MissingField(_) | ProductError::MissingQuery | ProductError::BadRequest => {
                400
            }
            ProductError::NotFound | ProductError::RouteNotFound => 404,
            ProductError::Serde(_) | ProductError::Database(_) => 500,
        }
    }

    /// Message sent to the caller. Internal faults never leak their cause.
    pub fn public_message(&self) -> String {
        match self {
            ProductError::MissingField(field) => format!("{} is required", field),
            ProductError::MissingQuery => MSG_QUERY_REQUIRED.to_string(),
            ProductError::NotFound => MSG_PRODUCT_NOT_FOUND.to_string(),
            ProductError::RouteNotFound => MSG_NOT_FOUND.to_string(),
            ProductError::BadRequest => MSG_BAD_REQUEST.to_string(),
            ProductError::Serde(_) | ProductError::Database(_) => MSG_INTERNAL_ERROR.to_string(),
        }
    }
}

impl Debug for ProductError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_map_to_400() {
        assert_eq!(ProductError::MissingField("price").status(), 400);
        assert_eq!(
            ProductError::MissingField("price").public_message(),
            "price is required"
        );
        assert_eq!(ProductError::MissingQuery.status(), 400);
    }

    #[test]
    fn internal_faults_hide_their_cause() {
        let err = ProductError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), 500);
        assert_eq!(err.public_message(), "Internal server error");
        assert!(format!("{:?}", err).contains("Caused by"));
    }
}
