//! The acting owner of a request.
//!
//! Sessions are handled by the identity provider in front of this service,
//! which forwards the authenticated account id in [`OWNER_HEADER`]. Handlers
//! take an [`Owner`] argument and pass its id explicitly into every store
//! call, so no operation reads the acting identity from ambient state.

use crate::error::AppError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

pub const OWNER_HEADER: &str = "X-TrustGrid-Owner";
const MAX_OWNER_ID_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl Owner {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl FromRequest for Owner {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(owner_from(req))
    }
}

fn owner_from(req: &HttpRequest) -> Result<Owner, AppError> {
    let value = req
        .headers()
        .get(OWNER_HEADER)
        .ok_or_else(|| AppError::Unauthorized("missing owner identity".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("malformed owner identity".to_string()))?
        .trim();

    if value.is_empty()
        || value.len() > MAX_OWNER_ID_LEN
        || value.chars().any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(AppError::Unauthorized("malformed owner identity".to_string()));
    }
    Ok(Owner(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn owner_is_read_from_the_header() {
        let req = TestRequest::default()
            .insert_header((OWNER_HEADER, " owner-42 "))
            .to_http_request();
        assert_eq!(owner_from(&req).unwrap(), Owner("owner-42".to_string()));
    }

    #[test]
    fn missing_or_malformed_owner_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(owner_from(&req), Err(AppError::Unauthorized(_))));

        let req = TestRequest::default()
            .insert_header((OWNER_HEADER, "two words"))
            .to_http_request();
        assert!(matches!(owner_from(&req), Err(AppError::Unauthorized(_))));
    }
}
