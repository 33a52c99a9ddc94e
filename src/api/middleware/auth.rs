use actix_web::{dev::ServiceRequest, web, Error};
use actix_web_httpauth::extractors::bearer::{BearerAuth, Config};
use actix_web_httpauth::extractors::AuthenticationError;
use actix_web_httpauth::middleware::HttpAuthentication;
use std::future::{ready, Ready};

use crate::api::ApiState;

pub fn create_auth_middleware() -> HttpAuthentication<
    BearerAuth,
    fn(ServiceRequest, BearerAuth) -> Ready<Result<ServiceRequest, (Error, ServiceRequest)>>,
> {
    HttpAuthentication::bearer(validator)
}

/// Com `API_TOKEN` configurado o bearer precisa bater; sem ele qualquer
/// token não vazio passa (ambiente de desenvolvimento).
fn validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Ready<Result<ServiceRequest, (Error, ServiceRequest)>> {
    let token = credentials.token();

    if token.is_empty() {
        return ready(Err((AuthenticationError::from(Config::default()).into(), req)));
    }

    let expected = req
        .app_data::<web::Data<ApiState>>()
        .map(|state| state.config.api_token.clone())
        .unwrap_or_default();

    if expected.is_empty() || token == expected {
        ready(Ok(req))
    } else {
        ready(Err((AuthenticationError::from(Config::default()).into(), req)))
    }
}
