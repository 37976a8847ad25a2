//! Authentication middleware.
//!
//! Reads a bearer token from the `Authorization` header, verifies it with the [`TokenIssuer`] registered as app data,
//! and attaches the decoded [`JwtClaims`] to the request extensions. A missing header, a header that is not of the
//! form `Bearer <token>`, and a token that fails verification are all rejected with 401 Unauthorized before the
//! wrapped service is called.
use std::{pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web,
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::*;

use crate::{
    auth::TokenIssuer,
    errors::{AuthError, ServerError},
};

pub struct JwtAuthMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(JwtAuthMiddlewareService { service: Rc::new(service) })
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let issuer = req.app_data::<web::Data<TokenIssuer>>().cloned().ok_or_else(|| {
                error!("🔐️ No token issuer has been registered with the app. Check the server configuration.");
                ServerError::ConfigurationError("Access tokens cannot be verified".to_string())
            })?;
            let claims = {
                let header = req.headers().get(AUTHORIZATION).ok_or_else(|| {
                    debug!("🔐️ Request to {} has no Authorization header", req.path());
                    ServerError::AuthenticationError(AuthError::MissingToken)
                })?;
                let token = header
                    .to_str()
                    .ok()
                    .and_then(|h| h.strip_prefix("Bearer "))
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        AuthError::InvalidToken("Expected an Authorization header of the form 'Bearer <token>'".into())
                    })
                    .map_err(ServerError::AuthenticationError)?;
                issuer.verify(token).map_err(|e| {
                    debug!("🔐️ Rejecting request to {}. {e}", req.path());
                    ServerError::AuthenticationError(e)
                })?
            };
            trace!("🔐️ Authenticated {} for {}", claims.email, req.path());
            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}
