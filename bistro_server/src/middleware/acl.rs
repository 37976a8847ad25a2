//! Admin-only access control.
//!
//! This middleware must sit inside [`super::JwtAuthMiddlewareFactory`]. It reads the verified claims from the request
//! extensions, asks the role resolver ([`AuthApi`]) whether that email belongs to an administrator, and only then lets
//! the request through. Non-admins get 403 Forbidden. If no claims are attached the request is refused as
//! unauthenticated rather than let through.
use std::{marker::PhantomData, pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
    HttpMessage,
};
use bistro_engine::{traits::AuthManagement, AuthApi};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::*;

use crate::{
    auth::JwtClaims,
    errors::{AuthError, ServerError},
};

pub struct AclMiddlewareFactory<R> {
    _backend: PhantomData<fn() -> R>,
}

impl<R> AclMiddlewareFactory<R> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        AclMiddlewareFactory { _backend: PhantomData }
    }
}

impl<S, B, R> Transform<S, ServiceRequest> for AclMiddlewareFactory<R>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: AuthManagement + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AclMiddlewareService<S, R>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AclMiddlewareService { service: Rc::new(service), _backend: PhantomData })
    }
}

pub struct AclMiddlewareService<S, R> {
    service: Rc<S>,
    _backend: PhantomData<fn() -> R>,
}

impl<S, B, R> Service<ServiceRequest> for AclMiddlewareService<S, R>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: AuthManagement + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let email = req
                .extensions()
                .get::<JwtClaims>()
                .map(|c| c.email.clone())
                .ok_or_else(|| {
                    warn!("🔐️ No JWT claims found in request extensions. Is the ACL wrapped in the JWT middleware?");
                    ServerError::AuthenticationError(AuthError::MissingToken)
                })?;
            let api = req.app_data::<web::Data<AuthApi<R>>>().cloned().ok_or_else(|| {
                error!("🔐️ No role resolver has been registered with the app. Check the server configuration.");
                ServerError::ConfigurationError("Roles cannot be resolved".to_string())
            })?;
            let is_admin = api.is_admin(&email).await.map_err(ServerError::from)?;
            if is_admin {
                service.call(req).await
            } else {
                info!("🔐️ {email} tried to access {} without admin rights", req.path());
                Err(ServerError::AuthenticationError(AuthError::InsufficientPermissions(
                    "This operation requires the admin role".to_string(),
                ))
                .into())
            }
        })
    }
}
