//! The authorization gate. Guarded routes wrap their resource in these middlewares, with authentication outermost so
//! that the admin check only ever sees verified claims.
mod acl;
mod jwt;

pub use acl::{AclMiddlewareFactory, AclMiddlewareService};
pub use jwt::{JwtAuthMiddlewareFactory, JwtAuthMiddlewareService};
