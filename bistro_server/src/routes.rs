//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Async handlers get executed concurrently by worker threads and thus don’t block
//! execution:
//!
//! ```nocompile
//!     async fn my_handler() -> impl Responder {
//!         tokio::time::sleep(Duration::from_secs(5)).await; // <-- Ok. Worker thread will handle other requests here
//!     }
//! ```
//!
//! ## Guards
//! Routes are public unless declared otherwise in their `route!` invocation:
//! * `where requires authenticated` wraps the resource in the JWT middleware. Handlers can then take [`JwtClaims`].
//! * `where requires admin` additionally checks that the token holder is an administrator. The first backend type
//!   of the route is used to resolve roles, so it must also implement `AuthManagement`.
use actix_web::{get, post, web, HttpResponse, Responder};
use bistro_engine::{
    db_types::{MenuItemUpdate, NewCartEntry, NewMenuItem, NewPayment, NewUser},
    traits::{
        AccountManagement,
        AuthManagement,
        CartManagement,
        CatalogManagement,
        PaymentGatewayDatabase,
        PaymentProvider,
        ReportingManagement,
    },
    AccountApi,
    AuthApi,
    CartApi,
    CatalogApi,
    CheckoutApi,
    StatsApi,
};
use log::*;

use crate::{
    auth::{JwtClaims, TokenIssuer},
    data_objects::{
        AdminResponse,
        ClientSecretResponse,
        EmailQuery,
        PriceRequest,
        RegistrationResponse,
        TokenRequest,
        TokenResponse,
    },
    errors::{AuthError, ServerError},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where requires authenticated) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>)
                    .wrap($crate::middleware::JwtAuthMiddlewareFactory);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $first:ty $(, $bounds:ty)* where requires admin) => {
        paste::paste! { pub struct [<$name:camel Route>]< [< T $first:camel >], $( [< T $bounds:camel> ],)* >(
            core::marker::PhantomData<fn() -> [< T $first:camel >]>,
            $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)*
        );}
        paste::paste! { impl< [< T $first:camel >], $( [< T $bounds:camel> ],)* > [<$name:camel Route>]< [< T $first:camel >], $( [< T $bounds:camel> ],)* > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(
                    core::marker::PhantomData::<fn() -> [< T $first:camel >]>,
                    $( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)*
                )
            }
        }}
        paste::paste! { impl< [< T $first:camel >], $( [< T $bounds:camel >] , )* > actix_web::dev::HttpServiceFactory for [<$name:camel Route>]< [< T $first:camel >], $([<T $bounds:camel>],)* >
        where
            [< T $first:camel >]: $first + bistro_engine::traits::AuthManagement + 'static,
            $([<T $bounds:camel>]: $bounds + 'static,)*
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< [< T $first:camel >], $( [< T $bounds:camel >], )*>)
                    .wrap($crate::middleware::AclMiddlewareFactory::<[< T $first:camel >]>::new())
                    .wrap($crate::middleware::JwtAuthMiddlewareFactory);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

/// Self-scoped routes may only be used by the principal they are about.
fn require_self(claims: &JwtClaims, email: &str) -> Result<(), ServerError> {
    if claims.email == email {
        Ok(())
    } else {
        debug!("💻️ {} asked for data belonging to {email}", claims.email);
        Err(AuthError::EmailMismatch.into())
    }
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Bistro is open for business")
}

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Auth  ----------------------------------------------------
/// Route handler for the token endpoint
///
/// Signs the posted identity into an access token that is valid for the configured lifetime (one hour by default).
/// The token is returned as `{ "token": "..." }` and must be sent back as `Authorization: Bearer <token>` on
/// guarded routes.
#[post("/jwt")]
pub async fn issue_token(
    body: web::Json<TokenRequest>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let TokenRequest { email, name } = body.into_inner();
    trace!("💻️ Received token request for {email}");
    if email.trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("An email address is required".to_string()));
    }
    let token = signer.issue_token(JwtClaims { email, name })?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

route!(check_admin => Get "/users/admin/{email}" impl AuthManagement where requires authenticated);
/// Route handler for the admin check endpoint
///
/// Clients use this to decide whether to show the dashboard. Principals may only ask about themselves.
pub async fn check_admin<B: AuthManagement>(
    claims: JwtClaims,
    path: web::Path<String>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let email = path.into_inner();
    require_self(&claims, &email)?;
    let admin = api.is_admin(&email).await?;
    Ok(HttpResponse::Ok().json(AdminResponse { admin }))
}

route!(promote_user => Patch "/users/admin/{id}" impl AuthManagement where requires admin);
pub async fn promote_user<B: AuthManagement>(
    path: web::Path<i64>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PATCH promote user #{id}");
    let result = api.promote_to_admin(id).await?;
    Ok(HttpResponse::Ok().json(result))
}

//----------------------------------------------   Users  ----------------------------------------------------
route!(register_user => Post "/users" impl AccountManagement);
/// Route handler for registration
///
/// Registration is idempotent on the email address. Posting a known email inserts nothing and answers with
/// `{ "message": "user already exists", "insertedId": null }`.
pub async fn register_user<B: AccountManagement>(
    body: web::Json<NewUser>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = body.into_inner();
    trace!("💻️ POST register user {}", user.email);
    let result = api.register(user).await?;
    Ok(HttpResponse::Ok().json(RegistrationResponse::from(result)))
}

route!(users => Get "/users" impl AccountManagement where requires admin);
pub async fn users<B: AccountManagement>(api: web::Data<AccountApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET users");
    let users = api.users().await?;
    Ok(HttpResponse::Ok().json(users))
}

route!(delete_user => Delete "/users/{id}" impl AccountManagement where requires admin);
pub async fn delete_user<B: AccountManagement>(
    path: web::Path<i64>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE user #{id}");
    let result = api.delete_user(id).await?;
    Ok(HttpResponse::Ok().json(result))
}

//----------------------------------------------   Catalog  ----------------------------------------------------
route!(menu => Get "/menu" impl CatalogManagement);
pub async fn menu<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET menu");
    let items = api.menu().await?;
    Ok(HttpResponse::Ok().json(items))
}

route!(menu_item => Get "/menu/{id}" impl CatalogManagement);
/// Returns the menu item with the given id, or `null` if there is no such item.
pub async fn menu_item<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    trace!("💻️ GET menu item #{id}");
    let item = api.menu_item(id).await?;
    Ok(HttpResponse::Ok().json(item))
}

route!(add_menu_item => Post "/menu" impl CatalogManagement where requires admin);
pub async fn add_menu_item<B: CatalogManagement>(
    body: web::Json<NewMenuItem>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let item = body.into_inner();
    debug!("💻️ POST menu item '{}'", item.name);
    let result = api.add_menu_item(item).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(update_menu_item => Patch "/menu/{id}" impl CatalogManagement where requires admin);
pub async fn update_menu_item<B: CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<MenuItemUpdate>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PATCH menu item #{id}");
    let result = api.update_menu_item(id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(delete_menu_item => Delete "/menu/{id}" impl CatalogManagement where requires admin);
pub async fn delete_menu_item<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE menu item #{id}");
    let result = api.delete_menu_item(id).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(reviews => Get "/reviews" impl CatalogManagement);
pub async fn reviews<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET reviews");
    let reviews = api.reviews().await?;
    Ok(HttpResponse::Ok().json(reviews))
}

//----------------------------------------------   Carts  ----------------------------------------------------
route!(add_to_cart => Post "/carts" impl CartManagement);
pub async fn add_to_cart<B: CartManagement>(
    body: web::Json<NewCartEntry>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let entry = body.into_inner();
    trace!("💻️ POST cart entry for {}", entry.email);
    let result = api.add(entry).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(cart => Get "/carts" impl CartManagement);
pub async fn cart<B: CartManagement>(
    query: web::Query<EmailQuery>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let EmailQuery { email } = query.into_inner();
    trace!("💻️ GET cart for {email}");
    let entries = api.cart_for_email(&email).await?;
    Ok(HttpResponse::Ok().json(entries))
}

route!(remove_from_cart => Delete "/cart/{id}" impl CartManagement where requires authenticated);
pub async fn remove_from_cart<B: CartManagement>(
    path: web::Path<i64>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE cart entry #{id}");
    let result = api.remove(id).await?;
    Ok(HttpResponse::Ok().json(result))
}

//----------------------------------------------   Checkout  ----------------------------------------------------
route!(create_payment_intent => Post "/create-payment-intent" impl PaymentGatewayDatabase, PaymentProvider);
/// Route handler for the payment intent endpoint
///
/// Takes `{ "price": 42.5 }` in major currency units and answers with the `clientSecret` the client needs to confirm
/// the card payment. The provider is asked for `trunc(price × 100)` minor units.
pub async fn create_payment_intent<B, P>(
    body: web::Json<PriceRequest>,
    api: web::Data<CheckoutApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: PaymentGatewayDatabase,
    P: PaymentProvider,
{
    let PriceRequest { price } = body.into_inner();
    debug!("💻️ POST payment intent for {price}");
    let intent = api.create_payment_intent(price).await?;
    Ok(HttpResponse::Ok().json(ClientSecretResponse { client_secret: intent.client_secret }))
}

route!(checkout => Post "/payments" impl PaymentGatewayDatabase, PaymentProvider);
/// Route handler for settlement
///
/// Records the payment and clears the paid-for entries from the buyer's cart. The response merges both outcomes as
/// `{ "paymentResult": ..., "deleteResult": ... }`. If the cart could not be cleared, `deleteResult` reports the
/// failure and the payment stays pending until it is reconciled.
pub async fn checkout<B, P>(
    body: web::Json<NewPayment>,
    api: web::Data<CheckoutApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: PaymentGatewayDatabase,
    P: PaymentProvider,
{
    let payment = body.into_inner();
    info!("💻️ POST payment {} from {}", payment.transaction_id, payment.email);
    let result = api.checkout(payment).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(payment_history => Get "/payments" impl PaymentGatewayDatabase, PaymentProvider where requires authenticated);
pub async fn payment_history<B, P>(
    claims: JwtClaims,
    query: web::Query<EmailQuery>,
    api: web::Data<CheckoutApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: PaymentGatewayDatabase,
    P: PaymentProvider,
{
    let EmailQuery { email } = query.into_inner();
    require_self(&claims, &email)?;
    debug!("💻️ GET payment history for {email}");
    let payments = api.payments_for_email(&email).await?;
    Ok(HttpResponse::Ok().json(payments))
}

route!(
    reconcile => Post "/admin/settlements/reconcile" impl PaymentGatewayDatabase, PaymentProvider where requires admin
);
/// Route handler for reconciliation
///
/// Re-runs the cart purge for every payment that is still pending after an interrupted checkout.
pub async fn reconcile<B, P>(api: web::Data<CheckoutApi<B, P>>) -> Result<HttpResponse, ServerError>
where
    B: PaymentGatewayDatabase,
    P: PaymentProvider,
{
    info!("💻️ POST reconcile pending settlements");
    let report = api.reconcile().await?;
    Ok(HttpResponse::Ok().json(report))
}

//----------------------------------------------   Reporting  ----------------------------------------------------
route!(admin_stats => Get "/admin-stats" impl ReportingManagement where requires admin);
pub async fn admin_stats<B: ReportingManagement>(api: web::Data<StatsApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET admin stats");
    let stats = api.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}
