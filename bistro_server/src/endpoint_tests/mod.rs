mod auth;
mod carts;
mod helpers;
mod mocks;
mod stats;
mod users;
