use bistro_common::Cents;
use bistro_engine::{
    checkout_objects::DeletionOutcome,
    db_types::{NewCartEntry, NewPayment, NewUser},
    traits::InsertUserResult,
    AccountApi,
    AuthApi,
    CartApi,
    CheckoutApi,
    CheckoutError,
    StatsApi,
};
use cucumber::{then, when};

use crate::cucumber::BistroWorld;

fn items(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

#[when(expr = "{word} registers")]
async fn register(world: &mut BistroWorld, email: String) {
    let sys = world.system();
    let result = AccountApi::new(sys.db.clone()).register(NewUser::new(email)).await.expect("Error registering user");
    sys.last_registration = Some(result);
}

#[then("the registration reports that the user already exists")]
async fn already_exists(world: &mut BistroWorld) {
    let result = world.system().last_registration.expect("Nobody has registered");
    assert!(matches!(result, InsertUserResult::AlreadyExists(_)), "Expected an existing user. Got {result:?}");
}

#[then(expr = "there are {int} registered users")]
async fn user_count(world: &mut BistroWorld, count: usize) {
    let users = AccountApi::new(world.system().db.clone()).users().await.expect("Error fetching users");
    assert_eq!(users.len(), count);
}

#[when(expr = "{word} is promoted to admin")]
async fn promote(world: &mut BistroWorld, email: String) {
    let db = world.system().db.clone();
    let user = AccountApi::new(db.clone()).user_by_email(&email).await.expect("Error fetching user");
    let user = user.unwrap_or_else(|| panic!("{email} is not registered"));
    AuthApi::new(db).promote_to_admin(user.id).await.expect("Error promoting user");
}

#[then(expr = "{word} is an admin")]
async fn is_admin(world: &mut BistroWorld, email: String) {
    let admin = AuthApi::new(world.system().db.clone()).is_admin(&email).await.expect("Error resolving role");
    assert!(admin, "{email} should be an admin");
}

#[then(expr = "{word} is not an admin")]
async fn is_not_admin(world: &mut BistroWorld, email: String) {
    let admin = AuthApi::new(world.system().db.clone()).is_admin(&email).await.expect("Error resolving role");
    assert!(!admin, "{email} should not be an admin");
}

#[when(expr = "{word} adds {string} to their cart for {float}")]
async fn add_to_cart(world: &mut BistroWorld, email: String, item: String, price: f64) {
    let sys = world.system();
    let menu_id = i64::try_from(sys.cart_entries.len()).unwrap() + 1;
    let entry = NewCartEntry::new(email.clone(), menu_id, item.clone(), price);
    let id = CartApi::new(sys.db.clone()).add(entry).await.expect("Error adding to cart").inserted_id;
    sys.cart_entries.insert(format!("{email}/{item}"), id);
}

#[then(expr = "the cart for {word} has {int} entries")]
async fn cart_size(world: &mut BistroWorld, email: String, count: usize) {
    let cart = CartApi::new(world.system().db.clone()).cart_for_email(&email).await.expect("Error fetching cart");
    assert_eq!(cart.len(), count);
}

#[when(expr = "a payment intent is requested for {float}")]
async fn request_intent(world: &mut BistroWorld, price: f64) {
    let sys = world.system();
    let api = CheckoutApi::new(sys.db.clone(), sys.provider.clone());
    let intent = api.create_payment_intent(price).await.expect("Error creating payment intent");
    sys.last_intent = Some(intent);
}

#[then(expr = "the payment provider is asked to charge {int} cents")]
async fn provider_amount(world: &mut BistroWorld, cents: i64) {
    let sys = world.system();
    let last = sys.provider.amounts.lock().unwrap().last().copied();
    assert_eq!(last, Some(Cents::from(cents)));
    assert!(sys.last_intent.as_ref().is_some_and(|i| !i.client_secret.is_empty()));
}

#[when(expr = "{word} checks out {string} for {float}")]
async fn checkout(world: &mut BistroWorld, email: String, list: String, price: f64) {
    let sys = world.system();
    let ids = items(&list).into_iter().map(|item| sys.cart_entry_id_any(item)).collect::<Vec<i64>>();
    let txid = sys.last_intent.as_ref().map(|i| i.id.clone()).unwrap_or_else(|| "pi_no_intent".to_string());
    let api = CheckoutApi::new(sys.db.clone(), sys.provider.clone());
    let result = api.checkout(NewPayment::new(email, price, txid, ids)).await;
    sys.last_checkout = Some(result);
}

#[then(expr = "the checkout removed {int} cart entries")]
async fn checkout_removed(world: &mut BistroWorld, count: u64) {
    let sys = world.system();
    let result = sys.last_checkout.as_ref().expect("No checkout was attempted");
    let result = result.as_ref().expect("Checkout failed");
    assert_eq!(result.delete_result, DeletionOutcome::Deleted { acknowledged: true, deleted_count: count });
}

#[then("the checkout is rejected because the cart belongs to someone else")]
async fn checkout_rejected(world: &mut BistroWorld) {
    let sys = world.system();
    let result = sys.last_checkout.as_ref().expect("No checkout was attempted");
    assert!(matches!(result, Err(CheckoutError::ForeignCartEntries(_))), "Unexpected checkout result {result:?}");
}

#[then(expr = "{word} has {int} payment(s) covering {string}")]
async fn payment_history(world: &mut BistroWorld, email: String, count: usize, list: String) {
    let sys = world.system();
    let expected = items(&list).into_iter().map(|item| sys.cart_entry_id(&email, item)).collect::<Vec<i64>>();
    let api = CheckoutApi::new(sys.db.clone(), sys.provider.clone());
    let payments = api.payments_for_email(&email).await.expect("Error fetching payments");
    assert_eq!(payments.len(), count);
    assert!(payments.iter().all(|p| p.is_settled()));
    assert_eq!(payments[0].cart_ids, expected);
}

#[then(expr = "the dashboard shows {int} orders and revenue of {float}")]
async fn dashboard(world: &mut BistroWorld, orders: i64, revenue: f64) {
    let stats = StatsApi::new(world.system().db.clone()).stats().await.expect("Error fetching stats");
    assert_eq!(stats.orders, orders);
    assert!((stats.revenue - revenue).abs() < 1e-9, "Revenue was {}", stats.revenue);
}
