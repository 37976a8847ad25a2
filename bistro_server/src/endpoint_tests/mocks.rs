use bistro_common::Cents;
use bistro_engine::{
    db_types::{
        CartEntry,
        MenuItem,
        MenuItemUpdate,
        NewCartEntry,
        NewMenuItem,
        NewPayment,
        NewUser,
        Payment,
        Review,
        Role,
        UserAccount,
    },
    traits::{
        AccountApiError,
        AccountManagement,
        AuthApiError,
        AuthManagement,
        CartApiError,
        CartManagement,
        CartOwner,
        CatalogApiError,
        CatalogManagement,
        DeleteResult,
        InsertUserResult,
        PaymentGatewayDatabase,
        PaymentGatewayError,
        PaymentIntentHandle,
        PaymentProvider,
        PaymentProviderError,
        ReportingError,
        ReportingManagement,
        Stats,
        UpdateResult,
    },
};
use mockall::mock;

mock! {
    pub Backend {}
    impl Clone for Backend {
        fn clone(&self) -> Self;
    }
    impl AuthManagement for Backend {
        async fn fetch_role_for_email(&self, email: &str) -> Result<Option<Role>, AuthApiError>;
        async fn assign_role(&self, user_id: i64, role: Role) -> Result<UpdateResult, AuthApiError>;
    }
    impl AccountManagement for Backend {
        async fn insert_user_if_absent(&self, user: NewUser) -> Result<InsertUserResult, AccountApiError>;
        async fn fetch_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AccountApiError>;
        async fn fetch_users(&self) -> Result<Vec<UserAccount>, AccountApiError>;
        async fn delete_user(&self, user_id: i64) -> Result<DeleteResult, AccountApiError>;
    }
    impl CatalogManagement for Backend {
        async fn fetch_menu(&self) -> Result<Vec<MenuItem>, CatalogApiError>;
        async fn fetch_menu_item(&self, id: i64) -> Result<Option<MenuItem>, CatalogApiError>;
        async fn insert_menu_item(&self, item: NewMenuItem) -> Result<i64, CatalogApiError>;
        async fn update_menu_item(&self, id: i64, update: MenuItemUpdate) -> Result<UpdateResult, CatalogApiError>;
        async fn delete_menu_item(&self, id: i64) -> Result<DeleteResult, CatalogApiError>;
        async fn fetch_reviews(&self) -> Result<Vec<Review>, CatalogApiError>;
    }
    impl CartManagement for Backend {
        async fn insert_cart_entry(&self, entry: NewCartEntry) -> Result<i64, CartApiError>;
        async fn fetch_cart_for_email(&self, email: &str) -> Result<Vec<CartEntry>, CartApiError>;
        async fn delete_cart_entry(&self, id: i64) -> Result<DeleteResult, CartApiError>;
    }
    impl PaymentGatewayDatabase for Backend {
        fn url(&self) -> &str;
        async fn fetch_cart_owners(&self, ids: &[i64]) -> Result<Vec<CartOwner>, PaymentGatewayError>;
        async fn insert_payment(&self, payment: NewPayment) -> Result<(Payment, bool), PaymentGatewayError>;
        async fn purge_cart_entries(&self, email: &str, ids: &[i64]) -> Result<DeleteResult, PaymentGatewayError>;
        async fn mark_payment_settled(&self, payment_id: i64) -> Result<Payment, PaymentGatewayError>;
        async fn fetch_pending_payments(&self) -> Result<Vec<Payment>, PaymentGatewayError>;
        async fn fetch_payments_for_email(&self, email: &str) -> Result<Vec<Payment>, PaymentGatewayError>;
    }
    impl ReportingManagement for Backend {
        async fn fetch_stats(&self) -> Result<Stats, ReportingError>;
    }
}

mock! {
    pub Provider {}
    impl PaymentProvider for Provider {
        async fn create_payment_intent(
            &self,
            amount: Cents,
            currency: &str,
        ) -> Result<PaymentIntentHandle, PaymentProviderError>;
    }
}

/// A backend that resolves every email to the given role.
pub fn backend_with_role(role: Option<Role>) -> MockBackend {
    let mut backend = MockBackend::new();
    backend.expect_fetch_role_for_email().returning(move |_| Ok(role));
    backend
}
