//! # Shop
//!
//! The in-memory aggregate mirrored to the store, plus every management
//! operation that mutates it.
//!
//! ## State Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Shop                                          │
//! │                                                                         │
//! │   store ──load──► ShopState ──────────────────────────► report/dashboard│
//! │                      ▲   │                                              │
//! │                      │   │  add_product / delete_expense / checkout ... │
//! │                      │   ▼                                              │
//! │                   mutation + ActivityLog entry                          │
//! │                      │                                                  │
//! │                      └──► Dirty {products, sales, ...} ──save──► store  │
//! │                                                                         │
//! │  Every mutating call takes the acting user explicitly. Clock and id    │
//! │  generator are injected so tests can pin both.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::access::authenticate;
use crate::backup::{self, BackupDocument};
use crate::cart::Cart;
use crate::checkout::{commit, CommitContext};
use crate::dashboard::{build_dashboard, DashboardSummary};
use crate::defaults::{default_categories, default_users, sample_products};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::ports::{Catalog, Clock, ExpenseLedger, IdGenerator, SaleLedger, SystemClock, UuidIdGenerator};
use crate::reporting::{build_report, ReportResult};
use crate::types::{ActivityAction, ActivityLog, Actor, Expense, PaymentMethod, Product, Sale, User};
use crate::validation::{validate_category, validate_expense, validate_name, validate_pin, validate_product};

// =============================================================================
// Collections
// =============================================================================

/// The persisted collections, one store key each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Sales,
    Expenses,
    Users,
    Categories,
    ActivityLogs,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Products,
        Collection::Sales,
        Collection::Expenses,
        Collection::Users,
        Collection::Categories,
        Collection::ActivityLogs,
    ];

    /// Store key, identical to the backup document key.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Sales => "sales",
            Collection::Expenses => "expenses",
            Collection::Users => "users",
            Collection::Categories => "categories",
            Collection::ActivityLogs => "activityLogs",
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Set of collections changed by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dirty(u8);

impl Dirty {
    pub const NONE: Dirty = Dirty(0);
    pub const PRODUCTS: Dirty = Dirty(1 << Collection::Products as u8);
    pub const SALES: Dirty = Dirty(1 << Collection::Sales as u8);
    pub const EXPENSES: Dirty = Dirty(1 << Collection::Expenses as u8);
    pub const USERS: Dirty = Dirty(1 << Collection::Users as u8);
    pub const CATEGORIES: Dirty = Dirty(1 << Collection::Categories as u8);
    pub const ACTIVITY_LOGS: Dirty = Dirty(1 << Collection::ActivityLogs as u8);
    pub const ALL: Dirty = Dirty(0b11_1111);

    /// What a committed sale touches.
    pub const CHECKOUT: Dirty = Dirty(Self::PRODUCTS.0 | Self::SALES.0 | Self::ACTIVITY_LOGS.0);

    pub fn contains(&self, collection: Collection) -> bool {
        self.0 & collection.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Dirty collections in declaration order.
    pub fn collections(&self) -> impl Iterator<Item = Collection> + '_ {
        Collection::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl BitOr for Dirty {
    type Output = Dirty;

    fn bitor(self, rhs: Dirty) -> Dirty {
        Dirty(self.0 | rhs.0)
    }
}

impl BitOrAssign for Dirty {
    fn bitor_assign(&mut self, rhs: Dirty) {
        self.0 |= rhs.0;
    }
}

// =============================================================================
// Shop State
// =============================================================================

/// Everything the shop persists. Collections keep their display order:
/// products and users in insertion order, the rest newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopState {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub users: Vec<User>,
    pub categories: Vec<String>,
    pub activity_logs: Vec<ActivityLog>,
}

impl ShopState {
    /// Fresh installation: demo catalog, built-in users, default categories.
    pub fn with_defaults() -> Self {
        ShopState {
            products: sample_products(),
            users: default_users(),
            categories: default_categories(),
            ..ShopState::default()
        }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

// =============================================================================
// Shop
// =============================================================================

/// [`ShopState`] plus the clock and id generator its operations stamp
/// records with.
pub struct Shop {
    state: ShopState,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl fmt::Debug for Shop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shop").field("state", &self.state).finish_non_exhaustive()
    }
}

impl Shop {
    /// Wall clock and UUID ids.
    pub fn new(state: ShopState) -> Self {
        Shop::with_ports(state, Box::new(SystemClock), Box::new(UuidIdGenerator))
    }

    pub fn with_ports(state: ShopState, clock: Box<dyn Clock>, ids: Box<dyn IdGenerator>) -> Self {
        Shop { state, clock, ids }
    }

    pub fn state(&self) -> &ShopState {
        &self.state
    }

    pub fn into_state(self) -> ShopState {
        self.state
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn log(&mut self, actor: &Actor, action: ActivityAction, details: String) {
        let entry = ActivityLog::new(self.ids.next_id(), actor, action, details, self.clock.now());
        debug!(action = ?entry.action, user = %entry.user_name, "{}", entry.details);
        self.state.activity_logs.insert(0, entry);
    }

    // -------------------------------------------------------------------------
    // Sessions
    // -------------------------------------------------------------------------

    /// Looks up a PIN and records the login on success.
    pub fn login(&mut self, pin: &str) -> Option<(User, Dirty)> {
        let user = authenticate(&self.state.users, pin)?.clone();
        let dirty = self.log_login(&user);
        Some((user, dirty))
    }

    pub fn log_login(&mut self, user: &User) -> Dirty {
        info!(user_id = %user.id, "User logged in");
        self.log(&Actor::from(user), ActivityAction::Login, "User logged into the system".to_string());
        Dirty::ACTIVITY_LOGS
    }

    pub fn log_logout(&mut self, actor: &Actor) -> Dirty {
        info!(user_id = %actor.id, "User logged out");
        self.log(actor, ActivityAction::Logout, "User logged out".to_string());
        Dirty::ACTIVITY_LOGS
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Commits the cart and clears it. Dirties [`Dirty::CHECKOUT`] when a
    /// sale is returned; an empty cart changes nothing.
    pub fn checkout(&mut self, cart: &mut Cart, method: PaymentMethod, actor: &Actor) -> Option<Sale> {
        let ctx = CommitContext {
            clock: self.clock.as_ref(),
            ids: self.ids.as_ref(),
            catalog: &mut self.state.products,
            sales: &mut self.state.sales,
            activity: &mut self.state.activity_logs,
        };
        let sale = commit(cart, method, actor, ctx)?;
        cart.clear();
        Some(sale)
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    pub fn add_product(&mut self, actor: &Actor, product: Product) -> CoreResult<Dirty> {
        validate_product(&product)?;
        if self.state.product(&product.id).is_some() {
            return Err(CoreError::DuplicateProduct(product.id));
        }

        let details = format!("Added new product: {} ({})", product.name, product.sku);
        self.state.products.push(product);
        self.log(actor, ActivityAction::InventoryAdd, details);
        Ok(Dirty::PRODUCTS | Dirty::ACTIVITY_LOGS)
    }

    /// Replaces the product with the same id.
    pub fn update_product(&mut self, actor: &Actor, product: Product) -> CoreResult<Dirty> {
        validate_product(&product)?;
        let slot = self
            .state
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| CoreError::ProductNotFound(product.id.clone()))?;

        let details = format!("Updated product: {}", product.name);
        *slot = product;
        self.log(actor, ActivityAction::InventoryUpdate, details);
        Ok(Dirty::PRODUCTS | Dirty::ACTIVITY_LOGS)
    }

    /// Removes a product. Past sales keep their snapshot of it.
    pub fn delete_product(&mut self, actor: &Actor, id: &str) -> Dirty {
        let removed = self
            .state
            .products
            .iter()
            .position(|p| p.id == id)
            .map(|idx| self.state.products.remove(idx));

        let name = removed.map_or_else(|| "Unknown".to_string(), |p| p.name);
        self.log(actor, ActivityAction::InventoryDelete, format!("Deleted product: {}", name));
        Dirty::PRODUCTS | Dirty::ACTIVITY_LOGS
    }

    pub fn add_category(&mut self, name: &str) -> CoreResult<Dirty> {
        validate_category(name)?;
        let name = name.trim();
        if self.state.categories.iter().any(|c| c == name) {
            return Err(CoreError::DuplicateCategory(name.to_string()));
        }
        self.state.categories.push(name.to_string());
        Ok(Dirty::CATEGORIES)
    }

    /// Products already filed under the category keep it.
    pub fn remove_category(&mut self, name: &str) -> Dirty {
        let before = self.state.categories.len();
        self.state.categories.retain(|c| c != name);
        if self.state.categories.len() == before {
            Dirty::NONE
        } else {
            Dirty::CATEGORIES
        }
    }

    // -------------------------------------------------------------------------
    // Expenses
    // -------------------------------------------------------------------------

    pub fn add_expense(&mut self, actor: &Actor, expense: Expense) -> CoreResult<Dirty> {
        validate_expense(&expense)?;
        let details = format!("Added expense: {} for {}", expense.amount, expense.description);
        self.state.expenses.insert(0, expense);
        self.log(actor, ActivityAction::ExpenseAdd, details);
        Ok(Dirty::EXPENSES | Dirty::ACTIVITY_LOGS)
    }

    pub fn delete_expense(&mut self, actor: &Actor, id: &str) -> Dirty {
        let removed = self
            .state
            .expenses
            .iter()
            .position(|e| e.id == id)
            .map(|idx| self.state.expenses.remove(idx));

        let (description, amount) = removed
            .map_or_else(|| ("Unknown".to_string(), Money::zero()), |e| (e.description, e.amount));
        self.log(
            actor,
            ActivityAction::ExpenseDelete,
            format!("Deleted expense: {} - {}", description, amount),
        );
        Dirty::EXPENSES | Dirty::ACTIVITY_LOGS
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    fn validate_user(&self, user: &User) -> CoreResult<()> {
        validate_name("name", &user.name)?;
        validate_pin(&user.pin)?;
        if self.state.users.iter().any(|u| u.id != user.id && u.pin == user.pin) {
            return Err(ValidationError::Duplicate {
                field: "pin".to_string(),
                value: user.pin.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Adds a user. PINs must be unique since login is by PIN alone.
    pub fn add_user(&mut self, actor: &Actor, user: User) -> CoreResult<Dirty> {
        if user.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "id".to_string(),
            }
            .into());
        }
        if self.state.user(&user.id).is_some() {
            return Err(CoreError::DuplicateUser(user.id));
        }
        self.validate_user(&user)?;

        let details = format!("Created new user: {}", user.name);
        self.state.users.push(user);
        self.log(actor, ActivityAction::UserUpdate, details);
        Ok(Dirty::USERS | Dirty::ACTIVITY_LOGS)
    }

    pub fn update_user(&mut self, actor: &Actor, user: User) -> CoreResult<Dirty> {
        self.validate_user(&user)?;
        let slot = self
            .state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| CoreError::UserNotFound(user.id.clone()))?;

        let details = format!("Updated user details for: {}", user.name);
        *slot = user;
        self.log(actor, ActivityAction::UserUpdate, details);
        Ok(Dirty::USERS | Dirty::ACTIVITY_LOGS)
    }

    pub fn delete_user(&mut self, actor: &Actor, id: &str) -> CoreResult<Dirty> {
        let idx = self
            .state
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))?;
        let removed = self.state.users.remove(idx);

        self.log(actor, ActivityAction::UserDelete, format!("Deleted user: {}", removed.name));
        Ok(Dirty::USERS | Dirty::ACTIVITY_LOGS)
    }

    // -------------------------------------------------------------------------
    // Reporting
    // -------------------------------------------------------------------------

    /// Report over `[start, end]`, both days inclusive.
    pub fn report(&self, start: NaiveDate, end: NaiveDate) -> ReportResult {
        build_report(
            self.state.sales.sales(),
            self.state.expenses.expenses(),
            self.state.products.products(),
            start,
            end,
        )
    }

    /// Dashboard for the seven days ending today by this shop's clock.
    pub fn dashboard(&self) -> DashboardSummary {
        build_dashboard(
            self.state.sales.sales(),
            self.state.expenses.expenses(),
            self.state.products.products(),
            self.clock.now(),
        )
    }

    // -------------------------------------------------------------------------
    // Backup
    // -------------------------------------------------------------------------

    /// Pretty-printed backup of the whole state, stamped with the current time.
    pub fn export_json(&self) -> serde_json::Result<String> {
        backup::export_json(&self.state, self.clock.now())
    }

    /// Applies a parsed backup and records the restore.
    pub fn restore(&mut self, doc: BackupDocument, actor: &Actor) -> Dirty {
        let dirty = doc.apply(&mut self.state);
        info!(collections = ?dirty.collections().map(|c| c.key()).collect::<Vec<_>>(), "Backup restored");
        self.log(
            actor,
            ActivityAction::DataRestore,
            "System data restored from backup file".to_string(),
        );
        dirty | Dirty::ACTIVITY_LOGS
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::parse_backup;
    use crate::ports::{FixedClock, SequentialIdGenerator};
    use crate::types::UserRole;
    use chrono::{TimeZone, Utc};

    fn test_shop() -> Shop {
        Shop::with_ports(
            ShopState::with_defaults(),
            Box::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap())),
            Box::new(SequentialIdGenerator::new("id")),
        )
    }

    fn admin() -> Actor {
        Actor::new("u1", "Admin User")
    }

    fn new_product(id: &str) -> Product {
        let mut p = sample_products()[0].clone();
        p.id = id.to_string();
        p.name = "Bluetooth Speaker".to_string();
        p.sku = "EL-010".to_string();
        p
    }

    #[test]
    fn test_dirty_set() {
        let dirty = Dirty::PRODUCTS | Dirty::ACTIVITY_LOGS;
        assert!(dirty.contains(Collection::Products));
        assert!(!dirty.contains(Collection::Sales));
        let keys: Vec<&str> = dirty.collections().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["products", "activityLogs"]);
        assert!(Dirty::NONE.is_empty());
        assert_eq!(Dirty::ALL.collections().count(), 6);
    }

    #[test]
    fn test_add_product_logs_and_rejects_duplicates() {
        let mut shop = test_shop();
        let dirty = shop.add_product(&admin(), new_product("p9")).unwrap();

        assert_eq!(dirty, Dirty::PRODUCTS | Dirty::ACTIVITY_LOGS);
        assert_eq!(shop.state().products.len(), 6);
        let log = &shop.state().activity_logs[0];
        assert_eq!(log.action, ActivityAction::InventoryAdd);
        assert_eq!(log.details, "Added new product: Bluetooth Speaker (EL-010)");
        assert_eq!(log.user_name, "Admin User");

        let err = shop.add_product(&admin(), new_product("p9")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateProduct(_)));
    }

    #[test]
    fn test_add_product_validates() {
        let mut shop = test_shop();
        let mut bad = new_product("p9");
        bad.selling_price = Money::new(-1.0);
        assert!(matches!(
            shop.add_product(&admin(), bad),
            Err(CoreError::Validation(ValidationError::Negative { .. }))
        ));
        assert!(shop.state().activity_logs.is_empty());
    }

    #[test]
    fn test_update_and_delete_product() {
        let mut shop = test_shop();
        let mut hat = shop.state().product("p4").unwrap().clone();
        hat.selling_price = Money::new(40.0);

        shop.update_product(&admin(), hat).unwrap();
        assert_eq!(shop.state().product("p4").unwrap().selling_price, Money::new(40.0));
        assert_eq!(shop.state().activity_logs[0].details, "Updated product: Fedora Hat");

        assert!(matches!(
            shop.update_product(&admin(), new_product("nope")),
            Err(CoreError::ProductNotFound(_))
        ));

        shop.delete_product(&admin(), "p4");
        assert!(shop.state().product("p4").is_none());
        assert_eq!(shop.state().activity_logs[0].details, "Deleted product: Fedora Hat");

        shop.delete_product(&admin(), "p4");
        assert_eq!(shop.state().activity_logs[0].details, "Deleted product: Unknown");
    }

    #[test]
    fn test_expenses() {
        let mut shop = test_shop();
        let expense = Expense {
            id: "e1".into(),
            description: "Electricity".into(),
            amount: Money::new(45.5),
            date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            category: "Utilities".into(),
        };

        shop.add_expense(&admin(), expense).unwrap();
        assert_eq!(shop.state().activity_logs[0].details, "Added expense: $45.50 for Electricity");

        let dirty = shop.delete_expense(&admin(), "e1");
        assert!(dirty.contains(Collection::Expenses));
        assert!(shop.state().expenses.is_empty());
        assert_eq!(shop.state().activity_logs[0].action, ActivityAction::ExpenseDelete);
        assert_eq!(shop.state().activity_logs[0].details, "Deleted expense: Electricity - $45.50");
    }

    #[test]
    fn test_users() {
        let mut shop = test_shop();
        let user = User {
            id: "u3".into(),
            name: "Cashier Hodan".into(),
            role: UserRole::Employee,
            pin: "4321".into(),
        };
        shop.add_user(&admin(), user.clone()).unwrap();
        assert_eq!(shop.state().activity_logs[0].details, "Created new user: Cashier Hodan");

        let mut clash = user.clone();
        clash.id = "u4".into();
        clash.pin = "1234".into();
        assert!(matches!(
            shop.add_user(&admin(), clash),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));

        let mut same_id = user.clone();
        same_id.pin = "8765".into();
        assert!(matches!(shop.add_user(&admin(), same_id), Err(CoreError::DuplicateUser(_))));
        assert_eq!(shop.state().users.iter().filter(|u| u.id == "u3").count(), 1);

        let mut renamed = user;
        renamed.name = "Hodan".into();
        shop.update_user(&admin(), renamed).unwrap();
        assert_eq!(shop.state().user("u3").unwrap().name, "Hodan");

        shop.delete_user(&admin(), "u3").unwrap();
        assert_eq!(shop.state().activity_logs[0].details, "Deleted user: Hodan");
        assert!(matches!(shop.delete_user(&admin(), "u3"), Err(CoreError::UserNotFound(_))));
    }

    #[test]
    fn test_categories() {
        let mut shop = test_shop();
        assert_eq!(shop.add_category("Phones").unwrap(), Dirty::CATEGORIES);
        assert!(matches!(shop.add_category("Hats"), Err(CoreError::DuplicateCategory(_))));
        assert!(shop.add_category("  ").is_err());

        assert_eq!(shop.remove_category("Phones"), Dirty::CATEGORIES);
        assert_eq!(shop.remove_category("Phones"), Dirty::NONE);
    }

    #[test]
    fn test_login_logout() {
        let mut shop = test_shop();
        assert!(shop.login("9999").is_none());

        let (user, dirty) = shop.login("0000").unwrap();
        assert_eq!(user.id, "u2");
        assert_eq!(dirty, Dirty::ACTIVITY_LOGS);
        assert_eq!(shop.state().activity_logs[0].action, ActivityAction::Login);

        shop.log_logout(&Actor::from(&user));
        assert_eq!(shop.state().activity_logs[0].details, "User logged out");
        assert_eq!(shop.state().activity_logs.len(), 2);
    }

    #[test]
    fn test_checkout_clears_cart() {
        let mut shop = test_shop();
        let mut cart = Cart::new();
        let cable = shop.state().product("p2").unwrap().clone();
        cart.add_item(&cable);
        cart.add_item(&cable);

        let sale = shop.checkout(&mut cart, PaymentMethod::Cash, &admin()).unwrap();

        assert!(cart.is_empty());
        assert_eq!(sale.total_amount, Money::new(30.0));
        assert_eq!(shop.state().product("p2").unwrap().quantity, 48);
        assert_eq!(shop.state().sales.len(), 1);
        assert!(shop.checkout(&mut cart, PaymentMethod::Cash, &admin()).is_none());
    }

    #[test]
    fn test_report_and_dashboard_read_live_state() {
        let mut shop = test_shop();
        let mut cart = Cart::new();
        let cable = shop.state().product("p2").unwrap().clone();
        cart.add_item(&cable);
        cart.add_item(&cable);
        shop.checkout(&mut cart, PaymentMethod::Cash, &admin()).unwrap();
        shop.add_expense(
            &admin(),
            Expense {
                id: "e1".into(),
                description: "Electricity".into(),
                amount: Money::new(45.5),
                date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
                category: "Utilities".into(),
            },
        )
        .unwrap();

        let report = shop.report(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        assert_eq!(report.financials.revenue, Money::new(30.0));
        assert_eq!(report.financials.cogs, Money::new(10.0));
        assert_eq!(report.financials.expenses, Money::new(45.5));
        assert_eq!(report.history.len(), 2);

        let dashboard = shop.dashboard();
        assert_eq!(dashboard.window_end, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(dashboard.revenue, Money::new(30.0));
        assert_eq!(dashboard.expenses, Money::new(45.5));
        assert_eq!(dashboard.transaction_count, 1);
    }

    #[test]
    fn test_restore_logs_and_reports_dirty() {
        let mut shop = test_shop();
        let doc = parse_backup(r#"{ "categories": ["Phones"], "users": [] }"#).unwrap();

        let dirty = shop.restore(doc, &admin());

        assert_eq!(dirty, Dirty::USERS | Dirty::CATEGORIES | Dirty::ACTIVITY_LOGS);
        assert!(shop.state().users.is_empty());
        assert_eq!(shop.state().activity_logs[0].action, ActivityAction::DataRestore);
    }
}
