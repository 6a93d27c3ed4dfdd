//! # Application State
//!
//! The open store, the in-memory shop loaded from it, and the config.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppState::open(db, config)                                            │
//! │       │  db.collections().load_state()                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │    Shop      │  │    Database      │  │  ConsoleConfig   │          │
//! │  │  (ShopState) │  │  (SQLite pool)   │  │  (read-only)     │          │
//! │  └──────┬───────┘  └────────▲─────────┘  └──────────────────┘          │
//! │         │ mutation → Dirty  │                                           │
//! │         └──── persist(dirty) ┘  save only what changed                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::{authenticate, Actor, Dirty, Permission, Shop, User};
use tally_db::Database;
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug)]
pub struct AppState {
    pub config: ConsoleConfig,
    db: Database,
    shop: Shop,
}

impl AppState {
    /// Loads the shop state from the store.
    pub async fn open(db: Database, config: ConsoleConfig) -> ConsoleResult<Self> {
        let state = db.collections().load_state().await?;
        Ok(Self::with_shop(db, config, Shop::new(state)))
    }

    /// Wraps an already-built shop (tests pin its clock and ids this way).
    pub fn with_shop(db: Database, config: ConsoleConfig, shop: Shop) -> Self {
        AppState { config, db, shop }
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn shop_mut(&mut self) -> &mut Shop {
        &mut self.shop
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Saves the collections a mutation touched.
    pub async fn persist(&self, dirty: Dirty) -> ConsoleResult<()> {
        self.db.collections().save_dirty(self.shop.state(), dirty).await?;
        Ok(())
    }

    /// Signs in by PIN for one command and records the login.
    ///
    /// ## Errors
    /// - `InvalidPin` if no user has this PIN
    /// - `PermissionDenied` if the user's role cannot open `permission`;
    ///   nothing is logged in that case
    pub fn sign_in(&mut self, pin: &str, permission: Permission) -> ConsoleResult<(User, Dirty)> {
        if let Some(user) = authenticate(&self.shop.state().users, pin) {
            if !user.role.can(permission) {
                return Err(ConsoleError::PermissionDenied {
                    user: user.name.clone(),
                    permission,
                });
            }
        }

        let (user, dirty) = self.shop.login(pin).ok_or(ConsoleError::InvalidPin)?;
        debug!(user = %user.name, ?permission, "Signed in");
        Ok((user, dirty))
    }

    pub fn sign_out(&mut self, user: &User) -> Dirty {
        self.shop.log_logout(&Actor::from(user))
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::test_support::{app, ADMIN_PIN, CASHIER_PIN};
    use crate::error::ConsoleError;
    use tally_core::{ActivityAction, Dirty, Permission};

    #[tokio::test]
    async fn test_sign_in_records_login() {
        let mut state = app().await;
        let (user, dirty) = state.sign_in(CASHIER_PIN, Permission::PointOfSale).unwrap();

        assert_eq!(user.id, "u2");
        assert_eq!(dirty, Dirty::ACTIVITY_LOGS);
        let logs = &state.shop().state().activity_logs;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, ActivityAction::Login);
        assert_eq!(logs[0].user_id, "u2");
    }

    #[tokio::test]
    async fn test_sign_in_failures_log_nothing() {
        let mut state = app().await;

        let err = state.sign_in("9999", Permission::Reports).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidPin));
        let err = state.sign_in(CASHIER_PIN, Permission::Settings).unwrap_err();
        assert!(matches!(err, ConsoleError::PermissionDenied { .. }));
        assert!(state.shop().state().activity_logs.is_empty());

        assert!(state.sign_in(ADMIN_PIN, Permission::Settings).is_ok());
    }
}
