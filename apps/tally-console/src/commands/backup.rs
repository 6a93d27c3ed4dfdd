//! # Backup Commands
//!
//! JSON export of every collection, and restore from such a file.
//!
//! ```text
//! export ──► Shop::export_json ──► OriginalElectronics_Backup_2024-03-15.json
//!
//! import ──► parse_backup ──► Shop::restore ──► persist(restored collections)
//!              │
//!              └── invalid file: nothing changes
//! ```

use std::path::{Path, PathBuf};
use tally_core::backup::backup_file_name;
use tally_core::ports::Clock;
use tally_core::{parse_backup, Actor, Dirty, Permission};
use tracing::info;

use crate::error::ConsoleResult;
use crate::state::AppState;

pub async fn export(state: &mut AppState, pin: &str, out: Option<&Path>) -> ConsoleResult<String> {
    let (user, mut dirty) = state.sign_in(pin, Permission::Settings)?;

    let json = state.shop().export_json()?;
    let path = match out {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(backup_file_name(
            &state.config.store_name,
            state.shop().clock().now().date_naive(),
        )),
    };
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "Backup exported");

    dirty |= state.sign_out(&user);
    state.persist(dirty).await?;
    Ok(format!("Backup written to {}", path.display()))
}

pub async fn import(state: &mut AppState, pin: &str, file: &Path) -> ConsoleResult<String> {
    let (user, mut dirty) = state.sign_in(pin, Permission::Settings)?;

    let restored: ConsoleResult<Dirty> = match std::fs::read_to_string(file) {
        Ok(text) => parse_backup(&text).map_err(Into::into),
        Err(e) => Err(e.into()),
    }
    .map(|doc| state.shop_mut().restore(doc, &Actor::from(&user)));

    dirty |= state.sign_out(&user);
    match restored {
        Ok(changed) => {
            dirty |= changed;
            state.persist(dirty).await?;
            let names: Vec<&str> = changed.collections().map(|c| c.key()).collect();
            Ok(format!("Restored {} from {}", names.join(", "), file.display()))
        }
        Err(e) => {
            state.persist(dirty).await?;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{app, ADMIN_PIN, CASHIER_PIN};
    use crate::error::ConsoleError;
    use tally_core::ActivityAction;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tally-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_export_then_import_into_fresh_store() {
        let mut source = app().await;
        let path = temp_file("export.json");
        source.shop_mut().add_category("Phones").unwrap();

        let output = export(&mut source, ADMIN_PIN, Some(path.as_path())).await.unwrap();
        assert!(output.starts_with("Backup written to"));

        let mut target = app().await;
        let output = import(&mut target, ADMIN_PIN, &path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(output.contains("categories"));
        let stored = target.db().collections().load_state().await.unwrap();
        assert!(stored.categories.contains(&"Phones".to_string()));
        // Imported log (login) + restore + logout.
        assert_eq!(stored.activity_logs[0].action, ActivityAction::Logout);
        assert_eq!(stored.activity_logs[1].action, ActivityAction::DataRestore);
    }

    #[tokio::test]
    async fn test_partial_backup_restores_only_present_keys() {
        let mut state = app().await;
        let path = temp_file("partial.json");
        std::fs::write(&path, r#"{"categories": ["Only"]}"#).unwrap();

        let output = import(&mut state, ADMIN_PIN, &path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(output.starts_with("Restored categories, activityLogs"));
        assert_eq!(state.shop().state().categories, vec!["Only".to_string()]);
        assert_eq!(state.shop().state().products.len(), 5);
    }

    #[tokio::test]
    async fn test_invalid_backup_leaves_state_untouched() {
        let mut state = app().await;
        let path = temp_file("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let before = state.shop().state().categories.clone();

        let err = import(&mut state, ADMIN_PIN, &path).await.unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConsoleError::Backup(_)));
        assert_eq!(state.shop().state().categories, before);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let mut state = app().await;
        let err = import(&mut state, ADMIN_PIN, &temp_file("missing.json")).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Io(_)));
    }

    #[tokio::test]
    async fn test_cashier_cannot_export() {
        let mut state = app().await;
        let err = export(&mut state, CASHIER_PIN, None).await.unwrap_err();
        assert!(matches!(err, ConsoleError::PermissionDenied { .. }));
    }
}
