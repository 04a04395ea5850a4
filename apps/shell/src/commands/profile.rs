//! # Profile Commands
//!
//! Store profile (name shown on invoices) and the adjustments screen.

use pambala_core::validation::validate_name;
use pambala_core::Profile;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::{Notifier, SessionState, StoreState};

/// Toast shown after the profile is saved.
pub const PROFILE_SAVED_TOAST: &str = "Perfil actualizado!";

pub fn get_profile(store: &StoreState) -> Profile {
    debug!("get_profile command");
    store.inner().profile().get().as_ref().clone()
}

/// Replaces the profile.
///
/// ## Errors
/// - `ValidationError` if the store name is blank
pub fn update_profile(store: &StoreState, toast: &Notifier, profile: Profile) -> ApiResult<Profile> {
    debug!(store_name = %profile.store_name, "update_profile command");
    validate_name("store name", &profile.store_name)?;

    store.inner().profile().update(profile.clone())?;
    info!(store_name = %profile.store_name, "Profile updated");
    toast.show(PROFILE_SAVED_TOAST);

    Ok(profile)
}

/// Flips the dark mode preference.
///
/// ## Returns
/// The new value.
pub fn toggle_dark_mode(session: &SessionState) -> bool {
    let dark = session.toggle_dark_mode();
    debug!(dark, "toggle_dark_mode command");
    dark
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_profile() {
        let store = StoreState::empty("Pambala AO");
        let toast = Notifier::default();

        let profile = Profile {
            store_name: "Kitanda da Rosa".into(),
            nif: "5417000000".into(),
            ..get_profile(&store)
        };
        update_profile(&store, &toast, profile).unwrap();
        assert_eq!(get_profile(&store).store_name, "Kitanda da Rosa");
        assert_eq!(toast.current().as_deref(), Some(PROFILE_SAVED_TOAST));

        let blank = Profile {
            store_name: " ".into(),
            ..get_profile(&store)
        };
        assert!(update_profile(&store, &toast, blank).is_err());
        assert_eq!(get_profile(&store).store_name, "Kitanda da Rosa");
    }

    #[test]
    fn test_dark_mode_toggles() {
        let session = SessionState::new();
        assert!(toggle_dark_mode(&session));
        assert!(!toggle_dark_mode(&session));
    }
}
