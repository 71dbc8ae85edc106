use crate::error::AppError;
use crate::services::identity::Owner;
use crate::state::AppState;
use crate::store::{is_constraint_violation, Store};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::profile::Profile;
use common::requests::ProfileRequest;
use log::info;
use regex::Regex;

const MAX_DISPLAY_NAME_LEN: usize = 80;

pub async fn get(owner: Owner, state: web::Data<AppState>) -> impl Responder {
    match state.store.get_profile(owner.id()) {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => AppError::NotFound("no profile yet".to_string()).error_response(),
        Err(e) => AppError::from(e).error_response(),
    }
}

pub async fn save(
    owner: Owner,
    state: web::Data<AppState>,
    payload: web::Json<ProfileRequest>,
) -> impl Responder {
    match save_profile(&state.store, owner.id(), payload.into_inner()) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.error_response(),
    }
}

/// Lowercases a public handle and checks its shape: 3 to 32 characters of
/// `a-z`, `0-9` and `-`, not starting or ending with a hyphen.
pub(crate) fn validate_handle(handle: &str) -> Result<String, AppError> {
    let handle = handle.trim().to_lowercase();
    let re = Regex::new(r"^[a-z0-9][a-z0-9-]{1,30}[a-z0-9]$")
        .map_err(|e| AppError::Validation(format!("handle pattern: {e}")))?;
    if !re.is_match(&handle) {
        return Err(AppError::Validation(format!(
            "'{handle}' is not a valid handle"
        )));
    }
    Ok(handle)
}

pub fn save_profile(
    store: &Store,
    owner_id: &str,
    request: ProfileRequest,
) -> Result<Profile, AppError> {
    let handle = validate_handle(&request.handle)?;
    let display_name = match request.display_name.trim() {
        "" => handle.clone(),
        name => name.to_string(),
    };
    if display_name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(AppError::Validation(format!(
            "displayName is longer than {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }

    let profile = Profile {
        owner_id: owner_id.to_string(),
        handle,
        display_name,
    };
    store.upsert_profile(&profile).map_err(|e| {
        if is_constraint_violation(&e) {
            AppError::Conflict(format!("handle '{}' is taken", profile.handle))
        } else {
            AppError::from(e)
        }
    })?;
    info!("owner {} now publishes as '{}'", owner_id, profile.handle);
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::temp_store;

    fn request(handle: &str, name: &str) -> ProfileRequest {
        ProfileRequest {
            handle: handle.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn handles_are_normalized_and_checked() {
        assert_eq!(validate_handle(" Acme-Co ").unwrap(), "acme-co");
        let long = "a".repeat(33);
        for bad in ["ab", "-acme", "acme-", "acme co", "acmé", long.as_str()] {
            assert!(validate_handle(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn blank_display_name_falls_back_to_handle() {
        let (_dir, store) = temp_store();
        let p = save_profile(&store, "o1", request("acme", "  ")).unwrap();
        assert_eq!(p.display_name, "acme");
        assert_eq!(store.get_profile("o1").unwrap(), Some(p));
    }

    #[test]
    fn taken_handle_is_a_conflict_and_owner_may_rename() {
        let (_dir, store) = temp_store();
        save_profile(&store, "o1", request("acme", "Acme")).unwrap();
        let err = save_profile(&store, "o2", request("ACME", "Other")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        save_profile(&store, "o1", request("acme-labs", "Acme Labs")).unwrap();
        assert!(store.find_profile_by_handle("acme").unwrap().is_none());
        save_profile(&store, "o2", request("acme", "Other")).unwrap();
    }

    #[test]
    fn overlong_display_name_is_rejected() {
        let (_dir, store) = temp_store();
        let err = save_profile(&store, "o1", request("acme", &"x".repeat(81))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
