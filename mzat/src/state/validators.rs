use crate::state::{AuthState, ProfileFormState};
use metazapp_api::{RegisterRequest, UpdateProfileRequest, User};

/// Validate and build a RegisterRequest from the register tab.
///
/// Runs entirely locally; nothing goes over the wire until this passes.
pub fn validate_and_build_registration(form: &AuthState) -> Result<RegisterRequest, String> {
    // Mismatch is reported before the length check
    if form.password != form.confirm_password {
        return Err("Passwords do not match".to_string());
    }

    if form.password.chars().count() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }

    Ok(RegisterRequest {
        name: form.name.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
    })
}

/// Build an UpdateProfileRequest carrying only the fields that changed.
///
/// Empty fields count as unchanged. Returns None when nothing changed so the
/// caller can skip the request entirely.
pub fn build_profile_update(form: &ProfileFormState, user: &User) -> Option<UpdateProfileRequest> {
    let name = (!form.name.is_empty() && form.name != user.name).then(|| form.name.clone());
    let email = (!form.email.is_empty() && form.email != user.email).then(|| form.email.clone());

    if name.is_none() && email.is_none() {
        return None;
    }

    Some(UpdateProfileRequest { name, email })
}
