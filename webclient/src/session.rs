use seed::prelude::*;

use shared::lib::User;

use crate::api::{self, ApiError};

const STORAGE_KEY: &str = "purple_player_user";

/// The signed-in user, mirrored to `LocalStorage` so a reload keeps the
/// session. Owned by the root model and lent to components.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn load() -> Self {
        Session {
            user: LocalStorage::get(STORAGE_KEY).ok(),
        }
    }

    #[cfg(test)]
    pub fn with_user(user: User) -> Self {
        Session { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn sign_in(&mut self, user: User) {
        if let Err(e) = LocalStorage::insert(STORAGE_KEY, &user) {
            log::error!("Failed to persist session: {:?}", e);
        }

        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        if let Err(e) = LocalStorage::remove(STORAGE_KEY) {
            log::warn!("Failed to clear stored session: {:?}", e);
        }

        self.user = None;
    }
}

/// Creates the account on the backend and returns the user to sign in.
pub async fn register(
    name: String,
    email: String,
    avatar: Option<String>,
) -> Result<User, ApiError> {
    api::register_user(&name, &email, avatar.as_deref()).await?;

    Ok(User {
        name,
        email,
        avatar,
    })
}
