// security/src/session.rs

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;
use tracing::{debug, warn};

use crate::claims::{decode_claims, Claims};
use crate::roles::Role;

const TOKEN_FILE: &str = "token";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token is expired or not decodable: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// The decoded identity of the signed-in user, plus the raw token so the
/// REST client can attach it as a bearer header.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    pub doctor_id: Option<i32>,
    pub nurse_id: Option<i32>,
    pub token: String,
}

impl Identity {
    fn from_claims(claims: Claims, token: String) -> Self {
        Identity {
            id: claims.id,
            name: claims.name,
            email: claims.email,
            role: claims.role,
            doctor_id: claims.doctor_id,
            nurse_id: claims.nurse_id,
            token,
        }
    }
}

/// On-disk persistence for the bearer token, under a fixed file name —
/// the local-storage analog.
#[derive(Debug, Clone)]
pub struct TokenStorage {
    dir: PathBuf,
}

impl TokenStorage {
    pub fn new(dir: PathBuf) -> Self {
        TokenStorage { dir }
    }

    /// Default location under the platform data directory.
    pub fn default_location(app_name: &str) -> Self {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);
        TokenStorage { dir: base.join(app_name) }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(self.token_path()) {
            Ok(s) => {
                let s = s.trim().to_string();
                if s.is_empty() { None } else { Some(s) }
            }
            Err(_) => None,
        }
    }

    pub fn save(&self, token: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.token_path(), token)
    }

    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(self.token_path()) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to clear stored token: {}", e);
            }
        }
    }
}

/// Process-wide session state. Read-only from every page; only the login and
/// logout actions mutate it. All mutation happens on the single UI thread, the
/// lock exists for the `Arc` sharing, not for contention.
#[derive(Debug)]
pub struct SessionStore {
    identity: RwLock<Option<Identity>>,
    storage: TokenStorage,
}

impl SessionStore {
    pub fn new(storage: TokenStorage) -> Self {
        SessionStore { identity: RwLock::new(None), storage }
    }

    /// Decode-on-boot: restores the session from the stored token. An expired
    /// or undecodable token is purged and the store stays logged out.
    pub fn init(&self) {
        let Some(token) = self.storage.load() else {
            return;
        };
        match decode_claims(&token) {
            Ok(claims) => {
                debug!("session restored for {}", claims.name);
                *self.identity.write().expect("session lock") =
                    Some(Identity::from_claims(claims, token));
            }
            Err(e) => {
                debug!("stored token rejected: {}", e);
                self.storage.clear();
            }
        }
    }

    /// Accepts a freshly issued token, decodes it and persists it. A token
    /// that does not decode leaves the store logged out and purged.
    pub fn login(&self, token: &str) -> Result<Identity, AuthError> {
        match decode_claims(token) {
            Ok(claims) => {
                self.storage.save(token)?;
                let identity = Identity::from_claims(claims, token.to_string());
                *self.identity.write().expect("session lock") = Some(identity.clone());
                Ok(identity)
            }
            Err(e) => {
                self.storage.clear();
                *self.identity.write().expect("session lock") = None;
                Err(AuthError::InvalidToken(e))
            }
        }
    }

    pub fn logout(&self) {
        *self.identity.write().expect("session lock") = None;
        self.storage.clear();
    }

    pub fn current(&self) -> Option<Identity> {
        self.identity.read().expect("session lock").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.read().expect("session lock").is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.read().expect("session lock").as_ref().map(|i| i.role)
    }

    pub fn token(&self) -> Option<String> {
        self.identity
            .read()
            .expect("session lock")
            .as_ref()
            .map(|i| i.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::test_tokens;

    fn scratch_storage(tag: &str) -> TokenStorage {
        let dir = std::env::temp_dir()
            .join(format!("clinic-session-test-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        TokenStorage::new(dir)
    }

    const FUTURE: u64 = 4_102_444_800;

    #[test]
    fn login_persists_and_init_restores() {
        let storage = scratch_storage("restore");
        let token = test_tokens::issue(Role::Nurse, FUTURE);

        let store = SessionStore::new(storage.clone());
        store.login(&token).unwrap();
        assert_eq!(store.role(), Some(Role::Nurse));

        // Fresh store over the same storage: decode-on-boot.
        let rebooted = SessionStore::new(storage);
        assert!(!rebooted.is_authenticated());
        rebooted.init();
        assert_eq!(rebooted.role(), Some(Role::Nurse));
        assert_eq!(rebooted.token(), Some(token));
    }

    #[test]
    fn expired_stored_token_is_purged_on_init() {
        let storage = scratch_storage("expired");
        let token = test_tokens::issue(Role::Admin, 1_000);
        storage.save(&token).unwrap();

        let store = SessionStore::new(storage.clone());
        store.init();
        assert!(!store.is_authenticated());
        assert!(storage.load().is_none(), "expired token must be purged");
    }

    #[test]
    fn bad_login_leaves_store_logged_out() {
        let storage = scratch_storage("bad");
        let store = SessionStore::new(storage);
        assert!(store.login("garbage").is_err());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn logout_clears_memory_and_disk() {
        let storage = scratch_storage("logout");
        let store = SessionStore::new(storage.clone());
        store.login(&test_tokens::issue(Role::Doctor, FUTURE)).unwrap();
        store.logout();
        assert!(!store.is_authenticated());
        assert!(storage.load().is_none());
    }
}
