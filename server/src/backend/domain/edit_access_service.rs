use std::sync::Arc;
use tracing::info;

use crate::backend::domain::commands::edit_access::{UnlockEditCommand, UnlockEditResult};

/// Capability check guarding edit mode.
///
/// Whoever holds a secret accepted by the authorizer may edit bills. The
/// shared-password implementation below is what the household uses; a real
/// authentication scheme can replace it without touching the bill logic.
pub trait EditAuthorizer: Send + Sync {
    fn authorize(&self, secret: &str) -> bool;
}

/// One password for the whole household, compared exactly
#[derive(Debug, Clone)]
pub struct SharedPasswordAuthorizer {
    password: String,
}

impl SharedPasswordAuthorizer {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl EditAuthorizer for SharedPasswordAuthorizer {
    fn authorize(&self, secret: &str) -> bool {
        !self.password.is_empty() && secret == self.password
    }
}

/// Service for unlocking edit mode
#[derive(Clone)]
pub struct EditAccessService {
    authorizer: Arc<dyn EditAuthorizer>,
}

impl EditAccessService {
    pub fn new(authorizer: Arc<dyn EditAuthorizer>) -> Self {
        Self { authorizer }
    }

    pub fn with_password(password: impl Into<String>) -> Self {
        Self::new(Arc::new(SharedPasswordAuthorizer::new(password)))
    }

    pub fn authorizer(&self) -> &dyn EditAuthorizer {
        self.authorizer.as_ref()
    }

    pub fn unlock(&self, command: UnlockEditCommand) -> UnlockEditResult {
        info!("Edit unlock attempt (length: {})", command.password.len());

        if self.authorizer.authorize(&command.password) {
            info!("Edit mode unlocked");
            UnlockEditResult {
                success: true,
                message: "Edit mode unlocked".to_string(),
            }
        } else {
            info!("Edit unlock rejected");
            UnlockEditResult {
                success: false,
                message: "Wrong password".to_string(),
            }
        }
    }
}
