mod account;
mod dashboard;
mod favorite;
mod forgot_password;
mod history;
mod index;
mod login;
mod logout;
mod preferences;
mod register;
mod reset_password;
mod verify_email;
mod weather;

pub use account::delete_account;
pub use dashboard::{dashboard, search_dashboard};
pub use favorite::toggle_favorite;
pub use forgot_password::{forgot_password, forgot_password_page};
pub use history::clear_history;
pub use index::index;
pub use login::{login, login_page};
pub use logout::logout;
pub use preferences::{update_language, update_theme};
pub use register::{register, register_page};
pub use reset_password::{reset_password, reset_password_page};
pub use verify_email::verify_email;
pub use weather::weather;

use secrecy::Secret;
use serde::Serialize;

/// `{"success": true}`
#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for Success {
    fn default() -> Self {
        Self::new()
    }
}

/// Absent form fields read as empty so validation, not extraction, reports them.
pub(crate) fn secret_or_empty(value: Option<Secret<String>>) -> Secret<String> {
    value.unwrap_or_else(|| Secret::new(String::new()))
}
