pub mod session_cookie;

pub use session_cookie::{
    SessionConfig, SessionError, authenticate, create_last_email_cookie, create_removal_cookie,
    create_session_ended_cookie, generate_session_cookie,
};
