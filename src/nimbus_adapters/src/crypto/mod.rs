pub mod argon2_password_hasher;
pub mod jwt_reset_token_signer;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_reset_token_signer::JwtResetTokenSigner;
