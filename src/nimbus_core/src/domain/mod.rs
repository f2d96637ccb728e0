pub mod account;
pub mod email;
pub mod forecast;
pub mod password;
pub mod saved_cities;
pub mod tokens;
