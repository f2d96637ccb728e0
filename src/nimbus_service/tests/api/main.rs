mod account;
mod dashboard;
mod login;
mod preferences;
mod register;
mod weather;
