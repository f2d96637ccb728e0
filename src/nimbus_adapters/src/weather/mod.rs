pub mod open_meteo_client;

pub use open_meteo_client::OpenMeteoClient;
