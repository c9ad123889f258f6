pub mod open_meteo_client;
