pub mod event_builder;
pub mod ics_serializer;
pub mod matcher;
pub mod output_sink;
pub mod weather_service;
