use crate::{
    Config, OneCallPayload,
    provider::{file::FileSource, openweather::OpenWeatherSource},
};
use async_trait::async_trait;
use std::{fmt::Debug, path::PathBuf};

pub mod file;
pub mod openweather;

/// Where to fetch a forecast for.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub lat: f64,
    pub lon: f64,
    pub units: String,
}

impl ForecastRequest {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, units: "metric".to_string() }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }
}

/// Produces raw forecast payloads for the pipeline.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, request: &ForecastRequest) -> anyhow::Result<OneCallPayload>;
}

/// A saved payload file when one is given, otherwise the OpenWeather API.
pub fn source_from_config(
    config: &Config,
    file: Option<PathBuf>,
) -> anyhow::Result<Box<dyn ForecastSource>> {
    let boxed: Box<dyn ForecastSource> = match file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(OpenWeatherSource::new(config.api_key()?.to_owned())),
    };

    Ok(boxed)
}
