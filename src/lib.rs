use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::*,
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Adapter-level failures. Each maps to the fixed message reported in the
/// tool error payload; the underlying cause is logged, never surfaced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeatherError {
    #[error("failed to fetch weather data")]
    Fetch,
    #[error("failed to parse weather data")]
    Parse,
    #[error("no temperature data available")]
    NoData,
}

#[derive(Debug)]
pub struct WeatherServer {
    pub tool_router: ToolRouter<Self>,
    client: reqwest::Client,
    forecast_url: String,
}

impl Default for WeatherServer {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherServer {
    pub fn new() -> Self {
        Self::with_forecast_url(FORECAST_URL)
    }

    /// Point the adapter at an alternate forecast endpoint.
    pub fn with_forecast_url(url: impl Into<String>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client: reqwest::Client::new(),
            forecast_url: url.into(),
        }
    }

    async fn fetch_forecast(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<ForecastResponse, WeatherError> {
        // Coordinates are embedded verbatim; Open-Meteo rejects anything
        // that is not a plain decimal number.
        let url = format!(
            "{}?latitude={}&longitude={}&hourly=temperature_2m,relative_humidity_2m,wind_speed_10m&timezone=auto",
            self.forecast_url, latitude, longitude
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!("open-meteo request failed: {}", e);
            WeatherError::Fetch
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("open-meteo returned status {}", status);
            return Err(WeatherError::Fetch);
        }

        response.json::<ForecastResponse>().await.map_err(|e| {
            tracing::warn!("failed to decode open-meteo body: {}", e);
            WeatherError::Parse
        })
    }

    fn format_forecast(
        latitude: &str,
        longitude: &str,
        time: &str,
        data: &ForecastResponse,
    ) -> Result<String, WeatherError> {
        if data.hourly.temperature_2m.is_empty() {
            return Err(WeatherError::NoData);
        }

        // The three arrays are supposed to align by index; a shorter
        // humidity or wind array is treated as missing data rather than
        // indexed blindly.
        let temperature = data.hourly.temperature_2m[0];
        let humidity = *data
            .hourly
            .relative_humidity_2m
            .first()
            .ok_or(WeatherError::NoData)?;
        let wind_speed = *data
            .hourly
            .wind_speed_10m
            .first()
            .ok_or(WeatherError::NoData)?;

        Ok(format!(
            "The temperature at {}, {} on {} is {:.2}°C with {:.2}% humidity and a wind speed of {:.2} m/s",
            latitude, longitude, time, temperature, humidity, wind_speed
        ))
    }
}

// Open-Meteo JSON response structures
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: HourlySeries,
}

/// Hourly samples, one entry per forecast hour. Only index 0 is consumed.
#[derive(Debug, Deserialize)]
pub struct HourlySeries {
    pub temperature_2m: Vec<f64>,
    pub relative_humidity_2m: Vec<f64>,
    pub wind_speed_10m: Vec<f64>,
}

// Tool parameter struct
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WeatherParams {
    #[serde(rename = "Latitude")]
    #[schemars(description = "Latitude of the location")]
    pub latitude: String,
    #[serde(rename = "Longitude")]
    #[schemars(description = "Longitude of the location")]
    pub longitude: String,
    #[serde(rename = "Time")]
    #[schemars(description = "Time of the forecast")]
    pub time: String,
}

#[rmcp::tool_router]
impl WeatherServer {
    #[rmcp::tool(description = "Get weather forecast")]
    pub async fn weather(
        &self,
        Parameters(params): Parameters<WeatherParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = match self.fetch_forecast(&params.latitude, &params.longitude).await {
            Ok(data) => Self::format_forecast(
                &params.latitude,
                &params.longitude,
                &params.time,
                &data,
            ),
            Err(e) => Err(e),
        };

        // Every failure mode stays a tool-level error payload; the
        // invocation itself succeeds at the protocol layer.
        Ok(match outcome {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
        })
    }
}

#[rmcp::tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Weather forecast server using the Open-Meteo API".into()),
        }
    }
}
