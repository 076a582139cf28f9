//! Static WMO weather code table.
//!
//! Open-Meteo reports conditions as WMO codes; the rest of the app works in
//! terms of the canonical [`Condition`] taxonomy. `lookup` is total: any code
//! not in the table degrades to `Unknown`, never to an error.

use serde::Serialize;

/// Canonical condition taxonomy, provider-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum Condition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Haze,
    Smoke,
    Dust,
    Sand,
    Tornado,
    Unknown,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Haze => "Haze",
            Self::Smoke => "Smoke",
            Self::Dust => "Dust",
            Self::Sand => "Sand",
            Self::Tornado => "Tornado",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the code table: category, human description, icon code
/// (the day/night suffix is appended during normalization).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionInfo {
    pub condition: Condition,
    pub description: &'static str,
    pub icon: &'static str,
}

const fn info(condition: Condition, description: &'static str, icon: &'static str) -> ConditionInfo {
    ConditionInfo {
        condition,
        description,
        icon,
    }
}

/// Fallback row for codes the table does not know.
pub const fn unknown() -> ConditionInfo {
    info(Condition::Unknown, "Unknown weather", "01")
}

/// Total lookup from WMO code to condition info.
pub fn lookup(code: i64) -> ConditionInfo {
    use Condition::*;
    match code {
        0 => info(Clear, "Clear sky", "01"),
        1 => info(Clouds, "Mainly clear", "02"),
        2 => info(Clouds, "Partly cloudy", "02"),
        3 => info(Clouds, "Overcast", "04"),
        45 => info(Mist, "Fog", "50"),
        48 => info(Mist, "Depositing rime fog", "50"),
        51 => info(Drizzle, "Light drizzle", "09"),
        53 => info(Drizzle, "Moderate drizzle", "09"),
        55 => info(Drizzle, "Dense drizzle", "09"),
        56 => info(Drizzle, "Light freezing drizzle", "09"),
        57 => info(Drizzle, "Dense freezing drizzle", "09"),
        61 => info(Rain, "Slight rain", "10"),
        63 => info(Rain, "Moderate rain", "10"),
        65 => info(Rain, "Heavy rain", "10"),
        66 => info(Rain, "Light freezing rain", "10"),
        67 => info(Rain, "Heavy freezing rain", "10"),
        71 => info(Snow, "Slight snow fall", "13"),
        73 => info(Snow, "Moderate snow fall", "13"),
        75 => info(Snow, "Heavy snow fall", "13"),
        77 => info(Snow, "Snow grains", "13"),
        80 => info(Rain, "Slight rain showers", "09"),
        81 => info(Rain, "Moderate rain showers", "09"),
        82 => info(Rain, "Violent rain showers", "09"),
        85 => info(Snow, "Slight snow showers", "13"),
        86 => info(Snow, "Heavy snow showers", "13"),
        95 => info(Thunderstorm, "Thunderstorm", "11"),
        96 => info(Thunderstorm, "Thunderstorm with slight hail", "11"),
        99 => info(Thunderstorm, "Thunderstorm with heavy hail", "11"),
        _ => unknown(),
    }
}
