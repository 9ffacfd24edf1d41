//! Types that are reusable across the service.

/// A latitude/longitude pair. No geographic range is enforced; out-of-range
/// values pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coords {
    pub latitude: f32,
    pub longitude: f32,
}

/// One weather condition entry as reported by the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// The raw temperature block from the source, copied without conversion.
/// Values are assumed to already be in Imperial units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureReading {
    pub temp: f32,
    pub feels_like: f32,
    pub min: f32,
    pub max: f32,
    pub pressure: i64,
    pub humidity: i64,
    pub sea_level: i64,
    pub ground_level: i64,
}

/// Weather data as normalized from the upstream source. Lives for one
/// source call; coordinates are the ones the source reported back, which
/// may differ from the requested ones when the provider snaps to a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceWeather {
    pub coords: Coords,
    pub conditions: Vec<Condition>,
    pub temperature: TemperatureReading,
}

/// Qualitative temperature band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempBand {
    Unknown,
    Hot,
    Cold,
    Moderate,
}

impl TempBand {
    /// Bucket a current-temperature reading.
    ///
    /// Exactly 80.0 matches none of the arms and stays `Unknown`; so does
    /// NaN. The gap at 80.0 is intentional and load-bearing for callers
    /// that key off the `unknown` tag.
    pub fn from_current(temp: f32) -> Self {
        if temp < 40.0 {
            TempBand::Cold
        } else if temp < 80.0 {
            TempBand::Moderate
        } else if temp > 80.0 {
            TempBand::Hot
        } else {
            TempBand::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TempBand::Unknown => "unknown",
            TempBand::Hot => "hot",
            TempBand::Cold => "cold",
            TempBand::Moderate => "moderate",
        }
    }
}

impl std::fmt::Display for TempBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The domain object handed to the response encoder: condition names in
/// source order (duplicates retained) plus the classified band.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub coords: Coords,
    pub states: Vec<String>,
    pub temperature: TempBand,
}
