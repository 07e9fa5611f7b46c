//! Climate overlay export: one grayscale PNG per climate field.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::climate::Climate;
use crate::grid::Grid;

use super::png::{export_grid_png_f32, ExportError, PngExportOptions};

/// A climate field that can be rendered as an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Wind,
    Cloud,
    Rain,
    Humidity,
    Temperature,
    AvgWind,
    AvgCloud,
    AvgRain,
    AvgHumidity,
    AvgTemperature,
}

impl Overlay {
    pub const ALL: [Overlay; 10] = [
        Overlay::Wind,
        Overlay::Cloud,
        Overlay::Rain,
        Overlay::Humidity,
        Overlay::Temperature,
        Overlay::AvgWind,
        Overlay::AvgCloud,
        Overlay::AvgRain,
        Overlay::AvgHumidity,
        Overlay::AvgTemperature,
    ];

    /// The five fields that change every simulated day.
    pub const INSTANTANEOUS: [Overlay; 5] = [
        Overlay::Wind,
        Overlay::Cloud,
        Overlay::Rain,
        Overlay::Humidity,
        Overlay::Temperature,
    ];

    /// Short name used in file names and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Overlay::Wind => "wind",
            Overlay::Cloud => "cloud",
            Overlay::Rain => "rain",
            Overlay::Humidity => "humidity",
            Overlay::Temperature => "temp",
            Overlay::AvgWind => "avg_wind",
            Overlay::AvgCloud => "avg_cloud",
            Overlay::AvgRain => "avg_rain",
            Overlay::AvgHumidity => "avg_humidity",
            Overlay::AvgTemperature => "avg_temp",
        }
    }

    /// Value range mapped onto black..white.
    pub fn value_range(self) -> (f32, f32) {
        match self {
            Overlay::Wind | Overlay::AvgWind => (0.0, 10.0),
            _ => (0.0, 1.0),
        }
    }

    /// Copies the selected field out of `climate` as scalars.
    pub fn field(self, climate: &Climate) -> Grid<f32> {
        let flags = |grid: &Grid<bool>| -> Grid<f32> {
            Grid::from_vec(
                grid.size(),
                grid.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
            )
        };
        match self {
            Overlay::Wind => climate.wind_map.clone(),
            Overlay::Cloud => flags(&climate.cloud_map),
            Overlay::Rain => flags(&climate.rain_map),
            Overlay::Humidity => climate.humidity_map.clone(),
            Overlay::Temperature => climate.temp_map.clone(),
            Overlay::AvgWind => climate.avg_wind_map.clone(),
            Overlay::AvgCloud => climate.avg_cloud_map.clone(),
            Overlay::AvgRain => climate.avg_rain_map.clone(),
            Overlay::AvgHumidity => climate.avg_humidity_map.clone(),
            Overlay::AvgTemperature => climate.avg_temp_map.clone(),
        }
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Overlay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Overlay::ALL
            .iter()
            .copied()
            .find(|o| o.name() == s)
            .ok_or_else(|| format!("unknown overlay '{s}'"))
    }
}

/// Exports one climate overlay as a 16-bit grayscale PNG.
pub fn export_overlay_png(
    climate: &Climate,
    overlay: Overlay,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    let (min, max) = overlay.value_range();
    export_grid_png_f32(&overlay.field(climate), path, min, max, options)
}

/// Exports every overlay in `overlays` as `{base_name}_{overlay}.png` under
/// `output_dir`.
pub fn export_overlays_png(
    climate: &Climate,
    overlays: &[Overlay],
    output_dir: &Path,
    base_name: &str,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    std::fs::create_dir_all(output_dir)?;
    for &overlay in overlays {
        let path = output_dir.join(format!("{base_name}_{overlay}.png"));
        export_overlay_png(climate, overlay, &path, options)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::ClimateModel;
    use crate::config::WorldConfig;
    use tempfile::tempdir;

    fn climate() -> Climate {
        let config = WorldConfig::new(50, 20, 1);
        Climate::new(50, ClimateModel::new(&config).unwrap())
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for overlay in Overlay::ALL {
            assert_eq!(overlay.name().parse::<Overlay>(), Ok(overlay));
        }
        assert!("pressure".parse::<Overlay>().is_err());
    }

    #[test]
    fn boolean_fields_become_unit_scalars() {
        let mut climate = climate();
        climate.rain_map[(4, 4)] = true;
        let field = Overlay::Rain.field(&climate);
        assert_eq!(field[(4, 4)], 1.0);
        assert_eq!(field[(4, 5)], 0.0);
    }

    #[test]
    fn export_every_overlay() {
        let mut climate = climate();
        climate.wind_map.fill(5.0);
        climate.avg_temp_map.fill(0.25);

        let dir = tempdir().unwrap();
        export_overlays_png(&climate, &Overlay::ALL, dir.path(), "world", &PngExportOptions::default())
            .unwrap();

        for overlay in Overlay::ALL {
            let path = dir.path().join(format!("world_{}.png", overlay.name()));
            assert!(path.exists(), "Missing file for {overlay:?}");
        }

        let wind = image::open(dir.path().join("world_wind.png")).unwrap().into_luma16();
        assert_eq!(wind.get_pixel(10, 10)[0], 32767);
    }
}
