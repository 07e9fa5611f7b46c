//! Daily step driver and long-run averaging.

use log::{debug, trace};
use rayon::prelude::*;

use crate::grid::Grid;
use crate::terrain::Terrain;

use super::util::clamp_unit;
use super::Climate;

/// Online arithmetic mean: folds `current` into the mean of `step` samples.
#[inline]
pub fn running_mean(mean: f32, current: f32, step: u32) -> f32 {
    (mean * step as f32 + current) / (step as f32 + 1.0)
}

fn fold_into(avg: &mut Grid<f32>, current: &[f32], step: u32, clamp: bool) {
    avg.as_mut_slice()
        .par_iter_mut()
        .zip(current.par_iter())
        .for_each(|(mean, &cur)| {
            let m = running_mean(*mean, cur, step);
            *mean = if clamp { clamp_unit(m) } else { m };
        });
}

fn fold_flags_into(avg: &mut Grid<f32>, current: &[bool], step: u32) {
    avg.as_mut_slice()
        .par_iter_mut()
        .zip(current.par_iter())
        .for_each(|(mean, &cur)| {
            *mean = clamp_unit(running_mean(*mean, if cur { 1.0 } else { 0.0 }, step));
        });
}

impl Climate {
    /// Runs one simulated day in the required order:
    /// wind, temperature, humidity, downfall.
    pub fn step(&mut self, day: u32, seed: i32, terrain: &Terrain) {
        trace!("climate step: day {day}");
        self.calc_wind(day, seed, terrain);
        self.calc_temp_map(terrain);
        self.calc_humidity_map(terrain);
        self.calc_downfall_map();
    }

    /// Fills the averaged fields by simulating the configured horizon.
    ///
    /// A scratch climate is seeded at day 0 and stepped once per day; after
    /// each step its fields are folded into this instance's running means.
    /// The instantaneous fields of `self` are not touched. Cost is
    /// `O(grid_size² · horizon_days)`.
    pub fn calc_average(&mut self, seed: i32, terrain: &Terrain) {
        let days = self.config().horizon_days();
        debug!(
            "averaging climate over {days} days on a {0}x{0} grid",
            self.grid_size()
        );

        let mut simulation = self.scratch();
        simulation.init(0, seed, terrain);

        for day in 0..days {
            simulation.step(day, seed, terrain);
            self.fold_average(day, &simulation);
        }
    }

    fn fold_average(&mut self, step: u32, simulation: &Climate) {
        fold_into(&mut self.avg_wind_map, simulation.wind_map.as_slice(), step, false);
        fold_flags_into(&mut self.avg_rain_map, simulation.rain_map.as_slice(), step);
        fold_flags_into(&mut self.avg_cloud_map, simulation.cloud_map.as_slice(), step);
        fold_into(&mut self.avg_temp_map, simulation.temp_map.as_slice(), step, true);
        fold_into(&mut self.avg_humidity_map, simulation.humidity_map.as_slice(), step, true);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::climate::ClimateModel;
    use crate::config::WorldConfig;
    use crate::noise::ConstantNoise;

    fn generated_terrain(cfg: &WorldConfig) -> Terrain {
        let mut terrain = Terrain::new(cfg).unwrap();
        terrain.gen_depth(cfg.seed);
        terrain
    }

    fn border_snapshot<T: Copy>(grid: &Grid<T>) -> Vec<T> {
        (0..grid.len())
            .filter(|&c| {
                let (i, j) = grid.coords_of(c);
                grid.is_border(i, j)
            })
            .map(|c| grid[c])
            .collect()
    }

    #[test]
    fn running_mean_matches_arithmetic_mean() {
        let samples = [0.2f32, 0.4, 0.9, 0.1, 0.6];
        let mut mean = 0.0;
        for (i, &s) in samples.iter().enumerate() {
            mean = running_mean(mean, s, i as u32);
        }
        let expected: f32 = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!((mean - expected).abs() < 1e-6);
    }

    #[test]
    fn zero_noise_averages_wind_to_base() {
        let cfg = WorldConfig::new(50, 20, 15);
        let terrain = generated_terrain(&cfg);
        let model = ClimateModel::with_wind_noise(&cfg, Arc::new(ConstantNoise(0.0)));
        let mut climate = Climate::new(50, model);

        climate.calc_average(15, &terrain);
        assert!(climate.avg_wind_map.iter().all(|&w| w == 5.0));
    }

    #[test]
    fn steps_keep_fields_bounded() {
        let cfg = WorldConfig::new(50, 20, 15);
        let terrain = generated_terrain(&cfg);
        let mut climate = Climate::new(50, ClimateModel::new(&cfg).unwrap());
        climate.init(0, 15, &terrain);

        for day in 1..=60 {
            climate.step(day, 15, &terrain);
            assert!(climate.humidity_map.iter().all(|&h| (0.0..=1.0).contains(&h)));
            assert!(climate.temp_map.iter().all(|&t| (0.0..=1.0).contains(&t)));
            assert!(climate.wind_map.iter().all(|w| w.is_finite()));
        }
    }

    #[test]
    fn step_operations_leave_border_untouched() {
        let cfg = WorldConfig::new(50, 20, 15);
        let terrain = generated_terrain(&cfg);
        let mut climate = Climate::new(50, ClimateModel::new(&cfg).unwrap());
        climate.init(0, 15, &terrain);
        // Warm up so the interior carries clouds and rain.
        for day in 1..=20 {
            climate.step(day, 15, &terrain);
        }

        let temp = border_snapshot(&climate.temp_map);
        let humidity = border_snapshot(&climate.humidity_map);
        let cloud = border_snapshot(&climate.cloud_map);
        let rain = border_snapshot(&climate.rain_map);

        climate.calc_wind(21, 15, &terrain);
        climate.calc_temp_map(&terrain);
        climate.calc_humidity_map(&terrain);
        climate.calc_downfall_map();

        assert_eq!(temp, border_snapshot(&climate.temp_map));
        assert_eq!(humidity, border_snapshot(&climate.humidity_map));
        assert_eq!(cloud, border_snapshot(&climate.cloud_map));
        assert_eq!(rain, border_snapshot(&climate.rain_map));
    }

    #[test]
    fn short_horizon_averages_are_fractions() {
        let mut cfg = WorldConfig::new(50, 20, 15);
        cfg.climate.days_per_year = 30;
        let terrain = generated_terrain(&cfg);
        let mut climate = Climate::new(50, ClimateModel::new(&cfg).unwrap());

        climate.calc_average(15, &terrain);
        for grid in [
            &climate.avg_rain_map,
            &climate.avg_cloud_map,
            &climate.avg_temp_map,
            &climate.avg_humidity_map,
        ] {
            assert!(grid.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
        // The live fields are not driven by the averaging run.
        assert!(climate.temp_map.iter().all(|&t| t == 0.0));
    }
}
