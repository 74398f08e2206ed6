use glam::DVec2;
use rand::Rng;
use unrasterize::prelude::*;

/// Nodata sentinel used for water cells in the synthetic rasters.
pub const WATER: f32 = -9999.0;

/// Parameters of a synthetic 100m population raster.
#[derive(Debug, Clone)]
pub struct PopulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub settlements: usize,
    /// Fraction of the map (from the right edge) flooded with nodata.
    pub water_fraction: f32,
    /// Rural background population per cell before noise.
    pub background: f32,
    pub pixel_size: f64,
    pub origin: DVec2,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            rows: 400,
            cols: 600,
            settlements: 24,
            water_fraction: 0.15,
            background: 0.6,
            pixel_size: 100.0,
            origin: DVec2::new(500_000.0, 4_200_000.0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Settlement {
    pub row: f32,
    pub col: f32,
    pub peak: f32,
    pub spread: f32,
}

/// A population raster with its settlements, built from a seeded generator.
#[derive(Debug, Clone)]
pub struct SyntheticPopulation {
    pub grid: Grid,
    pub transform: GeoTransform,
    pub settlements: Vec<Settlement>,
}

impl SyntheticPopulation {
    pub fn generate<R: Rng>(config: &PopulationConfig, rng: &mut R) -> Self {
        let land_fraction = 1.0 - config.water_fraction.clamp(0.0, 1.0);
        let land_cols = (land_fraction * config.cols as f32) as usize;

        let settlements: Vec<Settlement> = (0..config.settlements)
            .map(|_| Settlement {
                row: rng.random::<f32>() * config.rows as f32,
                col: rng.random::<f32>() * land_cols.max(1) as f32,
                peak: 20.0 + rng.random::<f32>() * 180.0,
                spread: 1.5 + rng.random::<f32>() * 8.0,
            })
            .collect();

        let grid = Grid::from_fn(config.rows, config.cols, |row, col| {
            if col >= land_cols {
                return WATER;
            }
            let urban: f32 = settlements
                .iter()
                .map(|s| {
                    let d2 = (row as f32 - s.row).powi(2) + (col as f32 - s.col).powi(2);
                    s.peak * (-d2 / (2.0 * s.spread * s.spread)).exp()
                })
                .sum();
            let rural = config.background * rng.random::<f32>() * 2.0;
            (urban + rural).round()
        })
        .with_nodata(Some(WATER));
        let transform = GeoTransform::north_up(config.origin, config.pixel_size);

        Self {
            grid,
            transform,
            settlements,
        }
    }

    pub fn into_raster(self, block_shape: Option<(usize, usize)>) -> InMemoryRaster {
        let raster = InMemoryRaster::new(self.grid, self.transform);
        match block_shape {
            Some(shape) => raster.with_block_shape(shape),
            None => raster,
        }
    }
}
