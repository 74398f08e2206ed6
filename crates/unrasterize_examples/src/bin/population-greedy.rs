use rand::rngs::StdRng;
use rand::SeedableRng;
use unrasterize::prelude::*;
use unrasterize_examples::{
    init_tracing, output_path_arg, write_geojson, PopulationConfig, SyntheticPopulation,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(42);
    let population = SyntheticPopulation::generate(&PopulationConfig::default(), &mut rng);
    let qualifying = population.grid.qualifying_total(1.0);
    let raster = population.into_raster(None);

    let config = SelectionConfig::new(5).with_threshold(1.0);
    let selection = GreedyUnrasterizer::new(config).unrasterize(&raster)?;

    tracing::info!(
        "{} points from {} candidates, total {:.0} of {:.0}",
        selection.len(),
        selection.candidates_ranked,
        selection.total_value(),
        qualifying
    );

    write_geojson(output_path_arg().as_deref(), &selection.points, "population")?;
    Ok(())
}
