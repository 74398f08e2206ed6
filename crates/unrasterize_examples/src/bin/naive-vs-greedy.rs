use rand::rngs::StdRng;
use rand::SeedableRng;
use unrasterize::prelude::*;
use unrasterize_examples::{init_tracing, PopulationConfig, SyntheticPopulation};

/// Compares how well each method spreads points over the settlements.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(1234);
    let population = SyntheticPopulation::generate(&PopulationConfig::default(), &mut rng);
    let settlements = population.settlements.clone();
    let raster = population.into_raster(None);

    let greedy = GreedyUnrasterizer::new(SelectionConfig::new(10)).unrasterize(&raster)?;
    let naive = NaiveUnrasterizer::new(greedy.len()).unrasterize(&raster)?;

    for (name, selection) in [("greedy", &greedy), ("naive", &naive)] {
        let covered = settlements
            .iter()
            .filter(|s| {
                selection.points.iter().any(|p| {
                    let dr = p.row as f32 - s.row;
                    let dc = p.col as f32 - s.col;
                    (dr * dr + dc * dc).sqrt() <= 3.0 * s.spread
                })
            })
            .count();
        tracing::info!(
            "{name:>6}: {} points, total {:.0}, {covered}/{} settlements covered",
            selection.len(),
            selection.total_value(),
            settlements.len()
        );
    }

    Ok(())
}
