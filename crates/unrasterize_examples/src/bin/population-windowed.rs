use rand::rngs::StdRng;
use rand::SeedableRng;
use unrasterize::prelude::*;
use unrasterize_examples::{
    init_tracing, output_path_arg, write_geojson, PopulationConfig, SyntheticPopulation,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = PopulationConfig {
        rows: 1200,
        cols: 1600,
        settlements: 90,
        ..PopulationConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(7);
    let raster = SyntheticPopulation::generate(&config, &mut rng).into_raster(Some((256, 256)));

    let unrasterizer = WindowedUnrasterizer::new(SelectionConfig::new(8));
    let mut sink = FnSink::new(|event: UnrasterizeEvent| match event {
        UnrasterizeEvent::BlockFinished {
            index,
            block,
            summary,
        } => {
            tracing::debug!(
                "block {index} {block}: {} points, {:.0} people",
                summary.points,
                summary.value_total
            );
        }
        UnrasterizeEvent::Warning { context, message } => {
            tracing::warn!("{context}: {message}");
        }
        _ => {}
    });
    let selection = unrasterizer.unrasterize_with_events(&raster, &mut sink)?;

    tracing::info!(
        "{} blocks, {} points, total {:.0}",
        selection.blocks_processed,
        selection.len(),
        selection.total_value()
    );

    write_geojson(output_path_arg().as_deref(), &selection.points, "population")?;
    Ok(())
}
