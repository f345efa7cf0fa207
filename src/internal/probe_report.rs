//! Measures probe lengths of `HashTable` as it fills with random keys and plots them.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

use plotters::prelude::*;
use primehash::HashTable;
use rand::{Rng, distr::Alphanumeric};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Keys inserted over the whole run
const TOTAL_KEYS: usize = 20_000;
/// Insert count between two measurements
const CHECKPOINT_EVERY: usize = 500;
/// Length of the inserted keys
const KEY_LEN: usize = 12;
/// Absent keys looked up per measurement
const MISS_SAMPLES: usize = 1_000;
/// Output image
const OUTPUT: &str = "probe_report.png";

/// Probe statistics at one point of the run
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    /// Keys inserted so far
    keys: usize,
    /// Bucket array length
    capacity: usize,
    /// Load percentage
    load: usize,
    /// Mean probes of a successful lookup
    avg_hit: f64,
    /// Mean probes of an unsuccessful lookup
    avg_miss: f64,
    /// Longest successful lookup
    worst_hit: usize,
}

/// Random alphanumeric key of `len` characters
fn random_key<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Measures lookups of every inserted key and of random absent keys
fn measure<R: Rng>(table: &HashTable, inserted: &[String], rng: &mut R) -> Checkpoint {
    let hits: Vec<usize> = inserted.iter().map(|key| table.probe_count(key)).collect();
    // Absent keys are one character longer than any inserted key
    let misses: usize = (0..MISS_SAMPLES)
        .map(|_| table.probe_count(&random_key(rng, KEY_LEN + 1)))
        .sum();

    Checkpoint {
        keys: inserted.len(),
        capacity: table.capacity(),
        load: table.load(),
        avg_hit: hits.iter().sum::<usize>() as f64 / hits.len().max(1) as f64,
        avg_miss: misses as f64 / MISS_SAMPLES as f64,
        worst_hit: hits.iter().copied().max().unwrap_or(0),
    }
}

/// Renders probe lengths and load against the number of inserted keys
fn draw(checkpoints: &[Checkpoint]) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let root = BitMapBackend::new(OUTPUT, (1200, 900)).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((2, 1));
    let (Some(upper), Some(lower)) = (areas.first(), areas.get(1)) else {
        return Ok(());
    };

    let max_keys = checkpoints.last().map_or(1, |checkpoint| checkpoint.keys);
    let max_probes = checkpoints
        .iter()
        .map(|checkpoint| checkpoint.avg_miss.max(checkpoint.worst_hit as f64))
        .fold(1.0, f64::max) *
        1.1; // Add 10% margin

    let mut probes_chart = ChartBuilder::on(upper)
        .caption("Probe Lengths While Filling the Table", (font_family, 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_keys, 0.0..max_probes)?;

    probes_chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Probes per Lookup")
        .draw()?;

    let hit_style = ShapeStyle::from(&RGBColor(50, 90, 220)).stroke_width(2);
    let miss_style = ShapeStyle::from(&RGBColor(220, 50, 50)).stroke_width(2);
    let worst_style = ShapeStyle::from(&RGBColor(180, 50, 180)).stroke_width(1);

    probes_chart
        .draw_series(LineSeries::new(
            checkpoints.iter().map(|checkpoint| (checkpoint.keys, checkpoint.avg_hit)),
            hit_style,
        ))?
        .label("Average successful lookup")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], hit_style));

    probes_chart
        .draw_series(LineSeries::new(
            checkpoints.iter().map(|checkpoint| (checkpoint.keys, checkpoint.avg_miss)),
            miss_style,
        ))?
        .label("Average unsuccessful lookup")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], miss_style));

    probes_chart
        .draw_series(LineSeries::new(
            checkpoints.iter().map(|checkpoint| (checkpoint.keys, checkpoint.worst_hit as f64)),
            worst_style,
        ))?
        .label("Worst successful lookup")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], worst_style));

    probes_chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    let mut load_chart = ChartBuilder::on(lower)
        .caption("Load Factor", (font_family, 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_keys, 0..100_usize)?;

    load_chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Load (%)")
        .draw()?;

    let load_style = ShapeStyle::from(&RGBColor(50, 180, 50)).stroke_width(2);
    load_chart
        .draw_series(LineSeries::new(
            checkpoints.iter().map(|checkpoint| (checkpoint.keys, checkpoint.load)),
            load_style,
        ))?
        .label("count * 100 / size")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], load_style));

    load_chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut rng = rand::rng();
    let mut table = HashTable::new()?;
    let mut inserted = Vec::with_capacity(TOTAL_KEYS);
    let mut checkpoints = Vec::new();

    for n in 1..=TOTAL_KEYS {
        let key = random_key(&mut rng, KEY_LEN);
        table.insert(key.clone(), n.to_string())?;
        inserted.push(key);

        if n % CHECKPOINT_EVERY == 0 {
            let checkpoint = measure(&table, &inserted, &mut rng);
            info!(
                keys = checkpoint.keys,
                capacity = checkpoint.capacity,
                load = checkpoint.load,
                avg_hit = checkpoint.avg_hit,
                avg_miss = checkpoint.avg_miss,
                worst_hit = checkpoint.worst_hit,
                "checkpoint"
            );
            println!(
                "{:>6} keys: size {:>6}, load {:>2}%, avg hit {:.2}, avg miss {:.2}, worst {}",
                checkpoint.keys,
                checkpoint.capacity,
                checkpoint.load,
                checkpoint.avg_hit,
                checkpoint.avg_miss,
                checkpoint.worst_hit
            );
            checkpoints.push(checkpoint);
        }
    }

    draw(&checkpoints)?;
    println!("Generated plot image: {OUTPUT}");

    Ok(())
}
