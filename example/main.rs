use log::info;
use perceptron::plot::plot_network::NetworkView;
use perceptron::prelude::*;
use rayon::prelude::*;
use std::fs;

const XOR: [([f64; 2], f64); 4] = [
    ([0.0, 0.0], 0.0),
    ([0.0, 1.0], 1.0),
    ([1.0, 0.0], 1.0),
    ([1.0, 1.0], 0.0),
];

const GENERATIONS: usize = 50;
const POPULATION: usize = 256;

/// Negative squared error over the XOR table.
fn fitness(net: &Network) -> Result<f64> {
    let mut error = 0.0;
    for (x, y) in XOR.iter() {
        let out = net.calculate(x)?;
        error += (out[0] - y).powi(2);
    }
    Ok(-error)
}

// Random-restart search over genomes: every candidate is injected into a
// per-task clone of the template, scored, and the best genome read back.
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: NetworkConfig = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str(&fs::read_to_string(&path)?)?,
        None => NetworkConfig {
            layer_sizes: vec![2, 3, 1],
            ..NetworkConfig::default()
        },
    };
    if config.layer_sizes.first() != Some(&2) || config.layer_sizes.last() != Some(&1) {
        return Err("the XOR search needs 2 inputs and 1 output".into());
    }

    let template = Network::from_config(&config)?;
    info!("{}", template);

    let mut best: Option<(f64, Vec<f64>)> = None;
    for generation in 0..GENERATIONS {
        let scored = (0..POPULATION)
            .into_par_iter()
            .map(|_| -> Result<(f64, Vec<f64>)> {
                let mut candidate = template.clone();
                candidate.randomize();
                let genome = candidate.to_staggered_array();

                let mut net = template.clone();
                net.from_staggered_array(&genome)?;
                Ok((fitness(&net)?, genome))
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some((score, genome)) = scored.into_iter().max_by(|a, b| a.0.total_cmp(&b.0)) {
            if best.as_ref().map_or(true, |(best_score, _)| score > *best_score) {
                info!("generation {}: best fitness {:.5}", generation, score);
                best = Some((score, genome));
            }
        }
    }

    let (score, genome) = best.ok_or("no candidates were evaluated")?;
    info!("Evaluation...");
    info!("fitness: {:.5}, genome: {:?}", score, genome);

    let mut net = template.clone();
    net.from_staggered_array(&genome)?;
    for (x, y) in XOR.iter() {
        let out = net.calculate_with_state(x)?;
        info!("{:?} -> {:.4} (target {})", x, out[0], y);
    }

    let view = NetworkView::new(&net, 320, 180);
    view.draw(&net, "network_state.png")?;
    info!("Network state has been saved as 'network_state.png'");

    Ok(())
}
