use std::error::Error;
use std::path::PathBuf;

use ahash::AHashMap;
use clap::Parser;
use itertools::Itertools;
use log::info;

use dsd_rules::Enumerator;
use dsd_rules::RateModel;
use dsd_rules::canonical_state;

/// The initial state of the AND-gate example.
const DEFAULT_STATE: [(&str, usize); 6] = [
    ("<t^ b>", 10),
    ("{t^*}[x t^]:[b t^]:[a t^]:[a]", 40),
    ("[x]:[t^ b]:[t^ b]:[t^ a]{t^*}", 40),
    ("<t^ x>", 40),
    ("<t^ a>", 40),
    ("<b t^>", 40),
];

/// Enumerate the reaction network reachable from an initial state.
#[derive(Parser, Debug)]
#[command(name = "dsd_enumerate", version, about, long_about = None)]
struct Cli {
    /// JSON file with rate constants and domain lengths.
    #[arg(long)]
    rates: Option<PathBuf>,

    /// JSON file mapping complexes to copy numbers.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Maximum number of exploration rounds.
    #[arg(long, default_value_t = 3)]
    rounds: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let rates = match &cli.rates {
        Some(path) => RateModel::from_json_file(path)?,
        None => RateModel::default(),
    };
    let entries: AHashMap<String, usize> = match &cli.state {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => DEFAULT_STATE.iter().map(|&(s, n)| (s.to_string(), n)).collect(),
    };
    let state = canonical_state(entries.iter().map(|(s, &n)| (s.as_str(), n)))?;

    println!("Initial state:");
    for (complex, count) in state.iter().sorted_by_key(|(c, _)| c.to_string()) {
        println!("{count:>6}  {complex}");
    }
    println!("--");

    let enumerator = Enumerator::with_rates(rates);
    info!("rules: {}", enumerator.rule_names().join(", "));
    let network = enumerator.reachable(&state, cli.rounds);
    for reaction in &network.reactions {
        println!("{}", serde_json::to_string(reaction)?);
    }
    println!("--");
    println!(
        "{} species, {} reactions{}.",
        network.species.len(),
        network.reactions.len(),
        if network.complete { "" } else { " (round limit reached)" }
    );
    Ok(())
}
