//! Learn command implementation.

use super::output::{JsonLearnResult, format_learn_text};
use super::{CliError, InitArg, OutputFormat, SelectionArg};
use gig::Sample;
use gig::gp::{EvolutionConfig, Learner};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Command-line overrides applied on top of the configuration file.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Overrides {
    pub(crate) population: Option<usize>,
    pub(crate) generations: Option<usize>,
    pub(crate) parents: Option<usize>,
    pub(crate) elitism: Option<usize>,
    pub(crate) mutation_fraction: Option<f64>,
    pub(crate) saturation: Option<usize>,
    pub(crate) target: Option<f64>,
    pub(crate) seed: Option<u64>,
    pub(crate) threads: Option<usize>,
    pub(crate) init: Option<InitArg>,
    pub(crate) selection: Option<SelectionArg>,
    pub(crate) tournament_size: usize,
}

impl Overrides {
    /// Apply every flag that was given.
    fn apply(&self, config: &mut EvolutionConfig) {
        if let Some(n) = self.population {
            config.population_size = n;
            // Keep the pool valid for small populations unless set explicitly.
            if self.parents.is_none() {
                config.num_parents = config.num_parents.min(n);
            }
            if self.elitism.is_none() {
                config.elitism_count = config.elitism_count.min(n);
            }
        }
        if let Some(n) = self.generations {
            config.num_generations = n;
        }
        if let Some(n) = self.parents {
            config.num_parents = n;
        }
        if let Some(n) = self.elitism {
            config.elitism_count = n;
        }
        if let Some(f) = self.mutation_fraction {
            config.mutation_fraction = f;
        }
        if let Some(n) = self.saturation {
            config.stop_on_saturation_after = Some(n);
        }
        if let Some(t) = self.target {
            config.stop_on_fitness_reach = Some(t);
        }
        if let Some(s) = self.seed {
            config.seed = s;
        }
        if let Some(j) = self.threads {
            config.parallelism = Some(j);
        }
        if let Some(init) = self.init {
            config.init_strategy = init.into();
        }
        if let Some(selection) = self.selection {
            config.selection.method = selection.method(self.tournament_size);
        }
    }
}

/// Execute the learn command.
///
/// # Errors
///
/// Returns an error if the sample or configuration cannot be loaded, the
/// configuration is invalid, or S+ is empty.
pub(crate) fn execute(
    sample_path: &Path,
    config_path: Option<&Path>,
    overrides: &Overrides,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let mut config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|e| {
                CliError::new(format!("Failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str::<EvolutionConfig>(&json)?
        }
        None => EvolutionConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;

    let sample = Sample::from_json_file(sample_path).map_err(|e| {
        CliError::new(format!("Failed to load {}: {e}", sample_path.display()))
    })?;

    let pb = if progress {
        let pb = ProgressBar::new(config.num_generations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} generations {msg}")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let outcome = Learner::new(config).learn_with(&sample, |stats| {
        if let Some(pb) = &pb {
            pb.inc(1);
            pb.set_message(format!("best={:.1}", stats.best_fitness));
        }
    })?;
    let duration = start.elapsed();

    if let Some(pb) = pb {
        pb.finish_with_message(format!("({})", outcome.stop_reason));
    }

    match format {
        OutputFormat::Text => {
            print!("{}", format_learn_text(&outcome, &sample));
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonLearnResult::from_outcome(&outcome))?;
            println!("{json}");
        }
    }

    Ok(())
}
