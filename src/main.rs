mod cli_main;

use clap::Parser;
use cli_main::{Cli, Commands};
use raptor_scaffold::error::{Result, ScaffoldError};
use raptor_scaffold::graph::SpectralSignSolver;
use raptor_scaffold::hic::{BinConfig, GaConfig};
use raptor_scaffold::io::agp::AgpConfig;
use raptor_scaffold::pipeline::{agp, bundle, heatmap, score};
use rayon::ThreadPoolBuilder;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('.').next().map(str::to_string))
        .unwrap_or_else(|| "out".to_string());
    path.with_file_name(format!("{}{}", stem, suffix))
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Bundle {
            bed,
            sizes,
            links,
            cutoff,
            prefix,
            insert_low,
            insert_high,
            output,
            json,
        } => {
            let config = bundle::BundleConfig {
                links,
                cutoff,
                same_prefix: prefix,
                insert_low,
                insert_high,
            };
            let links_out = output.unwrap_or_else(|| with_suffix(&bed, ".links"));
            let json_out = json.unwrap_or_else(|| with_suffix(&bed, ".components.json"));

            let report = bundle::run_bundle(
                &bed,
                &sizes,
                &links_out,
                &json_out,
                &config,
                &SpectralSignSolver::default(),
            )?;
            println!(
                "{} edges in {} components ({} conflicting, {} below {} links)",
                report.edges, report.components, report.conflicts, report.below_threshold, links
            );
        }

        Commands::Score {
            ordering_dir,
            glm,
            sizes,
            npop,
            ngen,
            stall,
            seed,
            threads,
            outdir,
        } => {
            ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .map_err(|e| ScaffoldError::Config(e.to_string()))?;

            let config = GaConfig {
                npop,
                ngen,
                stall,
                seed,
                ..GaConfig::default()
            };
            let start = std::time::Instant::now();
            let scores = score::run_score(&ordering_dir, &glm, &sizes, &outdir, &config)?;
            for s in &scores {
                println!(
                    "{}\t{}\t{:.6}\t{:.6}\t{}",
                    s.group, s.contigs, s.initial_fitness, s.fitness, s.generations
                );
            }
            info!("Scored {} groups in {:.2}s", scores.len(), start.elapsed().as_secs_f32());
        }

        Commands::Heatmap {
            ordering_dir,
            glm,
            sizes,
            resolution,
            output,
        } => {
            heatmap::run_heatmap(&ordering_dir, &glm, &sizes, &output, &BinConfig { resolution })?;
        }

        Commands::Agp {
            ordering_dir,
            sizes,
            output,
            gap_size,
            gap_type,
            evidence,
        } => {
            let config = AgpConfig {
                gap_size,
                gap_type,
                evidence,
            };
            agp::run_agp(&ordering_dir, &sizes, &output, &config)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Setting tracing default failed");

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}
