use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "raptor-scaffold", version, about = "Contig scaffolding from mate-pair links and Hi-C contacts", long_about = None)]
pub struct Cli {
    /// Log per-pair decisions and optimizer progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bundle mate-pair alignments into oriented contig links
    Bundle {
        /// Alignments in BED format, sorted by read name (.gz accepted)
        bed: PathBuf,

        /// Contig sizes: FASTA or two-column name/length table
        sizes: PathBuf,

        /// Minimum supporting pairs for a link
        #[arg(long, default_value_t = 2)]
        links: usize,

        /// Largest accepted hang sum; 0 estimates it from the library
        #[arg(long, default_value_t = 0)]
        cutoff: i64,

        /// Only link contigs whose ids share the `_`-delimited prefix
        #[arg(long)]
        prefix: bool,

        /// Lower insert-size bound for gap estimates (default: 1st percentile)
        #[arg(long)]
        insert_low: Option<i64>,

        /// Upper insert-size bound for gap estimates (default: 99th percentile)
        #[arg(long)]
        insert_high: Option<i64>,

        /// Links table output (default: <bed stem>.links)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Component JSON output (default: <bed stem>.components.json)
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Optimize contig order within each group against Hi-C contacts
    Score {
        /// Directory of `.ordering` files
        ordering_dir: PathBuf,

        /// Contig contact counts (`.GLM`)
        glm: PathBuf,

        /// Contig sizes, in the same order as the contact indices
        sizes: PathBuf,

        /// Population size
        #[arg(long, default_value_t = 100)]
        npop: usize,

        /// Maximum generations
        #[arg(long, default_value_t = 500)]
        ngen: usize,

        /// Stop after this many generations without improvement
        #[arg(long, default_value_t = 50)]
        stall: usize,

        /// Random seed
        #[arg(long, default_value_t = 666)]
        seed: u64,

        /// Number of threads
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,

        /// Directory for `.tour` files
        #[arg(long, default_value = ".")]
        outdir: PathBuf,
    },

    /// Draw the binned Hi-C contact matrix of the ordered groups
    Heatmap {
        /// Directory of `.ordering` files
        ordering_dir: PathBuf,

        /// Contig contact counts (`.GLM`)
        glm: PathBuf,

        /// Contig sizes, in the same order as the contact indices
        sizes: PathBuf,

        /// Bin size in bases
        #[arg(long, default_value_t = 100_000)]
        resolution: u64,

        /// Output PNG
        #[arg(short, long, default_value = "heatmap.png")]
        output: PathBuf,
    },

    /// Write the ordered groups as an AGP file
    Agp {
        /// Directory of `.ordering` files
        ordering_dir: PathBuf,

        /// Contig sizes: FASTA or two-column name/length table
        sizes: PathBuf,

        /// Output AGP
        #[arg(short, long, default_value = "scaffolds.agp")]
        output: PathBuf,

        /// Gap length between contigs; 100 marks an unknown-size gap
        #[arg(long, default_value_t = 100)]
        gap_size: u64,

        /// Gap type column, e.g. `contig` or `scaffold`
        #[arg(long, default_value = "contig")]
        gap_type: String,

        /// Linkage evidence for non-contig gaps
        #[arg(long, default_value = "map")]
        evidence: String,
    },
}
