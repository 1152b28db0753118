use clap::Parser;
use snp_typer::cli::{self, Commands};
use snp_typer::commands;
use snp_typer::commands::classify::ClassifyOptions;
use snp_typer::config::Config;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}

fn main() {
    let args = cli::Args::parse();
    setup_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    if let Some(db) = args.db {
        config.db_path = Some(db);
    }

    let result = match args.command {
        Commands::InitOrganism { organism } => commands::organism::init(&config, &organism),
        Commands::DeleteOrganism { organism, yes } => {
            commands::organism::delete(&config, &organism, yes)
        }
        Commands::ImportTree {
            organism,
            tree_file,
        } => commands::import::tree(&config, &organism, &tree_file),
        Commands::ImportSnps { organism, snp_file } => {
            commands::import::snps(&config, &organism, &snp_file)
        }
        Commands::ImportSequence {
            organism,
            strain,
            fasta_file,
        } => commands::import::sequence(&config, &organism, &strain, &fasta_file),
        Commands::Newick { organism } => commands::tree::newick(&config, &organism),
        Commands::Root { organism } => commands::tree::root(&config, &organism),
        Commands::Classify {
            organism,
            queries,
            allow_differences,
            tab_sep,
            list_snps,
            aligned,
            json,
            num_threads,
            save_align,
        } => {
            if let Some(n) = num_threads {
                config.num_threads = n;
            }
            let options = ClassifyOptions {
                allow_differences: allow_differences.unwrap_or(config.allow_differences),
                tab_sep,
                list_snps,
                aligned,
                json,
                save_align,
            };
            commands::classify::run(&config, &organism, &queries, &options)
        }
        Commands::ShowConfig => commands::show_config::run(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
