mod commands;
mod config;
mod core;
mod error;
mod types;
mod utils;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(
    name = "cbzkit",
    version,
    about = "Pack, unpack and re-export CBZ comic archives"
)]
struct Cli {
    /// JSON settings file (falls back to $CBZKIT_CONFIG)
    #[arg(long, global = true)]
    config: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a folder (or a list of files) into a CBZ
    Pack {
        /// Source directory, or one or more files
        #[arg(short = 's', long, num_args = 1.., required = true)]
        source: Vec<String>,

        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Keep original file names instead of 001.ext, 002.ext, ...
        #[arg(short = 'p', long, overrides_with = "no_preserve_names")]
        preserve_names: bool,

        /// Rename sequentially even if the settings file says otherwise
        #[arg(long, overrides_with = "preserve_names")]
        no_preserve_names: bool,

        /// 0 stores entries, 1-9 deflates
        #[arg(short = 'c', long, value_parser = clap::value_parser!(u32).range(0..=9))]
        compression: Option<u32>,

        /// Leave out files whose path contains PATTERN
        #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
        excludes: Vec<String>,

        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Extract the images of a CBZ into a folder
    Unpack {
        #[arg(short = 'i', long)]
        input: String,

        #[arg(short = 'o', long, default_value = "./pages")]
        output: String,

        /// Write pages as 001.ext, 002.ext, ... in archive order
        #[arg(short = 'r', long, overrides_with = "no_renumber")]
        renumber: bool,

        /// Keep extracted names even if the settings file says otherwise
        #[arg(long, overrides_with = "renumber")]
        no_renumber: bool,

        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Repackage selected pages of a CBZ with fresh sequential names
    Reexport {
        #[arg(short = 'i', long)]
        input: String,

        #[arg(short = 'o', long)]
        output: String,

        /// 1-based pages in output order, e.g. "3,1,5-7" (default: all)
        #[arg(short = 'p', long)]
        pages: Option<String>,

        #[arg(short = 'c', long, value_parser = clap::value_parser!(u32).range(0..=9))]
        compression: Option<u32>,

        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Show the entries of an archive
    List {
        #[arg(short = 'i', long)]
        input: String,
    },
}

const DEFAULT_COMPRESSION: u32 = 6;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// An explicit `--flag` or `--no-flag` wins over the settings file.
fn switch(on: bool, off: bool, configured: bool) -> bool {
    if off {
        false
    } else {
        on || configured
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::resolve(cli.config.as_deref())?;
    let level = |flag: Option<u32>| {
        flag.or(settings.compression_level)
            .unwrap_or(DEFAULT_COMPRESSION)
    };

    match cli.command {
        Commands::Pack {
            source,
            output,
            preserve_names,
            no_preserve_names,
            compression,
            excludes,
            force,
        } => commands::pack::pack(&types::PackOptions {
            sources: source,
            output,
            preserve_names: switch(preserve_names, no_preserve_names, settings.preserve_names),
            compression_level: level(compression),
            excludes: settings.excludes.iter().cloned().chain(excludes).collect(),
            force,
        }),
        Commands::Unpack {
            input,
            output,
            renumber,
            no_renumber,
            force,
        } => commands::unpack::unpack(&types::UnpackOptions {
            input,
            output,
            renumber: switch(renumber, no_renumber, settings.renumber),
            force,
        }),
        Commands::Reexport {
            input,
            output,
            pages,
            compression,
            force,
        } => commands::reexport::reexport(&types::ReexportOptions {
            input,
            output,
            pages,
            compression_level: level(compression),
            force,
        }),
        Commands::List { input } => commands::list::list(&input).map(|_| ()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_precedence() {
        assert!(!switch(false, false, false));
        assert!(switch(false, false, true));
        assert!(switch(true, false, false));
        assert!(!switch(false, true, true));
    }

    #[test]
    fn test_last_flag_wins() {
        let cli = Cli::parse_from(["cbzkit", "pack", "-s", "dir", "-p", "--no-preserve-names"]);
        match cli.command {
            Commands::Pack {
                preserve_names,
                no_preserve_names,
                ..
            } => assert!(!preserve_names && no_preserve_names),
            _ => panic!("expected pack"),
        }
    }
}
