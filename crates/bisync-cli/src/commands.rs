use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bisync")]
#[command(version, about = "Two-way, history-aware directory synchronization", long_about = None)]
pub struct Cli {
    /// The source path
    pub source: PathBuf,

    /// The destination path
    pub destination: PathBuf,

    /// The path to the database file to use
    #[arg(short = 'f', long = "dbfile")]
    pub database_file: Option<String>,

    /// The path for a logfile to write
    #[arg(short = 'l', long)]
    pub logfile: Option<PathBuf>,

    /// Rotate the logfile daily
    #[arg(short = 'o', long, requires = "logfile")]
    pub rolling_logfile: bool,

    /// Path that should be ignored during synchronization (repeatable)
    #[arg(short = 'g', long = "ignore")]
    pub ignore: Vec<PathBuf>,

    /// Perform a trial run with no changes made
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Generate MD5 file hashes for exact comparison
    #[arg(short = 'H', long)]
    pub hashing: bool,

    /// Do not copy attributes for directories
    #[arg(short = 'i', long)]
    pub ignore_directory_attributes: bool,

    /// Do not print "Entering directory" and "No operation" messages
    #[arg(short = 's', long)]
    pub silent: bool,

    /// Perform synchronization only if the given file exists
    #[arg(long = "check-file-exists")]
    pub check_file: Option<PathBuf>,

    /// Print debug messages
    #[arg(long)]
    pub debug: bool,
}
