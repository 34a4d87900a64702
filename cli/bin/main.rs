use std::path::PathBuf;

use clap::Parser;

use whisker_cli::cli;
use whisker_cli::logger;

#[derive(Parser, Debug)]
#[command(name = "whiskerc", about = "Whisker compiler")]
struct Args {
    /// Turn on verbose logging. Repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write log messages to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Checks files (or directories of files) for syntax and semantic errors.
    Check { files: Vec<PathBuf> },
    /// Prints the tokens of a file.
    Tokenize { file: PathBuf },
    /// Prints the parsed program of a file.
    Echo { file: PathBuf },
    /// Compiles a file into an assembly program.
    Compile {
        file: PathBuf,

        /// Path of the assembly output.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Prints the version number of the compiler.
    Version,
}

pub fn main() -> Result<(), String> {
    let args = Args::parse();

    logger::configure(args.verbose, args.log_file)?;

    match args.action {
        Action::Check { files } => cli::check(files, false),
        Action::Tokenize { file } => cli::tokenize(&file, false),
        Action::Echo { file } => cli::echo(&file, false),
        Action::Compile { file, output } => cli::compile(&file, &output, false),
        Action::Version => {
            println!("whiskerc version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
