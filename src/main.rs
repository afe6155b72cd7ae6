use clap::Parser;
use fontbake::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    // Logging first so config and font lookup can report what they resolve.
    fontbake::logging::init(cli.log_level);

    if let Err(e) = cli::run(cli) {
        eprintln!("fontbake: error: {e:#}");
        std::process::exit(1);
    }
}
