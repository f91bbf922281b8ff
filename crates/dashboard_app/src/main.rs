mod cli;
mod terminal;

fn main() -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches();
    let options = cli::RunOptions::from_matches(&matches);

    terminal::logging::initialize(options.log_destination, options.log_level);
    terminal::app::run_app(options)
}
