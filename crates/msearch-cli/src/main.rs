use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(
    name = "msearch",
    about = "Edit the MongoDB custom search allow-list of a plugin host",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<commands::Commands>,

    #[command(flatten)]
    connection: commands::ConnectionArgs,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand: launch TUI
            msearch_tui::launch_tui(cli.connection.store()?).await
        }
        Some(command) => {
            let filter = match cli.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            };
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();

            match command {
                commands::Commands::Show => {
                    commands::show::execute(cli.connection.store()?).await
                }
                commands::Commands::Defaults => {
                    commands::defaults::execute(cli.connection.store()?).await
                }
                commands::Commands::Set(args) => {
                    commands::set::execute(args, cli.connection.store()?).await
                }
                commands::Commands::Validate(args) => commands::validate::execute(args).await,
            }
        }
    }
}
