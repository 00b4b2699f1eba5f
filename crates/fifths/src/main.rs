use clap::{Parser, Subcommand};
use fifths::config;
use fifths::gui::app::AppModel;
use fifths::gui::wheel::WheelView;
use fifths::sys::{runtime, server};
use relm4::prelude::*;
use rotary::Wheel;
use std::io::Write;
use std::os::unix::net::UnixStream;
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(name = "fifths", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the wheel of a running instance
    Show,
    /// Hide the wheel of a running instance
    Hide,
    /// Make a running instance re-read its config
    Reload,
    /// Write the default config file and print its path
    Init,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show) => send_command("show"),
        Some(Commands::Hide) => send_command("hide"),
        Some(Commands::Reload) => send_command("reload"),
        Some(Commands::Init) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => run(),
    }
}

fn run() -> anyhow::Result<()> {
    let config = config::load_or_default();
    let items = config.items();
    let view = WheelView::new(items.clone(), &config.wheel);

    let (tx, rx) = async_channel::bounded(256);
    let (wheel_tx, wheel_rx) = async_channel::unbounded();
    let cancel = CancellationToken::new();

    let wheel = Wheel::new(items, config.wheel, tx.clone())?;

    // Start Background Services
    runtime::start_background_services(tx, wheel, wheel_rx, cancel.clone());

    let app = RelmApp::new("org.fifths.fifths");

    app.run::<AppModel>((view, wheel_tx, rx, cancel));
    Ok(())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(server::SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to fifths at {}: {}. Is fifths running?",
            server::SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
