use anyhow::Result;
use clap::Parser;

use arcade_snake::app::App;
use arcade_snake::game::GameConfig;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Terminal snake with drifting food and particle bursts")]
struct Cli {
    /// Render frame rate; the simulation tick rate is governed by the
    /// game itself and speeds up as you score
    #[arg(long, default_value = "30")]
    fps: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new(GameConfig::default(), cli.fps);
    app.run().await
}
