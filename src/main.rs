use color_eyre::Result;

use spotihook::app::App;
use spotihook::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    App::new(config).await?.run().await?;
    Ok(())
}
