use anyhow::Result;
use apodetl::{logging, transform, Config};

fn main() -> Result<()> {
    logging::init();
    let cfg = Config::from_env()?;
    transform(&cfg)?;
    Ok(())
}
