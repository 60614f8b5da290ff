use anyhow::Result;

use mzat::App;

#[tokio::main]
async fn main() -> Result<()> {
    let (settings, session) = mzat_session::init()?;

    // Logging comes up inside App::run(), together with the in-app buffer
    App::new(settings, session).run().await?;

    Ok(())
}
