use courtside::{config::ViewerConfig, CourtsideApp};

fn main() -> anyhow::Result<()> {
    let app = CourtsideApp::new(ViewerConfig::default())?;
    app.run()
}
