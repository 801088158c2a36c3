// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to load the settings and call `run_server` from the crate's library.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    web_server::init_tracing()?;
    let settings = configuration::load_settings()?;
    web_server::run_server(settings).await
}
