mod config;
mod element;
mod error;
mod label_translator;
mod page;
mod page_session;
mod session_storage;
mod translations;

use crate::config::Config;
use crate::page_session::run_page_session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let config = Config::from_env()?;
    run_page_session(config).await
}
