use std::env;
use std::path::PathBuf;

pub const SESSIONS_FILE_ENV: &str = "FORM_XLANG_SESSIONS";
const DEFAULT_SESSIONS_FILE: &str = "./data/sessions.json";
const DEFAULT_SESSION_ID: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub page_path: PathBuf,
    pub session_id: String,
    pub sessions_file: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Config::from_args(env::args().skip(1), env::var(SESSIONS_FILE_ENV).ok())
    }

    pub fn from_args<I>(args: I, sessions_file: Option<String>) -> anyhow::Result<Config>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let page_path = args
            .next()
            .ok_or_else(|| anyhow::anyhow!("Usage: form-xlang <page.json> [session-id]"))?;

        Ok(Config {
            page_path: PathBuf::from(page_path),
            session_id: args.next().unwrap_or_else(|| DEFAULT_SESSION_ID.to_string()),
            sessions_file: PathBuf::from(
                sessions_file.unwrap_or_else(|| DEFAULT_SESSIONS_FILE.to_string()),
            ),
        })
    }
}
