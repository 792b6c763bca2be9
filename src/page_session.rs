use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::Config;
use crate::error::*;
use crate::label_translator::*;
use crate::page::Page;
use crate::session_storage::*;
use crate::translations::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Ready,
    SelectorChanged(LanguageCode),
    Reload,
    EndSession,
}

pub fn parse_event(line: &str) -> Option<PageEvent> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut line_split = line.splitn(2, char::is_whitespace);
    match line_split.next() {
        Some("ready") => Some(PageEvent::Ready),
        Some("select") => Some(PageEvent::SelectorChanged(
            line_split.next().unwrap_or_default().trim().to_string(),
        )),
        Some("reload") => Some(PageEvent::Reload),
        Some("end") => Some(PageEvent::EndSession),
        _ => {
            log::warn!("Unknown page event \"{}\"", line);
            None
        }
    }
}

pub fn process_page_event<S>(page: &mut Page, storage: &mut S, event: &PageEvent)
where
    S: SessionStorage + ?Sized,
{
    match event {
        PageEvent::Ready => {
            if page.mark_ready() {
                on_ready(&*storage, &mut page.selector, &mut page.elements);
            } else {
                log::debug!("Page is already loaded, ignoring ready");
            }
        }
        PageEvent::SelectorChanged(code) => {
            page.selector.set_value(code);
            let replaced = on_selector_changed(storage, &mut page.elements, code);
            log::info!("Form language set to \"{}\", {} labels replaced", code, replaced);
        }
        PageEvent::Reload => {
            page.reload();
            page.mark_ready();
            on_ready(&*storage, &mut page.selector, &mut page.elements);
        }
        PageEvent::EndSession => {
            storage.clear();
            page.reload();
        }
    }
}

pub async fn dispatch_events<F>(
    mut events: UnboundedReceiver<PageEvent>,
    page: &mut Page,
    store: &SessionStore,
    session_id: &str,
    sessions_file: &Path,
    mut on_render: F,
) -> Result<()>
where
    F: FnMut(&Page),
{
    let mut session = store.session(session_id);
    while let Some(event) = events.recv().await {
        log::debug!("Page event {:?}", event);
        process_page_event(page, &mut session, &event);
        if session.take_unsaved() {
            store.save_session(sessions_file, session_id)?;
        }
        on_render(page);
    }
    Ok(())
}

async fn read_events(sender: UnboundedSender<PageEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(event) = parse_event(&line) {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(error) => {
                log::error!("Can't read page events: {}", error);
                break;
            }
        }
    }
}

pub async fn run_page_session(config: Config) -> anyhow::Result<()> {
    log::info!(
        "Starting page session \"{}\" for {}",
        config.session_id,
        config.page_path.display()
    );

    let mut page = Page::load(&config.page_path)?;
    let store = SessionStore::load(&config.sessions_file)?;

    let (sender, receiver) = mpsc::unbounded_channel();
    sender.send(PageEvent::Ready)?;
    tokio::spawn(read_events(sender));

    dispatch_events(
        receiver,
        &mut page,
        &store,
        &config.session_id,
        &config.sessions_file,
        |page| print!("{}", page.render()),
    )
    .await?;

    Ok(())
}
