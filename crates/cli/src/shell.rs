//! Interactive two-tab browser over stdin.
//!
//! The browse tab pages through the catalog and runs name searches; the
//! favorites tab lists liked characters and filters them locally. Both tabs
//! share one favorites store, and changes written by either tab reach the
//! browse tab through the store's change events.

use std::io::Write;
use std::sync::Arc;

use mortydex_catalog::CatalogSource;
use mortydex_core::error::CoreError;
use mortydex_core::types::{parse_character_id, CharacterId};
use mortydex_session::{BrowseSession, FavoritesSession, FavoritesState, LikeChange, LoadOutcome};
use mortydex_store::{FavoritesChanged, FavoritesStore, KeyValueStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::render;

const HELP: &str = "\
Commands:
  more            load the next listing page (browse tab)
  search [text]   search by name; no text clears the search
  show <id>       open a character's detail
  back            close the detail
  like <id>       like or unlike a character
  list            print the current view again
  browse          switch to the browse tab
  favs            switch to the favorites tab
  help            print this help
  quit            leave";

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    More,
    Search(String),
    Like(CharacterId),
    Show(CharacterId),
    Back,
    List,
    Browse,
    Favorites,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Unknown command '{0}', type 'help' for the list")]
    Unknown(String),

    #[error("'{0}' needs a character id")]
    MissingId(&'static str),

    #[error(transparent)]
    InvalidId(#[from] CoreError),
}

/// Parse one line of input. Command words are case-insensitive.
pub fn parse_command(line: &str) -> Result<ShellCommand, ShellError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "help" | "?" => ShellCommand::Help,
        "more" | "next" => ShellCommand::More,
        "search" | "find" => ShellCommand::Search(rest.to_string()),
        "like" => ShellCommand::Like(id_arg("like", rest)?),
        "show" => ShellCommand::Show(id_arg("show", rest)?),
        "back" => ShellCommand::Back,
        "list" | "ls" => ShellCommand::List,
        "browse" => ShellCommand::Browse,
        "favs" | "favorites" => ShellCommand::Favorites,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        _ => return Err(ShellError::Unknown(word.to_string())),
    };
    Ok(command)
}

fn id_arg(command: &'static str, rest: &str) -> Result<CharacterId, ShellError> {
    if rest.is_empty() {
        return Err(ShellError::MissingId(command));
    }
    Ok(parse_character_id(rest)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Browse,
    Favorites,
}

impl Tab {
    fn prompt(self) -> &'static str {
        match self {
            Tab::Browse => "browse> ",
            Tab::Favorites => "favs> ",
        }
    }
}

pub struct Shell<C, S> {
    browse: BrowseSession<C, S>,
    favorites: FavoritesSession<C, S>,
    tab: Tab,
    changes: broadcast::Receiver<FavoritesChanged>,
}

impl<C: CatalogSource, S: KeyValueStore> Shell<C, S> {
    pub fn new(catalog: Arc<C>, store: Arc<FavoritesStore<S>>) -> Self {
        let changes = store.subscribe();
        Self {
            browse: BrowseSession::new(catalog.clone(), store.clone()),
            favorites: FavoritesSession::new(catalog, store),
            tab: Tab::Browse,
            changes,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn browse(&self) -> &BrowseSession<C, S> {
        &self.browse
    }

    pub fn favorites(&self) -> &FavoritesSession<C, S> {
        &self.favorites
    }

    /// Load the first page, then execute lines from `input` until it ends
    /// or a quit command is read.
    pub async fn run<R>(&mut self, input: R, out: &mut impl Write) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let first = self.browse.load_next_page().await;
        self.print_load(first, out)?;

        loop {
            write!(out, "{}", self.tab.prompt())?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Ok(command) => {
                    if !self.execute(command, out).await? {
                        break;
                    }
                }
                Err(e) => writeln!(out, "{e}")?,
            }
        }

        tracing::debug!("Shell input closed");
        Ok(())
    }

    /// Execute one command. Returns `false` when the shell should stop.
    ///
    /// Session failures are printed; only output errors are returned.
    pub async fn execute(&mut self, command: ShellCommand, out: &mut impl Write) -> anyhow::Result<bool> {
        self.drain_changes().await;

        match (command, self.tab) {
            (ShellCommand::Quit, _) => return Ok(false),
            (ShellCommand::Help, _) => writeln!(out, "{HELP}")?,

            (ShellCommand::Browse, _) => {
                self.tab = Tab::Browse;
                self.browse.reconcile().await;
                self.print_view(out)?;
            }
            (ShellCommand::Favorites, _) => {
                self.tab = Tab::Favorites;
                self.favorites.focus().await;
                self.print_view(out)?;
            }

            (ShellCommand::More, Tab::Browse) => {
                let outcome = self.browse.load_next_page().await;
                self.print_load(outcome, out)?;
            }
            (ShellCommand::More, Tab::Favorites) => {
                writeln!(out, "All favorites are already shown")?;
            }

            (ShellCommand::Search(text), Tab::Browse) => {
                let outcome = self.browse.set_query(&text).await;
                self.print_load(outcome, out)?;
            }
            (ShellCommand::Search(text), Tab::Favorites) => {
                self.favorites.set_query(&text);
                self.print_view(out)?;
            }

            (ShellCommand::Like(id), Tab::Browse) => match self.browse.toggle_like(id).await {
                Ok(change) => print_like(&change, out)?,
                Err(e) => writeln!(out, "{e}")?,
            },
            (ShellCommand::Like(id), Tab::Favorites) => match self.favorites.toggle_like(id).await {
                Ok(change) => print_like(&change, out)?,
                Err(e) => writeln!(out, "Nothing changed: {e}")?,
            },

            (ShellCommand::Show(id), Tab::Browse) => match self.browse.select(id) {
                Ok(character) => write!(out, "{}", render::detail(character))?,
                Err(e) => writeln!(out, "{e}")?,
            },
            (ShellCommand::Show(id), Tab::Favorites) => match self.favorites.select(id) {
                Ok(character) => write!(out, "{}", render::detail(character))?,
                Err(e) => writeln!(out, "{e}")?,
            },

            (ShellCommand::Back, Tab::Browse) => {
                self.browse.back();
                self.print_view(out)?;
            }
            (ShellCommand::Back, Tab::Favorites) => {
                self.favorites.back();
                self.print_view(out)?;
            }

            (ShellCommand::List, _) => self.print_view(out)?,
        }

        Ok(true)
    }

    // ---- private helpers ----

    /// Apply favorites changes published since the last command.
    async fn drain_changes(&mut self) {
        loop {
            match self.changes.try_recv() {
                Ok(change) => self.browse.apply_change(&change),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Missed favorites changes, re-reading store");
                    self.browse.reconcile().await;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    fn print_load(&self, outcome: LoadOutcome, out: &mut impl Write) -> std::io::Result<()> {
        match outcome {
            LoadOutcome::Loaded { added } => {
                self.print_view(out)?;
                writeln!(out, "({added} new, {} shown)", self.browse.collection().len())
            }
            LoadOutcome::NoMatch => writeln!(out, "No character found"),
            LoadOutcome::Exhausted => writeln!(out, "No more characters"),
            LoadOutcome::Searching => writeln!(out, "Clear the search to keep paging"),
            LoadOutcome::Failed => writeln!(out, "Could not reach the catalog, try again"),
        }
    }

    fn print_view(&self, out: &mut impl Write) -> std::io::Result<()> {
        match self.tab {
            Tab::Browse => match self.browse.selected() {
                Some(character) => write!(out, "{}", render::detail(character)),
                None if self.browse.is_search_empty() => writeln!(out, "No character found"),
                None => writeln!(out, "{}", render::list(&self.browse.visible())),
            },
            Tab::Favorites => match (self.favorites.selected(), self.favorites.state()) {
                (Some(character), _) => write!(out, "{}", render::detail(character)),
                (None, FavoritesState::Empty) => writeln!(out, "No favorites yet"),
                (None, FavoritesState::Error(message)) => {
                    writeln!(out, "Could not load favorites: {message}")?;
                    writeln!(out, "{}", render::list(&self.favorites.visible()))
                }
                (None, _) => writeln!(out, "{}", render::list(&self.favorites.visible())),
            },
        }
    }
}

fn print_like(change: &LikeChange, out: &mut impl Write) -> std::io::Result<()> {
    let verb = if change.liked { "♥ Liked" } else { "♡ Unliked" };
    writeln!(out, "{verb} character {}", change.id)?;
    if !change.persisted {
        writeln!(out, "Warning: the change could not be saved and will be lost on restart")?;
    }
    if change.closed_detail {
        writeln!(out, "Detail closed")?;
    }
    Ok(())
}
