//! Reader session state and key handling.
//!
//! The corpus itself is immutable; everything here (query, suggestions,
//! results, which popup is open, the chapter cursor) is session state owned
//! by the presentation layer.

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::constants::search::MAX_SEARCH_RESULTS;
use crate::corpus::{Corpus, Direction, SearchIndex, Verse};
use crate::error::Result;
use crate::loader::{load_corpus, LoadMode};

/// Messages sent from background tasks to the UI loop.
#[derive(Debug)]
pub enum AppUpdate {
    /// A load finished, successfully or not.
    CorpusLoaded(Result<Corpus>),
}

/// Which screen is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Query box, suggestions and result list.
    Search,
    /// A single verse popup.
    Verse,
    /// Sequential chapter reading.
    Chapter,
    /// Front-matter text.
    FrontMatter,
}

/// Position in the chapter list while reading chapter by chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterCursor {
    position: usize,
}

impl ChapterCursor {
    /// Place the cursor on `chapter_id`, if the corpus knows it.
    pub fn open(index: &SearchIndex<'_>, chapter_id: &str) -> Option<Self> {
        index.chapter_position(chapter_id).map(|position| Self { position })
    }

    /// Zero-based position in reading order.
    pub const fn position(self) -> usize {
        self.position
    }

    /// Chapter under the cursor.
    pub fn chapter_id<'a>(self, index: &SearchIndex<'a>) -> Option<&'a str> {
        index.chapter_at(self.position)
    }

    /// Move one chapter; returns `false` (and stays put) at either end.
    pub fn step(&mut self, index: &SearchIndex<'_>, direction: Direction) -> bool {
        let Some(current) = self.chapter_id(index) else {
            return false;
        };
        match index
            .adjacent_chapter(current, direction)
            .and_then(|id| index.chapter_position(id))
        {
            Some(position) => {
                self.position = position;
                true
            }
            None => false,
        }
    }

    /// Whether a chapter exists in `direction`.
    pub fn can_step(self, index: &SearchIndex<'_>, direction: Direction) -> bool {
        direction.step(self.position, index.chapter_count()).is_some()
    }
}

/// An executed search, detached from the corpus borrow.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Query as typed.
    pub query: String,
    /// Matching verses in parse order.
    pub verses: Vec<Verse>,
    /// The result cap was reached.
    pub capped: bool,
}

/// Rendered chapter for the reader popup.
#[derive(Debug, Clone)]
pub struct ChapterView<'a> {
    /// Chapter identifier used as the title.
    pub chapter_id: &'a str,
    /// Verses in the chapter.
    pub verses: Vec<&'a Verse>,
    /// Zero-based position in reading order.
    pub position: usize,
    /// Number of chapters in the corpus.
    pub count: usize,
    /// A previous chapter exists.
    pub has_previous: bool,
    /// A next chapter exists.
    pub has_next: bool,
}

/// Application state for the reader.
#[allow(clippy::struct_excessive_bools)]
pub struct App {
    /// Loaded configuration.
    pub config: Config,
    /// Current corpus, replaced wholesale on each load.
    pub corpus: Option<Corpus>,
    /// Screen in front.
    pub mode: AppMode,
    /// Query being typed.
    pub query: String,
    /// Prefix suggestions for the current query.
    pub suggestions: Vec<String>,
    /// Highlighted suggestion, if any.
    pub suggestion_cursor: Option<usize>,
    /// Last executed search.
    pub results: Option<SearchOutcome>,
    /// Selection within the result list.
    pub result_state: ListState,
    /// Verse shown in the verse popup.
    pub open_verse: Option<Verse>,
    /// Chapter reader position.
    pub chapter: Option<ChapterCursor>,
    /// Vertical scroll of the open popup.
    pub scroll: u16,
    /// Status line text.
    pub status: String,
    /// A load task is running.
    pub is_loading: bool,
    /// Help overlay is visible.
    pub show_help: bool,
    should_quit: bool,
    /// Sender handed to background tasks.
    pub async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
}

impl App {
    /// Create an app with no corpus loaded yet.
    pub fn new(config: Config) -> Self {
        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            config,
            corpus: None,
            mode: AppMode::Search,
            query: String::new(),
            suggestions: Vec::new(),
            suggestion_cursor: None,
            results: None,
            result_state: ListState::default(),
            open_verse: None,
            chapter: None,
            scroll: 0,
            status: String::new(),
            is_loading: false,
            show_help: false,
            should_quit: false,
            async_task_tx,
            async_task_rx,
        }
    }

    /// Whether the main loop should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Start loading the corpus in the background.
    pub fn start_load(&mut self, mode: LoadMode) {
        if self.is_loading {
            return;
        }
        self.is_loading = true;
        self.status = "Loading scripture file...".to_string();

        let config = self.config.clone();
        let tx = self.async_task_tx.clone();
        tokio::spawn(async move {
            let result = load_corpus(&config, mode).await;
            if tx.send(AppUpdate::CorpusLoaded(result)).await.is_err() {
                tracing::warn!("Reader closed before the corpus finished loading");
            }
        });
    }

    /// Drain finished background work.
    pub fn handle_updates(&mut self) {
        while let Ok(update) = self.async_task_rx.try_recv() {
            match update {
                AppUpdate::CorpusLoaded(result) => {
                    self.is_loading = false;
                    self.apply_corpus(result);
                }
            }
        }
    }

    /// Swap in a newly loaded corpus, or report why loading failed.
    pub fn apply_corpus(&mut self, result: Result<Corpus>) {
        match result {
            Ok(corpus) => {
                self.status = if corpus.is_empty() {
                    "No verses found in the scripture file.".to_string()
                } else {
                    "Ready to search.".to_string()
                };
                self.corpus = Some(corpus);
                self.results = None;
                self.result_state.select(None);
                self.open_verse = None;
                self.chapter = None;
                self.mode = AppMode::Search;
                self.update_suggestions();
            }
            Err(e) => {
                tracing::warn!("Corpus load failed: {e}");
                self.status = e.status_text();
            }
        }
    }

    /// Dispatch a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c' | 'q') => self.should_quit = true,
                KeyCode::Char('r') => self.start_load(LoadMode::Fresh),
                _ => {}
            }
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        if key.code == KeyCode::F(2) {
            self.open_front_matter();
            return;
        }

        match self.mode {
            AppMode::Search => self.handle_search_key(key),
            AppMode::Verse => self.handle_verse_key(key),
            AppMode::Chapter => self.handle_chapter_key(key),
            AppMode::FrontMatter => self.handle_front_matter_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') if self.query.is_empty() => self.show_help = true,
            KeyCode::Char(c) => {
                self.query.push(c);
                self.update_suggestions();
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.update_suggestions();
            }
            KeyCode::Tab => self.cycle_suggestion(1),
            KeyCode::BackTab => self.cycle_suggestion(-1),
            KeyCode::Down => self.move_result_selection(1),
            KeyCode::Up => self.move_result_selection(-1),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                if self.suggestion_cursor.is_some() {
                    self.suggestion_cursor = None;
                } else if !self.query.is_empty() {
                    self.query.clear();
                    self.update_suggestions();
                } else {
                    self.should_quit = true;
                }
            }
            _ => {}
        }
    }

    fn handle_verse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_popup(),
            KeyCode::Char('c') => {
                if let Some(chapter_id) = self.open_verse.as_ref().map(|v| v.chapter_id.clone()) {
                    self.view_chapter(&chapter_id);
                }
            }
            KeyCode::Char('y') => self.copy_open_verse(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn handle_chapter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_popup(),
            KeyCode::Left | KeyCode::Char('h') => self.navigate_chapter(Direction::Previous),
            KeyCode::Right | KeyCode::Char('l') => self.navigate_chapter(Direction::Next),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            _ => {}
        }
    }

    fn handle_front_matter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_popup(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            _ => {}
        }
    }

    /// Recompute suggestions for the current query.
    pub fn update_suggestions(&mut self) {
        self.suggestion_cursor = None;
        self.suggestions = self
            .corpus
            .as_ref()
            .map(|corpus| {
                corpus
                    .index()
                    .suggest(&self.query)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
    }

    fn cycle_suggestion(&mut self, delta: isize) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        self.suggestion_cursor = Some(match (self.suggestion_cursor, delta >= 0) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }

    fn move_result_selection(&mut self, delta: isize) {
        let len = self.results.as_ref().map_or(0, |r| r.verses.len());
        if len == 0 {
            return;
        }
        let current = self.result_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.result_state.select(Some(next));
    }

    /// Enter: apply a highlighted suggestion, open the selected result, or search.
    fn submit(&mut self) {
        if let Some(word) = self.suggestion_cursor.and_then(|i| self.suggestions.get(i)).cloned() {
            self.query = word;
            self.suggestions.clear();
            self.suggestion_cursor = None;
            self.run_search();
            return;
        }

        let already_ran = self.results.as_ref().is_some_and(|r| r.query == self.query);
        if already_ran && self.result_state.selected().is_some() {
            self.open_selected_result();
        } else {
            self.run_search();
        }
    }

    /// Run the current query. An empty query does nothing.
    pub fn run_search(&mut self) {
        let Some(corpus) = &self.corpus else {
            self.status = "Scripture is still loading...".to_string();
            return;
        };
        let Some(results) = corpus.index().search(&self.query) else {
            return;
        };

        self.status = if results.is_empty() {
            "No matches found.".to_string()
        } else if results.is_capped() {
            format!("Results limited to {MAX_SEARCH_RESULTS} verses.")
        } else {
            format!("{} matching verses.", results.len())
        };

        let outcome = SearchOutcome {
            query: self.query.clone(),
            verses: results.verses().iter().map(|&v| v.clone()).collect(),
            capped: results.is_capped(),
        };
        self.result_state.select((!outcome.verses.is_empty()).then_some(0));
        self.results = Some(outcome);
        self.suggestions.clear();
        self.suggestion_cursor = None;
    }

    /// Open the verse popup for the selected result.
    pub fn open_selected_result(&mut self) {
        let selected = self
            .result_state
            .selected()
            .and_then(|i| self.results.as_ref()?.verses.get(i))
            .cloned();
        if let Some(verse) = selected {
            self.open_verse = Some(verse);
            self.scroll = 0;
            self.mode = AppMode::Verse;
        }
    }

    /// Switch to the chapter reader at `chapter_id`.
    pub fn view_chapter(&mut self, chapter_id: &str) {
        let Some(corpus) = &self.corpus else {
            return;
        };
        if let Some(cursor) = ChapterCursor::open(&corpus.index(), chapter_id) {
            self.chapter = Some(cursor);
            self.scroll = 0;
            self.mode = AppMode::Chapter;
        }
    }

    /// Move the chapter reader one chapter; nothing happens past either end.
    pub fn navigate_chapter(&mut self, direction: Direction) {
        let (Some(corpus), Some(cursor)) = (&self.corpus, self.chapter.as_mut()) else {
            return;
        };
        if cursor.step(&corpus.index(), direction) {
            self.scroll = 0;
        }
    }

    /// Chapter currently shown by the reader.
    pub fn chapter_view(&self) -> Option<ChapterView<'_>> {
        let corpus = self.corpus.as_ref()?;
        let cursor = self.chapter?;
        let index = corpus.index();
        let chapter_id = cursor.chapter_id(&index)?;
        Some(ChapterView {
            chapter_id,
            verses: index.verses_in_chapter(chapter_id),
            position: cursor.position(),
            count: index.chapter_count(),
            has_previous: cursor.can_step(&index, Direction::Previous),
            has_next: cursor.can_step(&index, Direction::Next),
        })
    }

    fn open_front_matter(&mut self) {
        self.scroll = 0;
        self.mode = AppMode::FrontMatter;
    }

    fn close_popup(&mut self) {
        self.scroll = 0;
        self.mode = AppMode::Search;
    }

    fn copy_open_verse(&mut self) {
        let Some(verse) = &self.open_verse else {
            return;
        };
        let text = format!("{}\n{}", verse.reference, verse.text);
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.status = format!("Copied {}", verse.reference),
            Err(e) => self.status = format!("Clipboard unavailable: {e}"),
        }
    }
}
