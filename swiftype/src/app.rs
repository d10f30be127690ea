use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Duration;

use cadence::history::format_elapsed;
use cadence::{
    CharacterVerdict, Configuration, Finish, FinishRejection, SessionError, SessionState,
    TextProvider, TypingSession,
};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use tracing::{debug, warn};
use web_time::Instant;

use crate::keymap::Action;
use crate::language::{self, Language, LanguageBus, LanguageChange};
use crate::report::{result_details, result_line};
use crate::store::HistoryStore;
use crate::texts::BuiltinTexts;
use crate::ticker::IntervalClock;

/// How long to wait for keys while no clock is running
const IDLE_POLL: Duration = Duration::from_millis(250);

const HELP: &str =
    "<CTRL-F> finish  <CTRL-R> restart  <CTRL-L> language  <CTRL-S> retry save  <ESC> quit";

/// An app message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Show a line below the session
    Status(String),
    /// Quit the application
    Quit,
}

/// The interactive practice screen
pub struct App<P: TextProvider = BuiltinTexts> {
    session: TypingSession<IntervalClock, HistoryStore>,
    texts: P,
    language: &'static Language,
    bus: LanguageBus,
    language_changes: mpsc::Receiver<LanguageChange>,
    status: Option<String>,
}

impl<P: TextProvider> App<P> {
    /// Creates a new `App` practicing `language`
    pub fn new(
        mut texts: P,
        store: HistoryStore,
        language: &'static Language,
        config: Configuration,
    ) -> Result<Self, SessionError> {
        let clock = IntervalClock::default();
        let session = TypingSession::from_provider(&mut texts, language.code, clock, store)?
            .with_configuration(config);

        let mut bus = LanguageBus::default();
        let language_changes = bus.subscribe();

        Ok(Self {
            session,
            texts,
            language,
            bus,
            language_changes,
            status: None,
        })
    }

    /// Runs the app
    pub fn run(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.event_loop(&mut stdout);

        execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;

        result
    }

    fn event_loop<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        loop {
            self.draw(out)?;

            let timeout = self
                .session
                .clock()
                .timeout(Instant::now())
                .unwrap_or(IDLE_POLL);
            let event = event::poll(timeout)?.then(event::read).transpose()?;

            if let Some(Event::Key(key)) = event
                && let Some(message) = self.handle_key(&key)
            {
                match message {
                    Message::Status(status) => self.status = Some(status),
                    Message::Quit => break,
                }
            }

            let due = self.session.clock_mut().due(Instant::now());
            for _ in 0..due {
                self.session.tick();
            }

            self.apply_language_changes();
        }

        debug!(state = %self.session.state(), "leaving practice");
        Ok(())
    }

    /// Handle a single key press
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<Message> {
        match Action::from(key) {
            Action::Nothing => None,
            Action::Quit => Some(Message::Quit),
            Action::Type(key) => self.session.input(key).err().map(saving_failed),
            Action::Finish => match self.session.finish() {
                Ok(Finish::Completed(_)) => None,
                Ok(Finish::Rejected(FinishRejection::BelowThreshold { typed, required })) => {
                    Some(Message::Status(format!(
                        "Type at least {required} characters to finish early ({typed} so far)"
                    )))
                }
                Ok(Finish::Rejected(FinishRejection::NotActive(state))) => Some(Message::Status(
                    format!("Nothing to finish, the session is {state}"),
                )),
                Err(error) => Some(saving_failed(error)),
            },
            Action::RetrySave => match self.session.retry_persist() {
                Ok(true) => Some(Message::Status("Result saved".to_string())),
                Ok(false) => None,
                Err(error) => Some(saving_failed(error)),
            },
            Action::Restart => self.restart(),
            Action::NextLanguage => {
                let change = LanguageChange {
                    previous: self.language,
                    current: language::next(self.language.code),
                };
                if let Err(error) = self.session.store().set_selected_language(change.current.code)
                {
                    warn!("failed to store language preference: {error}");
                }
                self.bus.publish(&change);
                None
            }
        }
    }

    /// Restart the session in whatever language the channel last announced
    fn apply_language_changes(&mut self) {
        let mut changed = false;
        while let Ok(change) = self.language_changes.try_recv() {
            self.language = change.current;
            changed = true;
        }

        if changed && let Some(Message::Status(status)) = self.restart() {
            self.status = Some(status);
        }
    }

    fn restart(&mut self) -> Option<Message> {
        self.status = None;
        self.session
            .restart_from(&mut self.texts, self.language.code)
            .err()
            .map(|error| Message::Status(error.to_string()))
    }

    /// Draws the next frame
    pub fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        let header = format!(
            "SWIFTYPE  {} ({}, {})",
            self.language.native_name, self.language.code, self.language.direction
        );
        queue!(
            out,
            PrintStyledContent(header.bold()),
            cursor::MoveToNextLine(1),
            Print(HELP),
            cursor::MoveToNextLine(2)
        )?;

        for context in self.session.render_iter() {
            let Some(character) = context.display_char() else {
                continue;
            };

            let mut styled = match context.verdict {
                Some(CharacterVerdict::Correct) => character.green(),
                Some(CharacterVerdict::Incorrect) if character == ' ' => character.on_red(),
                Some(CharacterVerdict::Incorrect | CharacterVerdict::Overflow) => character.red(),
                None => character.dark_grey(),
            };
            if context.has_cursor {
                styled = styled.underlined().bold();
            }

            queue!(out, PrintStyledContent(styled))?;
        }

        let metrics = self.session.metrics();
        let progress = format!(
            "{}  {} wpm  {}% accuracy  {} errors  {:.0}%",
            format_elapsed(metrics.elapsed_seconds),
            metrics.words_per_minute,
            metrics.accuracy_percent,
            metrics.error_count,
            self.session.completion_percentage()
        );
        queue!(out, cursor::MoveToNextLine(2), Print(progress))?;

        if self.session.state() == SessionState::Finished
            && let Some(record) = self.session.result()
        {
            queue!(
                out,
                cursor::MoveToNextLine(2),
                PrintStyledContent(format!("Finished: {}", result_line(record)).bold())
            )?;
            for line in result_details(record) {
                queue!(out, cursor::MoveToNextLine(1), Print(line))?;
            }
            queue!(
                out,
                cursor::MoveToNextLine(1),
                Print("<CTRL-R> for another text")
            )?;
            if self.session.has_pending_result() {
                queue!(
                    out,
                    cursor::MoveToNextLine(1),
                    PrintStyledContent("Result not saved yet. <CTRL-S> to retry".yellow())
                )?;
            }
        }

        if let Some(status) = &self.status {
            queue!(out, cursor::MoveToNextLine(2), Print(status))?;
        }

        out.flush()
    }
}

fn saving_failed(error: SessionError) -> Message {
    match error {
        SessionError::Persist { .. } => Message::Status(format!("{error}. <CTRL-S> to retry")),
        SessionError::MissingText => Message::Status(error.to_string()),
    }
}
