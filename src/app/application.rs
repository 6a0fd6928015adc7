//! Application - Console Front-End
//!
//! A line-oriented stand-in for the settings page: it renders the session as
//! text, turns commands into controller calls and shows drained notices.

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::app::navigation::Destination;
use crate::connection::ConsoleProfile;
use crate::domain::Category;
use crate::error::{Error, Result};
use crate::eventing::{self, AppEvent, EventReceiver};
use crate::features::auth_config::AuthSettingsController;
use crate::i18n::{Locale, t, tf};
use crate::services::{AuthBackend, HttpBackend};
use crate::state::{DragResult, NoticeLevel, NoticeState};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Print the page
    Show,
    /// Flip a boolean global setting
    Toggle(String),
    /// Set a text global setting
    Set(String, String),
    /// Move an entry within a category
    Move {
        category: Category,
        from: usize,
        to: usize,
    },
    /// Delete a configuration
    Delete(i64),
    /// Add or update a configuration from its JSON
    Upsert(Category, String),
    /// Save and leave
    Save,
    /// Leave without saving
    Cancel,
    /// Leave, asking first when there are unsaved changes
    Quit,
    /// Print the command list
    Help,
}

impl ConsoleCommand {
    /// Parse a command line
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match verb.to_ascii_lowercase().as_str() {
            "" | "show" | "ls" => Self::Show,
            "help" | "?" => Self::Help,
            "toggle" => Self::Toggle(required(args.next(), "setting key")?.to_string()),
            "set" => {
                let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if key.is_empty() {
                    return Err(invalid("set needs a setting key"));
                }
                Self::Set(key.to_string(), value.trim().to_string())
            }
            "move" | "mv" => Self::Move {
                category: category(required(args.next(), "category")?)?,
                from: index(required(args.next(), "source index")?)?,
                to: index(required(args.next(), "destination index")?)?,
            },
            "delete" | "rm" => {
                let id = required(args.next(), "configuration id")?;
                Self::Delete(id.parse().map_err(|_| invalid(format!("Not a configuration id: {id}")))?)
            }
            "upsert" => {
                let (name, json) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if json.trim().is_empty() {
                    return Err(invalid("upsert needs a category and configuration JSON"));
                }
                Self::Upsert(category(name)?, json.trim().to_string())
            }
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(invalid(format!("Unknown command: {other}"))),
        };
        Ok(command)
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Invalid {
        message: message.into(),
    }
}

fn required<'a>(arg: Option<&'a str>, what: &str) -> Result<&'a str> {
    arg.ok_or_else(|| invalid(format!("Missing {what}")))
}

fn category(name: &str) -> Result<Category> {
    Category::parse(name).ok_or_else(|| invalid(format!("Unknown category: {name}")))
}

fn index(value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| invalid(format!("Not an index: {value}")))
}

/// Render the session as text
pub fn render<B: AuthBackend>(controller: &AuthSettingsController<B>, locale: Locale) -> String {
    let state = controller.state();
    let mut out = String::new();

    out.push_str(&format!("== {} ==\n", t(locale, "console.title")));
    if state.is_loading() {
        out.push_str(&t(locale, "console.loading"));
        out.push('\n');
        return out;
    }

    out.push_str(&format!("{}:\n", t(locale, "console.global_settings")));
    for (key, value) in state.global_settings().iter() {
        out.push_str(&format!("  {key} = {value}\n"));
    }

    for category in Category::ALL {
        out.push_str(&format!("{}:\n", category.short_name()));
        for (index, config) in state.configs(category).iter().enumerate() {
            out.push_str(&format!("  {index}. {}\n", config.summary()));
        }
    }

    if let Some(link) = state.help_link() {
        out.push_str(&tf(locale, "console.help_link", &[("link", link)]));
        out.push('\n');
    }
    if let Some(warning) = controller.unsaved_changes_warning() {
        out.push_str(&format!("! {warning}\n"));
    }
    out
}

/// What the loop should do after a command
enum Flow {
    Continue,
    Leave,
}

/// Console session driving an [`AuthSettingsController`]
pub struct ConsoleApp<B> {
    controller: AuthSettingsController<B>,
    events: EventReceiver,
    notices: NoticeState,
    locale: Locale,
    destination_url: Box<dyn Fn(Destination) -> String + Send>,
}

impl<B: AuthBackend> ConsoleApp<B> {
    /// Wrap a backend in a fresh session
    pub fn new(
        backend: B,
        locale: Locale,
        destination_url: impl Fn(Destination) -> String + Send + 'static,
    ) -> Self {
        let (tx, rx) = eventing::channel();
        Self {
            controller: AuthSettingsController::new(backend, tx, locale),
            events: rx,
            notices: NoticeState::default(),
            locale,
            destination_url: Box::new(destination_url),
        }
    }

    /// The controller behind the console
    pub fn controller(&self) -> &AuthSettingsController<B> {
        &self.controller
    }

    /// Pending notices
    pub fn notices(&self) -> &NoticeState {
        &self.notices
    }

    /// Move controller events into the notice buffer
    ///
    /// Returns the navigation URL if the controller asked to leave.
    pub fn pump_events(&mut self) -> Option<String> {
        let mut leave_to = None;
        for event in self.events.try_iter() {
            match event {
                AppEvent::Notice {
                    level,
                    message,
                    timestamp,
                } => self.notices.push(level, message, timestamp),
                AppEvent::Navigate { destination } => {
                    let url = (self.destination_url)(destination);
                    let title = t(self.locale, destination.title_key());
                    self.notices.push_now(
                        NoticeLevel::Info,
                        tf(
                            self.locale,
                            "console.navigate",
                            &[("destination", title.as_str()), ("url", url.as_str())],
                        ),
                    );
                    leave_to = Some(url);
                }
                AppEvent::Loaded { .. } | AppEvent::DirtyChanged { .. } => {}
            }
        }
        leave_to
    }

    /// Print and clear pending notices
    fn flush_notices(&mut self) {
        for notice in self.notices.drain() {
            println!("[{}] {}", notice.level.label(), notice.message);
        }
    }

    /// Run one command; errors are already reported as notices
    pub async fn execute(&mut self, command: ConsoleCommand) -> Result<()> {
        match command {
            ConsoleCommand::Show | ConsoleCommand::Help | ConsoleCommand::Quit => Ok(()),
            ConsoleCommand::Toggle(key) => self.controller.toggle_global_setting(&key),
            ConsoleCommand::Set(key, value) => self.controller.set_global_setting(&key, &value),
            ConsoleCommand::Move { category, from, to } => {
                self.controller.reorder(DragResult::within(category, from, to))
            }
            ConsoleCommand::Delete(id) => self.controller.delete_configuration(id).await,
            ConsoleCommand::Upsert(category, json) => {
                self.controller.add_or_update_configuration(&json, category)
            }
            ConsoleCommand::Save => self.controller.save().await,
            ConsoleCommand::Cancel => {
                self.controller.cancel();
                Ok(())
            }
        }
    }

    async fn confirm_leave(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<bool> {
        if !self.controller.should_warn_before_leave() {
            return Ok(true);
        }
        println!("{}", t(self.locale, "console.leave_prompt"));
        let answer = lines.next_line().await?.unwrap_or_default();
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    async fn handle_line(&mut self, line: &str, lines: &mut Lines<BufReader<Stdin>>) -> Flow {
        let command = match ConsoleCommand::parse(line) {
            Ok(command) => command,
            Err(err) => {
                let error = err.to_string();
                println!("{}", tf(self.locale, "console.invalid_command", &[("error", error.as_str())]));
                return Flow::Continue;
            }
        };

        match &command {
            ConsoleCommand::Help => println!("{}", t(self.locale, "console.help")),
            ConsoleCommand::Quit | ConsoleCommand::Cancel => match self.confirm_leave(lines).await {
                Ok(true) if command == ConsoleCommand::Quit => return Flow::Leave,
                Ok(true) => {}
                Ok(false) => return Flow::Continue,
                Err(err) => {
                    println!("{err}");
                    return Flow::Continue;
                }
            },
            _ => {}
        }

        let result = self.execute(command.clone()).await;
        let left = self.pump_events();
        self.flush_notices();

        if left.is_some() {
            return Flow::Leave;
        }
        if result.is_ok() && matches!(command, ConsoleCommand::Show | ConsoleCommand::Move { .. })
        {
            print!("{}", render(&self.controller, self.locale));
        }
        Flow::Continue
    }

    /// Load the session and process commands from stdin until the user leaves
    pub async fn run(&mut self) -> Result<()> {
        let loaded = self.controller.load_initial_state().await;
        self.pump_events();
        self.flush_notices();
        loaded?;

        print!("{}", render(&self.controller, self.locale));
        println!("{}", t(self.locale, "console.help"));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if let Flow::Leave = self.handle_line(&line, &mut lines).await {
                break;
            }
        }

        println!("{}", t(self.locale, "console.done"));
        Ok(())
    }
}

/// Run the console against the server of a profile
pub async fn run_app(profile: ConsoleProfile) -> Result<()> {
    let locale = profile
        .locale
        .as_deref()
        .and_then(Locale::from_tag)
        .unwrap_or_else(Locale::detect);

    info!(profile = %profile.display_name(), locale = locale.code(), "Starting auth settings console");

    let backend = HttpBackend::new(&profile)?;
    let urls = backend.clone();
    let mut app = ConsoleApp::new(backend, locale, move |destination| {
        urls.destination_url(destination)
    });
    app.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move_and_delete() {
        assert_eq!(
            ConsoleCommand::parse("move form 0 1").expect("valid"),
            ConsoleCommand::Move {
                category: Category::Form,
                from: 0,
                to: 1
            }
        );
        assert_eq!(
            ConsoleCommand::parse("  delete 42 ").expect("valid"),
            ConsoleCommand::Delete(42)
        );
        assert!(ConsoleCommand::parse("delete abc").is_err());
        assert!(ConsoleCommand::parse("move nowhere 0 1").is_err());
    }

    #[test]
    fn parses_set_with_spaces_and_upsert_json() {
        assert_eq!(
            ConsoleCommand::parse("set DefaultDomain example.org").expect("valid"),
            ConsoleCommand::Set("DefaultDomain".to_string(), "example.org".to_string())
        );
        assert_eq!(
            ConsoleCommand::parse(r#"upsert sso {"configuration": 3, "provider": "CAS"}"#).expect("valid"),
            ConsoleCommand::Upsert(Category::Sso, r#"{"configuration": 3, "provider": "CAS"}"#.to_string())
        );
        assert!(ConsoleCommand::parse("upsert sso").is_err());
    }

    #[test]
    fn empty_line_shows_page() {
        assert_eq!(ConsoleCommand::parse("").expect("valid"), ConsoleCommand::Show);
        assert!(ConsoleCommand::parse("frobnicate").is_err());
    }
}
