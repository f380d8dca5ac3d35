//! Line-oriented chat shell.
//!
//! Reads visitor input from stdin, drives a [`SessionController`] and prints
//! each reply through the content renderer.

use std::future::Future;

use chrono::Local;
use guidechat_chat::{IgnoreReason, SessionController, SubmitOutcome};
use guidechat_core::config::{QuickAction, ShellConfig};
use guidechat_core::message::{Message, MessageContent};
use guidechat_render::{render, to_plain_text};
use tokio::io::{AsyncBufReadExt, BufReader};

const WELCOME_TITLE: &str = "Welcome to the Bale Mountains National Park guide";
const TYPING_INDICATOR: &str = "Guide is typing...";

/// One line of input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text to send to the guide.
    Say(String),
    /// `/quick N`, 1-based.
    Quick(usize),
    /// `/quick` with no argument.
    ListQuick,
    Help,
    Quit,
    /// A slash command that could not be understood.
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Say(line.to_string());
    };

    let mut words = rest.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("quit") | Some("exit"), None, None) => Command::Quit,
        (Some("help"), None, None) => Command::Help,
        (Some("quick"), None, None) => Command::ListQuick,
        (Some("quick"), Some(n), None) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Command::Quick(n),
            _ => Command::Invalid(format!("not a quick action number: {}", n)),
        },
        _ => Command::Invalid(format!("unknown command: {}", trimmed)),
    }
}

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Outcome of waiting for the in-flight reply.
#[derive(Debug, PartialEq)]
pub enum Wait<'a> {
    /// The call finished; carries the appended message, if any was pending.
    Settled(Option<&'a Message>),
    /// `interrupt` fired first. The request is still owned by the controller.
    Interrupted,
}

/// Wait for the in-flight reply unless `interrupt` completes first.
pub async fn settle_or_interrupt<F>(controller: &mut SessionController, interrupt: F) -> Wait<'_>
where
    F: Future,
{
    tokio::select! {
        message = controller.settle() => Wait::Settled(message),
        _ = interrupt => Wait::Interrupted,
    }
}

/// Resolves on Ctrl-C. Never resolves if the signal cannot be watched.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

pub struct Shell {
    controller: SessionController,
    config: ShellConfig,
    quick_actions: Vec<QuickAction>,
}

impl Shell {
    pub fn new(
        controller: SessionController,
        config: ShellConfig,
        quick_actions: Vec<QuickAction>,
    ) -> Self {
        Self {
            controller,
            config,
            quick_actions,
        }
    }

    /// Run until stdin closes, `/quit`, or Ctrl-C.
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("{}", welcome_panel(&self.quick_actions));

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = interrupted() => {
                    tracing::info!("Interrupted");
                    None
                }
            };
            let Some(line) = line else { break };

            match parse_command(&line) {
                Command::Quit => break,
                Command::Help => println!("{}", help_text()),
                Command::ListQuick => println!("{}", quick_action_list(&self.quick_actions)),
                Command::Invalid(reason) => println!("{}", reason),
                Command::Quick(n) => match self.quick_actions.get(n - 1).cloned() {
                    Some(action) => {
                        println!("> {}", action.query);
                        let outcome = self.controller.run_quick_action(&action);
                        if self.finish(outcome).await == Flow::Quit {
                            break;
                        }
                    }
                    None => println!("There is no quick action {}.", n),
                },
                Command::Say(text) => {
                    self.controller.set_input(text);
                    let outcome = self.controller.submit_input();
                    if self.finish(outcome).await == Flow::Quit {
                        break;
                    }
                }
            }
        }

        tracing::debug!(
            session_id = %self.controller.session_id(),
            messages = self.controller.messages().len(),
            "Shell closed"
        );
        Ok(())
    }

    /// Wait for the reply to an accepted submission. Ctrl-C while waiting
    /// ends the shell; dropping the controller then aborts the request.
    async fn finish(&mut self, outcome: SubmitOutcome) -> Flow {
        match outcome {
            SubmitOutcome::Accepted(_) => {
                if self.controller.is_typing() {
                    println!("{}", TYPING_INDICATOR);
                }
                match settle_or_interrupt(&mut self.controller, interrupted()).await {
                    Wait::Settled(Some(message)) => {
                        println!("{}", format_message(message, &self.config))
                    }
                    Wait::Settled(None) => {}
                    Wait::Interrupted => {
                        tracing::info!("Interrupted while waiting for a reply");
                        return Flow::Quit;
                    }
                }
            }
            SubmitOutcome::Ignored(IgnoreReason::Busy) => {
                println!("Please wait for the current reply.");
            }
            SubmitOutcome::Ignored(IgnoreReason::Empty) => {}
        }
        Flow::Continue
    }
}

pub fn welcome_panel(quick_actions: &[QuickAction]) -> String {
    let mut out = String::new();
    out.push_str(WELCOME_TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(WELCOME_TITLE.chars().count()));
    out.push_str("\nAsk me anything about the park, or pick a quick action:\n");
    out.push_str(&quick_action_list(quick_actions));
    out.push_str("\nType /help for commands.");
    out
}

pub fn quick_action_list(quick_actions: &[QuickAction]) -> String {
    if quick_actions.is_empty() {
        return "No quick actions configured.".to_string();
    }
    quick_actions
        .iter()
        .enumerate()
        .map(|(i, action)| format!("  {}. {}", i + 1, action.label))
        .collect::<Vec<_>>()
        .join("\n")
}

fn help_text() -> &'static str {
    "Commands:\n  /quick      list quick actions\n  /quick N    ask quick action N\n  /help       show this help\n  /quit       leave the chat"
}

/// Bot reply as printed in the transcript.
pub fn format_message(message: &Message, config: &ShellConfig) -> String {
    let mut header = String::from("Guide");
    if config.show_timestamps {
        let local = message.timestamp.with_timezone(&Local);
        header.push_str(&format!(" [{}]", local.format("%H:%M")));
    }
    if config.show_intent && !message.is_error {
        if let Some(intent) = &message.intent {
            match message.confidence {
                Some(confidence) => {
                    header.push_str(&format!(" ({}, {:.0}%)", intent, confidence * 100.0))
                }
                None => header.push_str(&format!(" ({})", intent)),
            }
        }
    }
    if message.is_error {
        header.push_str(" !");
    }

    let body = match message.content() {
        MessageContent::Parts(parts) => to_plain_text(&render(parts)),
        MessageContent::Text(text) => text.to_string(),
    };
    format!("{}:\n{}\n", header, body)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use async_trait::async_trait;
    use guidechat_chat::{
        ConversationService, KeywordResponder, ServiceError, SessionState, FAILURE_TEXT,
    };
    use guidechat_core::content::ContentBlock;
    use guidechat_core::message::{ChatReply, MessageId};

    /// Never answers.
    struct SilentService;

    #[async_trait]
    impl ConversationService for SilentService {
        async fn ask(&self, _message: &str) -> Result<ChatReply, ServiceError> {
            std::future::pending().await
        }
    }

    fn quiet() -> ShellConfig {
        ShellConfig {
            show_intent: false,
            show_timestamps: false,
        }
    }

    // ---- commands ----

    #[test]
    fn test_plain_text_is_said() {
        assert_eq!(
            parse_command("How do I get there?"),
            Command::Say("How do I get there?".to_string())
        );
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("  /exit "), Command::Quit);
        assert_eq!(parse_command("/help"), Command::Help);
        assert_eq!(parse_command("/quick"), Command::ListQuick);
        assert_eq!(parse_command("/quick 3"), Command::Quick(3));
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(parse_command("/quick 0"), Command::Invalid(_)));
        assert!(matches!(parse_command("/quick two"), Command::Invalid(_)));
        assert!(matches!(parse_command("/dance"), Command::Invalid(_)));
        assert!(matches!(parse_command("/quick 1 2"), Command::Invalid(_)));
    }

    // ---- panels ----

    #[test]
    fn test_welcome_lists_quick_actions() {
        let actions = vec![
            QuickAction::new("Park Information", "Tell me about Bale Mountains National Park"),
            QuickAction::new("Park Fees", "What are the park entrance fees?"),
        ];
        let panel = welcome_panel(&actions);
        assert!(panel.starts_with(WELCOME_TITLE));
        assert!(panel.contains("  1. Park Information"));
        assert!(panel.contains("  2. Park Fees"));
    }

    #[test]
    fn test_empty_quick_action_list() {
        assert_eq!(quick_action_list(&[]), "No quick actions configured.");
    }

    // ---- messages ----

    #[test]
    fn test_format_text_reply() {
        let message = Message::bot(MessageId(2), ChatReply::text("Hello!"));
        assert_eq!(format_message(&message, &quiet()), "Guide:\nHello!\n");
    }

    #[test]
    fn test_format_parts_reply_renders_blocks() {
        let reply = ChatReply::parts(vec![
            ContentBlock::Header("Fees".to_string()),
            ContentBlock::Note("Cash only".to_string()),
        ]);
        let out = format_message(&Message::bot(MessageId(2), reply), &quiet());
        assert!(out.contains("Fees\n===="));
        assert!(out.contains("Note: Cash only"));
    }

    #[test]
    fn test_format_shows_intent_when_enabled() {
        let reply = ChatReply::text("Fees").with_intent("park_fees", 0.95);
        let config = ShellConfig {
            show_intent: true,
            show_timestamps: false,
        };
        let out = format_message(&Message::bot(MessageId(2), reply), &config);
        assert!(out.starts_with("Guide (park_fees, 95%):"));
    }

    #[test]
    fn test_format_error_message() {
        let message = Message::error(MessageId(2), FAILURE_TEXT);
        let out = format_message(&message, &quiet());
        assert!(out.starts_with("Guide !:"));
        assert!(out.contains(FAILURE_TEXT));
    }

    // ---- waiting for replies ----

    #[tokio::test]
    async fn test_interrupt_while_waiting() {
        let service = Arc::new(SilentService);
        let mut controller = SessionController::new(service.clone());
        assert!(controller.submit("hello?").is_accepted());

        let waited = settle_or_interrupt(&mut controller, async {}).await;
        assert_eq!(waited, Wait::Interrupted);
        assert_eq!(controller.state(), SessionState::Sending);

        drop(controller);
        for _ in 0..10 {
            if Arc::strong_count(&service) == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(Arc::strong_count(&service), 1);
    }

    #[tokio::test]
    async fn test_reply_arrives_without_interrupt() {
        let responder = Arc::new(KeywordResponder::builtin().unwrap());
        let mut controller = SessionController::new(responder);
        controller.submit("What are the park entrance fees?");

        match settle_or_interrupt(&mut controller, std::future::pending::<()>()).await {
            Wait::Settled(Some(message)) => {
                assert_eq!(message.intent.as_deref(), Some("park_fees"))
            }
            other => panic!("expected a reply, got {:?}", other),
        }
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_nothing_in_flight_settles_immediately() {
        let mut controller = SessionController::new(Arc::new(SilentService));
        let waited = settle_or_interrupt(&mut controller, std::future::pending::<()>()).await;
        assert_eq!(waited, Wait::Settled(None));
    }
}
