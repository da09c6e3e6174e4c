use application::chat_service::ChatService;
use clap::Parser;
use colored::Colorize;
use dialoguer::Input;
use infrastructure::{config::Config, ollama_client::OllamaClient};
use shared::types::{ChatError, Result};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "helpdesk", about = "Support chatbot over the local knowledge base")]
pub struct Cli {
    /// Ask a single question and exit instead of starting a chat loop.
    #[arg(long)]
    pub query: Option<String>,

    /// Reuse an existing session id; a fresh one is minted otherwise.
    #[arg(long)]
    pub session: Option<String>,
}

pub struct CliApp;

impl CliApp {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        let config = Config::load();
        let client = OllamaClient::new(&config);

        println!("{}", "Loading knowledge base...".dimmed());
        let service = match ChatService::initialize(&config, client).await {
            Ok(service) => service,
            Err(e) => {
                tracing::error!(error = ?e, "startup failed");
                return Err(e);
            }
        };
        println!(
            "{} {} chunks indexed",
            "Ready.".green().bold(),
            service.index_size()
        );

        let session_id = cli
            .session
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if let Some(query) = cli.query {
            self.ask(&service, &session_id, &query).await;
            return Ok(());
        }

        println!("{}", "Type your question, or 'exit' to quit.".dimmed());
        loop {
            let line: String = Input::new().with_prompt("You").interact_text()?;
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                break;
            }
            self.ask(&service, &session_id, trimmed).await;
        }
        Ok(())
    }

    async fn ask(&self, service: &ChatService, session_id: &str, query: &str) {
        match service.handle_message(session_id, query).await {
            Ok(response) => {
                println!("{} {}", "Assistant:".cyan().bold(), response);
            }
            Err(ChatError::Validation(msg)) => {
                println!("{} {}", "Invalid input:".yellow().bold(), msg);
            }
            Err(ChatError::NotReady(msg)) => {
                println!("{} {}", "Not ready:".yellow().bold(), msg);
            }
            Err(ChatError::Upstream(msg)) => {
                eprintln!("{} {}", "Model error:".red().bold(), msg);
            }
            Err(ChatError::Internal(msg)) => {
                eprintln!("{} {}", "Error:".red().bold(), msg);
            }
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
