use anyhow::{Context, Result};
use clap::Parser;
use game_core::{FactService, GameSession, HttpFactService, OptionMark, Phase};
use shared::domain::Level;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader, Lines};

#[derive(Parser, Debug)]
#[command(about = "Play spot-the-fake-fact in the terminal")]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    /// Topic for the first round; prompted for when omitted.
    #[arg(long)]
    topic: Option<String>,
    /// Difficulty for the first round: easy, medium or hard.
    #[arg(long)]
    level: Option<Level>,
}

struct Prompt<R> {
    lines: Lines<BufReader<R>>,
}

impl<R: AsyncRead + Unpin> Prompt<R> {
    fn new(input: R) -> Self {
        Self {
            lines: BufReader::new(input).lines(),
        }
    }

    /// Returns `None` once stdin is closed.
    async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout();
        stdout.write_all(question.as_bytes()).await?;
        stdout.flush().await?;
        Ok(self.lines.next_line().await?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let mut args = Args::parse();

    let service = HttpFactService::new(&args.server_url)
        .with_context(|| format!("invalid server url: {}", args.server_url))?;
    let mut session = GameSession::new();
    let mut prompt = Prompt::new(io::stdin());

    loop {
        let Some(topic) = read_topic(&mut prompt, args.topic.take()).await? else {
            break;
        };
        let level = match args.level.take() {
            Some(level) => level,
            None => match ask_level(&mut prompt).await? {
                Some(level) => level,
                None => break,
            },
        };

        let Some(request) = session.submit_configuration(&topic, level) else {
            continue;
        };
        println!("Generating facts about {}...", request.topic);
        let result = service.generate(&request).await;
        session.complete_generation(result);

        if session.phase() != Phase::Presenting {
            if let Some(err) = session.error_message() {
                println!("{err}");
            }
            continue;
        }

        print_round(&session);
        if !read_guess(&mut prompt, &mut session).await? {
            break;
        }
        session.submit_guess();
        print_round(&session);
        if let Some(feedback) = session.feedback() {
            println!("\n{}\n{}", feedback.title, feedback.message);
        }

        let again = prompt.ask("\nPlay again? [y/N] ").await?;
        if !again.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")) {
            break;
        }
        session.reset_to_configuration();
    }

    Ok(())
}

/// Uses `preset` when it is not blank, otherwise prompts until a non-blank
/// topic is entered. Returns `None` on EOF.
async fn read_topic<R: AsyncRead + Unpin>(
    prompt: &mut Prompt<R>,
    preset: Option<String>,
) -> Result<Option<String>> {
    if let Some(topic) = preset.filter(|topic| !topic.trim().is_empty()) {
        return Ok(Some(topic));
    }
    loop {
        let Some(topic) = prompt.ask("Topic: ").await? else {
            return Ok(None);
        };
        if !topic.trim().is_empty() {
            return Ok(Some(topic));
        }
        println!("A topic is required.");
    }
}

async fn ask_level<R: AsyncRead + Unpin>(prompt: &mut Prompt<R>) -> Result<Option<Level>> {
    loop {
        let Some(answer) = prompt
            .ask("Difficulty [easy/medium/hard] (default easy): ")
            .await?
        else {
            return Ok(None);
        };
        if answer.trim().is_empty() {
            return Ok(Some(Level::default()));
        }
        match answer.parse::<Level>() {
            Ok(level) => return Ok(Some(level)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Reads numbered guesses until one selects a fact. Returns `false` on EOF.
async fn read_guess<R: AsyncRead + Unpin>(
    prompt: &mut Prompt<R>,
    session: &mut GameSession,
) -> Result<bool> {
    let count = session.options().len();
    loop {
        let Some(answer) = prompt
            .ask(&format!("Which statement is fake? [1-{count}] "))
            .await?
        else {
            return Ok(false);
        };
        let picked = answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1));
        if let Some(index) = picked {
            if session.select_fact(index) {
                return Ok(true);
            }
        }
        println!("Enter a number between 1 and {count}.");
    }
}

fn print_round(session: &GameSession) {
    if let Some((topic, level)) = session.header() {
        println!("\n{topic} [{level}]");
    }
    for option in session.options() {
        println!("{} {}. {}", mark_label(option.mark), option.index + 1, option.text);
    }
}

fn mark_label(mark: OptionMark) -> &'static str {
    match mark {
        OptionMark::Plain => "   ",
        OptionMark::Selected => " > ",
        OptionMark::CorrectResult => "[F]",
        OptionMark::WrongResult => "[x]",
    }
}
