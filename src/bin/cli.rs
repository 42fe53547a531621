//! Mindu CLI
//!
//! Command-line client for the Mindu API:
//! - Create an account, log in and out
//! - Take the assessment interactively
//! - Review history and the dashboard summary
//! - Chat with the advisor and request feedback

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use mindu::assessment::{AnswerSheet, CategoryScores, QuizSession, ScoreBand, LIKERT_MAX, LIKERT_MIN};
use mindu::llm::FeedbackReport;
use mindu::storage::ResponseRecord;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mindu-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mental-wellness self-assessment from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8082", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account (prompts for the password)
    Signup {
        email: String,
        username: String,
    },

    /// Log in and remember the session token
    Login { email: String },

    /// End the current session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Take the five-part assessment
    Quiz {
        /// Skip AI feedback after submitting
        #[arg(long)]
        no_feedback: bool,
    },

    /// List past assessments
    History,

    /// Show the dashboard summary
    Dashboard,

    /// Ask the advisor a question
    Chat {
        /// Question text
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// AI feedback for a stored assessment (default: the latest)
    Feedback {
        #[arg(long)]
        id: Option<String>,
    },

    /// Show server health
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Thin JSON client over the REST API
struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: load_token(),
        }
    }

    fn require_login(&self) -> anyhow::Result<()> {
        if self.token.is_none() {
            bail!("Not logged in. Run `mindu-cli login <email>` first.");
        }
        Ok(())
    }

    async fn get(&self, path: &str) -> anyhow::Result<Value> {
        let mut request = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        self.finish(request).await
    }

    async fn post(&self, path: &str, body: &Value) -> anyhow::Result<Value> {
        let mut request = self.http.post(format!("{}{}", self.base_url, path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        self.finish(request).await
    }

    async fn finish(&self, request: reqwest::RequestBuilder) -> anyhow::Result<Value> {
        let response = request.send().await.with_context(|| {
            format!(
                "Cannot connect to Mindu API at {} (is `cargo run --bin mindu` running?)",
                self.base_url
            )
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            bail!("{} ({})", error_message(&text), status);
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url);
    let as_json = cli.format == "json";

    match cli.command {
        Commands::Signup { email, username } => {
            let password = prompt("Password: ")?;
            let confirm = prompt("Confirm password: ")?;

            let session = client
                .post(
                    "/api/auth/signup",
                    &json!({
                        "email": email,
                        "username": username,
                        "password": password,
                        "confirmPassword": confirm,
                    }),
                )
                .await?;

            save_session(&session)?;
            println!("Account created. Welcome, {}!", session["user"]["username"].as_str().unwrap_or("friend"));
        }

        Commands::Login { email } => {
            let password = prompt("Password: ")?;
            let session = client
                .post("/api/auth/login", &json!({"email": email, "password": password}))
                .await?;

            save_session(&session)?;
            println!("Logged in as {}", session["user"]["email"].as_str().unwrap_or(&email));
        }

        Commands::Logout => {
            if client.token.is_some() {
                // Server-side logout is idempotent; forget the token regardless
                if let Err(e) = client.post("/api/auth/logout", &json!({})).await {
                    eprintln!("Warning: {}", e);
                }
            }
            clear_token()?;
            println!("Logged out.");
        }

        Commands::Whoami => {
            client.require_login()?;
            let me = client.get("/api/auth/me").await?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&me)?);
            } else {
                println!(
                    "{} <{}>",
                    me["user"]["username"].as_str().unwrap_or("-"),
                    me["user"]["email"].as_str().unwrap_or("-")
                );
            }
        }

        Commands::Quiz { no_feedback } => {
            client.require_login()?;
            let sheet = run_quiz()?;

            let record = client
                .post("/api/responses", &json!({"answers": sheet}))
                .await?;
            let record: ResponseRecord = serde_json::from_value(record)?;

            println!();
            print_scores(&record.answers);

            if !no_feedback {
                println!();
                println!("Asking the advisor for feedback...");
                let report = request_feedback(&client, &record.answers).await?;
                print_report(&report);
            }
        }

        Commands::History => {
            client.require_login()?;
            let data = client.get("/api/responses").await?;

            if as_json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let records: Vec<ResponseRecord> =
                    serde_json::from_value(data["responses"].clone())?;
                print_history(&records);
            }
        }

        Commands::Dashboard => {
            client.require_login()?;
            let data = client.get("/api/dashboard").await?;

            if as_json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_dashboard(&data["summary"]);
            }
        }

        Commands::Chat { query } => {
            let query = query.join(" ");
            let data = client.post("/api/chat", &json!({"query": query})).await?;
            println!("{}", data["response"].as_str().unwrap_or_default());
        }

        Commands::Feedback { id } => {
            client.require_login()?;
            let record: ResponseRecord = match id {
                Some(id) => serde_json::from_value(client.get(&format!("/api/responses/{}", id)).await?)?,
                None => {
                    let data = client.get("/api/responses").await?;
                    let records: Vec<ResponseRecord> =
                        serde_json::from_value(data["responses"].clone())?;
                    match records.into_iter().last() {
                        Some(r) => r,
                        None => bail!("No assessments yet. Run `mindu-cli quiz` first."),
                    }
                }
            };

            print_scores(&record.answers);
            println!();
            let report = request_feedback(&client, &record.answers).await?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Status => {
            let health = client.get("/health").await?;

            println!("Mindu v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
            println!("Storage:    {}", health["storage"].as_str().unwrap_or("unknown"));
            println!("LLM:        {}", health["llm"].as_str().unwrap_or("unknown"));

            if let Some(stats) = health.get("stats") {
                println!();
                println!("Users: {}", stats["users"].as_u64().unwrap_or(0));
                println!("Assessments: {}", stats["responses"].as_u64().unwrap_or(0));
            }

            if let Some(uptime) = health["uptime_seconds"].as_u64() {
                println!();
                println!("Uptime: {}", format_duration(uptime));
            }
        }

        Commands::Config { output } => {
            let config = mindu::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Walk the five pages on stdin and return the raw answers
fn run_quiz() -> anyhow::Result<AnswerSheet> {
    let mut quiz = QuizSession::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!(
        "Answer each statement from {} (Never) to {} (Always).",
        LIKERT_MIN, LIKERT_MAX
    );

    loop {
        let set = quiz.current_set();
        println!();
        println!(
            "[{}/{}] {} ({:.0}%)",
            quiz.page() + 1,
            quiz.total_pages(),
            set.category.title(),
            quiz.progress_percent()
        );

        for (id, text) in set.numbered() {
            loop {
                print!("  {}. {} ", id, text);
                io::stdout().flush()?;

                let line = match lines.next() {
                    Some(line) => line?,
                    None => bail!("Input closed before the quiz was finished"),
                };

                match parse_answer(&line) {
                    Some(value) => {
                        quiz.answer(id, value)?;
                        break;
                    }
                    None => println!("    Please enter a number from {} to {}.", LIKERT_MIN, LIKERT_MAX),
                }
            }
        }

        if quiz.is_last_page() {
            let sheet = quiz.answer_sheet();
            quiz.submit()?;
            return Ok(sheet);
        }
        quiz.advance()?;
    }
}

async fn request_feedback(
    client: &ApiClient,
    scores: &CategoryScores,
) -> anyhow::Result<FeedbackReport> {
    let data = client
        .post("/api/feedback", &serde_json::to_value(scores.by_title())?)
        .await?;
    Ok(serde_json::from_value(data["report"].clone())?)
}

fn parse_answer(input: &str) -> Option<u8> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|v| (LIKERT_MIN..=LIKERT_MAX).contains(v))
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn print_scores(scores: &CategoryScores) {
    for (category, score) in scores.iter() {
        println!(
            "  {:<30} {:>3.1}/5  {}",
            category.title(),
            score,
            score_bar(score)
        );
    }
    let average = scores.average();
    println!(
        "  {:<30} {:>3.1}/5  {}",
        "Overall",
        average,
        ScoreBand::from_score(average).label()
    );
}

fn print_report(report: &FeedbackReport) {
    println!("Overall assessment: {}", report.tag);
    println!();
    println!("{}", report.feedback);
    println!();
    println!("Suggested actions:");
    for item in report.action_items() {
        println!("  - {}", item);
    }
    println!();
    println!("This feedback is generated by AI and should not replace professional advice.");
}

fn print_history(records: &[ResponseRecord]) {
    if records.is_empty() {
        println!("No assessments yet.");
        println!();
        println!("Take your first one with:");
        println!("  mindu-cli quiz");
        return;
    }

    println!("{:<18} {:>6} {:>6} {:>6} {:>6} {:>6} {:>8}", "Date", "1", "2", "3", "4", "5", "Average");
    println!("{}", "-".repeat(64));
    for record in records {
        let s: Vec<f64> = record.answers.iter().map(|(_, s)| s).collect();
        println!(
            "{:<18} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>8.1}",
            format_timestamp(record.timestamp),
            s[0],
            s[1],
            s[2],
            s[3],
            s[4],
            record.answers.average()
        );
    }
}

fn print_dashboard(summary: &Value) {
    if summary.is_null() {
        println!("No mental health data available.");
        println!("Start tracking by completing your first assessment: mindu-cli quiz");
        return;
    }

    println!(
        "Overall score: {:.1} ({})",
        summary["overallAverage"].as_f64().unwrap_or(0.0),
        summary["bandLabel"].as_str().unwrap_or("-")
    );
    println!(
        "Assessments taken: {}",
        summary["assessmentsTaken"].as_u64().unwrap_or(0)
    );
    println!(
        "Last assessment: {}",
        format_timestamp(summary["latestTimestamp"].as_i64().unwrap_or(0))
    );
    println!();
    println!("Latest breakdown:");
    for item in summary["latest"].as_array().into_iter().flatten() {
        let score = item["score"].as_f64().unwrap_or(0.0);
        println!(
            "  {:<30} {:>3.1}  {:<16} {}",
            item["title"].as_str().unwrap_or("-"),
            score,
            item["bandLabel"].as_str().unwrap_or("-"),
            score_bar(score)
        );
    }

    let trend: Vec<f64> = summary["trend"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|p| p["averageScore"].as_f64())
        .collect();
    if trend.len() > 1 {
        println!();
        println!("Trend: {}", sparkline(&trend));
    }
}

fn score_bar(score: f64) -> String {
    let filled = (score * 4.0).round().clamp(0.0, 20.0) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}

/// One character per point, scaled over the 1-5 range
fn sparkline(values: &[f64]) -> String {
    const TICKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    values
        .iter()
        .map(|v| {
            let idx = ((v.clamp(1.0, 5.0) - 1.0) / 4.0 * 7.0).round() as usize;
            TICKS[idx.min(7)]
        })
        .collect()
}

fn format_timestamp(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

// ============================================
// Session token file
// ============================================

fn token_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mindu").join("token"))
}

fn load_token() -> Option<String> {
    let path = token_path()?;
    let token = std::fs::read_to_string(path).ok()?;
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn save_session(session: &Value) -> anyhow::Result<()> {
    let token = session["token"]
        .as_str()
        .context("server response carried no session token")?;
    let path = token_path().context("no config directory for this user")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, token)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
    }

    if let Some(expires) = session["expiresAt"].as_i64() {
        let days = (expires - Utc::now().timestamp_millis()) / 86_400_000;
        println!("Session valid for {} days", days.max(0));
    }
    Ok(())
}

fn clear_token() -> anyhow::Result<()> {
    if let Some(path) = token_path() {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("3\n"), Some(3));
        assert_eq!(parse_answer(" 5 "), Some(5));
        assert_eq!(parse_answer("0"), None);
        assert_eq!(parse_answer("6"), None);
        assert_eq!(parse_answer("three"), None);
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"code":"VALIDATION_ERROR","message":"Query is required"},"request_id":"x"}"#;
        assert_eq!(error_message(body), "Query is required");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(5.0), "#".repeat(20));
        assert_eq!(score_bar(2.5), format!("{}{}", "#".repeat(10), ".".repeat(10)));
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[1.0, 3.0, 5.0]), "▁▅█");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(3_700), "1h 1m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }
}
