use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "leads-cli")]
#[command(about = "Command-line client for the leads API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all leads
    Leads,
    /// List all projects
    Projects,
    /// Create a lead from a JSON object
    AddLead { json: String },
    /// Create a project from a JSON object
    AddProject { json: String },
    /// Replace a lead with a JSON object
    UpdateLead { id: String, json: String },
    /// Delete a project
    DeleteProject { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Leads => client.get(format!("{}/api/leads", base)).send().await?,
        Commands::Projects => client.get(format!("{}/api/projects", base)).send().await?,
        Commands::AddLead { json } => {
            client
                .post(format!("{}/api/leads", base))
                .json(&parse_object(&json)?)
                .send()
                .await?
        }
        Commands::AddProject { json } => {
            client
                .post(format!("{}/api/projects", base))
                .json(&parse_object(&json)?)
                .send()
                .await?
        }
        Commands::UpdateLead { id, json } => {
            client
                .put(format!("{}/api/leads/{}", base, id))
                .json(&parse_object(&json)?)
                .send()
                .await?
        }
        Commands::DeleteProject { id } => {
            client
                .delete(format!("{}/api/projects/{}", base, id))
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn parse_object(raw: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err("expected a JSON object".into());
    }
    Ok(value)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
