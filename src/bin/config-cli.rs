use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use url::Url;

#[derive(Parser)]
#[command(name = "config-cli")]
#[command(about = "Management CLI for the Config Store", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or replace a config document from a JSON file
    Create { name: String, file: PathBuf },
    /// Read a value at document/param1/param2
    Read { path: String },
    /// Update a value; VALUE is parsed as JSON, falling back to a plain string
    Update { path: String, value: String },
    /// Create a validator document from a JSON file of parameter → regex
    CreateValidator { name: String, file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Create { name, file } => {
            client
                .post(cli.url.join(&format!("v1/config-create/{name}"))?)
                .json(&read_json(&file)?)
                .send()
                .await?
        }
        Commands::Read { path } => {
            client
                .get(cli.url.join(&format!("v1/read/{path}"))?)
                .send()
                .await?
        }
        Commands::Update { path, value } => {
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            client
                .post(cli.url.join("v1/update")?)
                .json(&json!({ "path": path, "value": value }))
                .send()
                .await?
        }
        Commands::CreateValidator { name, file } => {
            client
                .post(cli.url.join(&format!("v1/create-validate/{name}"))?)
                .json(&read_json(&file)?)
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let pretty = serde_json::from_str::<Value>(&text)
        .and_then(|json| serde_json::to_string_pretty(&json))
        .unwrap_or(text);

    if status.is_success() {
        println!("{}", pretty);
    } else {
        eprintln!("Error: config store returned status {}", status);
        eprintln!("{}", pretty);
        std::process::exit(1);
    }
    Ok(())
}
