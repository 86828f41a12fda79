use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

// Import shared types
use uwlink_types::*;

#[derive(Parser)]
#[command(name = "uwlink")]
#[command(about = "Command-line client for the uwlink pet registry")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend server URL
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,

    /// Timeout for requests in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Access token for authenticated commands (falls back to UWLINK_TOKEN)
    #[arg(long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new owner account
    Signup { username: String, password: String },

    /// Log in and print an access token
    Login { username: String, password: String },

    /// List all owners
    Owners,

    /// Show a single owner
    Owner { owner_id: Uuid },

    /// List all pets
    Pets,

    /// Show a single pet
    Pet { pet_id: Uuid },

    /// Register a pet for the logged-in owner
    CreatePet {
        /// Pet name
        #[arg(long)]
        name: String,

        /// Pet kind, e.g. "dog" or "cat"
        #[arg(long = "type")]
        kind: String,
    },

    /// Check that the server is up
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("Failed to create HTTP client")?;

    let server = cli.server.trim_end_matches('/');

    match cli.command {
        Commands::Signup { username, password } => {
            let body = post_json(
                &client,
                &format!("{}/owners", server),
                None,
                &SignupRequest { username, password },
            )
            .await?;
            print_pretty(&body)?;
        }
        Commands::Login { username, password } => {
            let body = post_json(
                &client,
                &format!("{}/login", server),
                None,
                &LoginRequest { username, password },
            )
            .await?;
            let token: TokenResponse =
                serde_json::from_value(body).context("Unexpected login response")?;

            // Print the raw token so it can be captured into UWLINK_TOKEN
            println!("{}", token.access_token);
        }
        Commands::Owners => {
            let token = resolve_token(cli.token)?;
            let body = get_json(&client, &format!("{}/owners", server), Some(&token)).await?;
            print_pretty(&body)?;
        }
        Commands::Owner { owner_id } => {
            let token = resolve_token(cli.token)?;
            let body = get_json(
                &client,
                &format!("{}/owners/{}", server, owner_id),
                Some(&token),
            )
            .await?;
            print_pretty(&body)?;
        }
        Commands::Pets => {
            let token = resolve_token(cli.token)?;
            let body = get_json(&client, &format!("{}/pets", server), Some(&token)).await?;
            print_pretty(&body)?;
        }
        Commands::Pet { pet_id } => {
            let token = resolve_token(cli.token)?;
            let body = get_json(
                &client,
                &format!("{}/pets/{}", server, pet_id),
                Some(&token),
            )
            .await?;
            print_pretty(&body)?;
        }
        Commands::CreatePet { name, kind } => {
            let token = resolve_token(cli.token)?;
            let body = post_json(
                &client,
                &format!("{}/pets", server),
                Some(&token),
                &CreatePetRequest { name, kind },
            )
            .await?;
            print_pretty(&body)?;
        }
        Commands::Health => {
            let body = get_json(&client, &format!("{}/health", server), None).await?;
            print_pretty(&body)?;
        }
    }

    Ok(())
}

fn resolve_token(explicit: Option<String>) -> Result<String> {
    if let Some(token) = explicit {
        return Ok(token);
    }

    std::env::var("UWLINK_TOKEN")
        .context("No access token - pass --token or set UWLINK_TOKEN (see `uwlink login`)")
}

fn print_pretty(body: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

async fn get_json(client: &reqwest::Client, url: &str, token: Option<&str>) -> Result<Value> {
    let mut request = client.get(url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    check_response(response).await
}

async fn post_json<T: Serialize>(
    client: &reqwest::Client,
    url: &str,
    token: Option<&str>,
    body: &T,
) -> Result<Value> {
    let mut request = client.post(url).json(body);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    check_response(response).await
}

async fn check_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("Server returned a non-JSON response")?;

    if !status.is_success() {
        let message = body["message"].as_str().unwrap_or("unknown error");
        bail!("Server returned {}: {}", status, message);
    }

    Ok(body)
}
