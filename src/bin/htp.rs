use clap::{Parser, Subcommand};

use htp_testbed::client::{ClientError, HtpClient, StateStore};

/// Tiny HTTP client that remembers a base url and an auth token
#[derive(Debug, Parser)]
#[command(name = "htp", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Remember the server base url, e.g. http://localhost:8888
    SetBaseUrl { url: String },

    /// Log in and save the returned auth token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Send an authenticated request
    Req {
        /// HTTP method (GET, POST, ...)
        method: String,
        /// Path appended to the base url, query string included
        path: String,
        /// Body fields as key=value (POST only)
        #[arg(long, num_args = 1..)]
        data: Vec<String>,
        /// Comma separated fields to keep from a JSON response
        #[arg(long)]
        fields: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        println!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let store = StateStore::in_current_dir()?;
    store.ensure_dir()?;
    let client = HtpClient::new(store);

    match cli.command {
        Command::SetBaseUrl { url } => {
            client.set_base_url(&url)?;
            println!("Base url set to: {url}");
        }
        Command::Login { username, password } => {
            client.login(&username, &password).await?;
            println!("Login success.saved token");
        }
        Command::Req {
            method,
            path,
            data,
            fields,
        } => {
            let output = client
                .send_request(&method, &path, &data, fields.as_deref())
                .await?;
            println!("{output}");
        }
    }
    Ok(())
}
