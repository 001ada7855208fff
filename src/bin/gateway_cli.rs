use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use auth_gateway::repos::Identity;
use auth_gateway::services::auth::{Password, TokenCodec, TokenKind, password::hash_password};

/// Operator helpers for the auth gateway.
///
/// - `hash-password`: produce an argon2id hash for seeding the users table
/// - `issue-token`: mint a token with the configured secret (smoke tests)
#[derive(Parser, Debug)]
#[command(name = "gateway-cli", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a password. Reads the password from stdin when --password is omitted.
    HashPassword {
        #[arg(long)]
        password: Option<String>,
    },

    /// Issue a signed token for an email using AUTH_SECRET_KEY.
    IssueToken {
        #[arg(long)]
        email: String,

        #[arg(long, value_enum, default_value_t = Kind::Access)]
        kind: Kind,

        /// Lifetime in seconds.
        #[arg(long, default_value_t = 900)]
        ttl: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Access,
    Refresh,
}

impl From<Kind> for TokenKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Access => TokenKind::Access,
            Kind::Refresh => TokenKind::Refresh,
        }
    }
}

fn read_password_from_stdin() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("empty password");
    }
    Ok(password)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    match args.command {
        Command::HashPassword { password } => {
            let password = match password {
                Some(p) => p,
                None => read_password_from_stdin()?,
            };
            let hash = hash_password(&Password::new(password))?;
            println!("{hash}");
        }
        Command::IssueToken { email, kind, ttl } => {
            let secret = std::env::var("AUTH_SECRET_KEY").context("AUTH_SECRET_KEY is not set")?;
            let codec = TokenCodec::new(secret.as_bytes(), ttl, ttl);

            // Only the email is signed into the token; the other fields are unused.
            let identity = Identity {
                id: Uuid::nil(),
                email,
                is_active: true,
                is_admin: false,
                password_hash: String::new(),
            };
            let token = codec.issue(&identity, kind.into())?;
            println!("{token}");
        }
    }

    Ok(())
}
