//! Example walking a token through issue, decode and refresh
//!
//! Run with: cargo run -p st_core --example token_roundtrip --features test-utils
//!
//! Reads `KEYSTORE_PATH`, `KEYSTORE_PASSWORD`, `KEYSTORE_ALIAS` and
//! `TOKEN_SYMMETRIC_SECRET` from the environment (or a `.env` file). When the
//! keystore file does not exist a throwaway one is generated.

use st_core::{testing, TokenService, UserIdentity};
use st_shared::{AppConfig, Environment, LogFormat};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();
    let mut config = AppConfig::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.logging.colored)
        .with_file(config.logging.source_location)
        .with_line_number(config.logging.source_location);
    match config.logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    if !config.token.keystore_path.exists() {
        let path = std::env::temp_dir().join("token_roundtrip.p12");
        let keystore = testing::generate_keystore(&config.token.key_alias, &config.token.keystore_password)?;
        std::fs::write(&path, keystore)?;
        println!("Generated throwaway keystore at {}", path.display());
        config.token.keystore_path = path;
    }

    let service = TokenService::from_app_config(&config)?;
    let user = UserIdentity::new("alice", 42, ["ROLE_USER", "ROLE_ADMIN"]);

    println!("\n=== Issue ===");
    let token = service.issue(&user)?;
    println!("Token ({} chars): {}", token.len(), token);

    println!("\n=== Decode ===");
    match service.decode(token.as_str()) {
        Some(claims) => {
            println!("Subject:     {}", claims.subject);
            println!("User id:     {}", claims.id);
            println!("Authorities: {:?}", claims.authority_names());
            println!("Created:     {}", claims.created);
            println!("Expires:     {}", claims.expiration);
        }
        None => println!("Token did not decode"),
    }

    println!("\n=== Refresh ===");
    let refreshed = service.refresh(&token)?;
    println!("Refresh revision: {:?}", service.refresh_rev(refreshed.as_str()));
    println!("Refresh date:     {:?}", service.refresh_date(refreshed.as_str()));

    println!("\n=== Tampered ===");
    let first = if token.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{}{}", first, &token[1..]);
    println!("Decodes: {}", service.decode(tampered.as_str()).is_some());

    Ok(())
}
