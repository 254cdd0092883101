//! Smallest possible round trip: one GET decoded as text.
//!
//! ```bash
//! cargo run --example fetch -- https://www.rust-lang.org/
//! ```

use courier::{CallOptions, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier=debug".into()),
        )
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.rust-lang.org/".to_owned());

    let client = Client::new()?;
    let response = client.get::<String>(&url, &CallOptions::default()).await;

    match response.payload {
        Some(text) => {
            let preview: String = text.chars().take(200).collect();
            println!("{preview}");
        }
        None => anyhow::bail!(
            "request failed (status {:?}): {:?}",
            response.status,
            response.failure
        ),
    }

    Ok(())
}
