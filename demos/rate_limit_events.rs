//! Example: Watch throttle events while firing requests.
//!
//! Run with: cargo run --example rate_limit_events

use futures_util::StreamExt;
use hypixel_api_client::{HypixelClient, RateLimitEvent, RequestOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let client = match HypixelClient::from_env() {
        Ok(client) => client,
        Err(_) => {
            println!("Set HYPIXEL_API_KEY to run this example.");
            return Ok(());
        }
    };

    let mut events = client.events();
    let watcher = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            match event {
                Ok(RateLimitEvent::Limited { limit, reset }) => {
                    println!("Throttled at {} requests until {}", limit, reset)
                }
                Ok(RateLimitEvent::Reset) => println!("Quota reset"),
                Err(lagged) => println!("Missed events: {}", lagged),
            }
        }
    });

    for _ in 0..5 {
        let counts = client.player_count(&RequestOptions::default()).await?;
        println!("Players online: {}", counts.result);
        println!("Quota left: {}", client.rate_limit().remaining);
    }

    drop(client);
    watcher.await?;
    Ok(())
}
