//! Example: Look up a player and compute their levels.
//!
//! Run with: cargo run --example player_lookup -- <uuid>

use hypixel_api_client::leveling::{bedwars_level_from_player, network_level_from_player};
use hypixel_api_client::{HypixelClient, RequestOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let uuid = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "069a79f444e94726a5befca90e38aaf5".to_string());

    let client = match HypixelClient::from_env() {
        Ok(client) => client,
        Err(_) => {
            println!("Set HYPIXEL_API_KEY to run this example.");
            return Ok(());
        }
    };

    let response = client.player(&uuid, &RequestOptions::default()).await?;
    let Some(player) = response.get("player").filter(|p| !p.is_null()) else {
        println!("Player {} has never joined Hypixel.", uuid);
        return Ok(());
    };

    println!("Name: {}", player["displayname"]);
    let network = network_level_from_player(player);
    println!(
        "Network level: {} ({:.2}), {} exp to next level",
        network.level, network.precise_level, network.remaining_exp_to_next_level
    );

    match bedwars_level_from_player(player) {
        Ok(bedwars) => println!("BedWars: {}✫ ({})", bedwars.level, bedwars.prestige_name),
        Err(_) => println!("BedWars: never played"),
    }

    if let Some(ratelimit) = response.meta.ratelimit {
        println!(
            "Quota: {}/{} remaining, resets at {}",
            ratelimit.remaining, ratelimit.limit, ratelimit.reset
        );
    }

    Ok(())
}
