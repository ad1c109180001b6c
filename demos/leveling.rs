//! Example: Level calculators without any network access.
//!
//! Run with: cargo run --example leveling

use hypixel_api_client::leveling::{
    BedwarsPrestige, MinecraftColor, bedwars_level, exp_to_network_level, guild_level,
    network_level, skywars_level, strip_formatting, total_exp_to_skywars_level,
};

fn main() {
    let network = network_level(1_000_000.0);
    println!(
        "Network: level {} ({:.3}), {} exp into the level",
        network.level,
        network.precise_level,
        network.current_exp - network.exp_to_level
    );
    println!("Exp needed for network level 100: {}", exp_to_network_level(100.0));

    let guild = guild_level(5_000_000.0);
    println!("Guild: level {} ({:.3})", guild.level, guild.precise_level);

    let bedwars = bedwars_level(1_000_000.0);
    println!(
        "BedWars: {}{}✫ {}",
        bedwars.prestige_color,
        bedwars.level,
        bedwars.prestige_name
    );
    println!("Level 742 prestige: {:?}", BedwarsPrestige::for_level(742));

    let skywars = skywars_level(50_000.0);
    println!("SkyWars: level {} ({:.2})", skywars.level, skywars.precise_level);
    println!("Exp needed for SkyWars level 20: {}", total_exp_to_skywars_level(20));

    let motd = format!(
        "{}Hypixel Network {}[1.8-1.21]",
        MinecraftColor::Gold.code(),
        MinecraftColor::Red.code()
    );
    println!("Plain MOTD: {}", strip_formatting(&motd));
}
