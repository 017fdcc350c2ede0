//! Headless command-line client for the club minigames.
//!
//! A thin shell over the runtime services: it wires config → store →
//! services and prints results. No game rules live here.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use game_content::{CatalogLoader, ConfigLoader, SiteConfig, builtin_catalog};
use game_core::{LegendId, OwnerId, PcgRng, ShotOutcome, TargetZone};
use runtime::{
    CardImageService, CollectionService, HttpImageService, JsonFileStore, KeyValueStore,
    PenaltyService, PlaceholderImageService, RevealOutcome, SystemClock,
    services::DEFAULT_OWNER,
};

#[derive(Parser)]
#[command(name = "club", about = "FC club minigames: Panini album and penalty shootout")]
struct Cli {
    /// Site configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory override for persisted snapshots.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Fixed base seed for all random draws.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Generate sticker images through the local AI proxy instead of
    /// placeholder URLs.
    #[arg(long, global = true)]
    http_images: bool,

    /// Whose album/team to operate on.
    #[arg(long, global = true, default_value = DEFAULT_OWNER)]
    owner: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the owner's album progress and inventory.
    Album,
    /// Open today's pack of three stickers.
    OpenPack,
    /// List every collection and its completion.
    Collections,
    /// Offer a duplicate for a card you lack.
    Trade {
        /// Owner to trade with.
        #[arg(long)]
        target: String,
        /// Legend id of the duplicate you give away.
        #[arg(long)]
        offer: u32,
        /// Legend id of the card you want.
        #[arg(long)]
        want: u32,
    },
    /// Show the owner's team sheet.
    Team,
    /// Put a collected card on a team slot.
    TeamSet {
        #[arg(long)]
        slot: String,
        #[arg(long)]
        legend: u32,
    },
    /// Empty a team slot.
    TeamClear {
        #[arg(long)]
        slot: String,
    },
    /// Play a penalty run, one zone per shot
    /// (top-left, mid-left, center, mid-right, top-right).
    Penalty {
        #[arg(long = "aim", required = true)]
        aims: Vec<String>,
    },
    /// Show the penalty high score and leaderboard.
    Records,
    /// Set the name shown on future leaderboard entries.
    SetName { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => SiteConfig::default(),
    };

    let data_dir = cli
        .data_dir
        .clone()
        .or(config.storage.data_dir.clone())
        .or_else(JsonFileStore::default_data_dir)
        .context("no data directory available; pass --data-dir")?;
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(data_dir)?);

    let catalog = match &config.game.catalog {
        Some(path) => CatalogLoader::load(path)?,
        None => builtin_catalog(),
    };

    let seed = cli.seed.or(config.game.seed).unwrap_or_else(rand::random);
    let images: Arc<dyn CardImageService> = if cli.http_images {
        Arc::new(HttpImageService::new(
            config.image_service.base_url.clone(),
            Duration::from_secs(config.image_service.timeout_secs),
        )?)
    } else {
        Arc::new(PlaceholderImageService)
    };

    let collections = CollectionService::new(
        Arc::new(catalog),
        store.clone(),
        images,
        Arc::new(SystemClock),
        Arc::new(PcgRng),
        seed,
    );
    let penalty = PenaltyService::new(store, Arc::new(PcgRng), seed);
    let owner = OwnerId::new(cli.owner.clone());

    match cli.command {
        Command::Album => show_album(&collections, &owner)?,
        Command::OpenPack => open_pack(&collections, &owner).await?,
        Command::Collections => show_collections(&collections)?,
        Command::Trade {
            target,
            offer,
            want,
        } => {
            let receipt = collections.trade(
                &owner,
                &OwnerId::new(target),
                LegendId(offer),
                LegendId(want),
            )?;
            println!(
                "Échange réussi ! Vous avez obtenu {} contre {}.",
                receipt.received.legend.name, receipt.offered.legend.name
            );
        }
        Command::Team => show_team(&collections, &owner)?,
        Command::TeamSet { slot, legend } => {
            collections.assign_team_slot(&owner, &slot, LegendId(legend))?;
            show_team(&collections, &owner)?;
        }
        Command::TeamClear { slot } => {
            collections.clear_team_slot(&owner, &slot)?;
            show_team(&collections, &owner)?;
        }
        Command::Penalty { aims } => play_penalty(&penalty, &aims)?,
        Command::Records => show_records(&penalty)?,
        Command::SetName { name } => {
            let records = penalty.set_player_name(&name)?;
            println!("Pseudo enregistré : {}", records.player_name);
        }
    }
    Ok(())
}

fn show_album(collections: &CollectionService, owner: &OwnerId) -> anyhow::Result<()> {
    let collection = collections.collection(owner)?;
    println!(
        "Album de {owner} — {}/{} ({:.1}%)",
        collection.filled_count(),
        collection.slots.len(),
        collection.completion_percentage()
    );
    for entry in collection.inventory_counts() {
        let marker = if entry.count > 1 {
            format!(" x{}", entry.count)
        } else {
            String::new()
        };
        println!("  {} {}{}", entry.card.id(), entry.card.legend.name, marker);
    }
    Ok(())
}

async fn open_pack(collections: &CollectionService, owner: &OwnerId) -> anyhow::Result<()> {
    match collections.open_daily_pack(owner).await? {
        RevealOutcome::Opened(cards) => {
            println!("Pack du jour :");
            for card in cards {
                println!("  {} {} ({})", card.id(), card.legend.name, card.legend.country);
            }
        }
        RevealOutcome::AlreadyRevealed => println!("Revenez demain !"),
        RevealOutcome::CollectionComplete => {
            println!("Félicitations ! Votre collection est complète !");
        }
    }
    Ok(())
}

fn show_collections(collections: &CollectionService) -> anyhow::Result<()> {
    let all = collections.all_collections()?;
    for owner in all.owners() {
        if let Some(collection) = all.get(owner) {
            println!(
                "{owner}: {}/{} ({:.1}%)",
                collection.filled_count(),
                collection.slots.len(),
                collection.completion_percentage()
            );
        }
    }
    Ok(())
}

fn show_team(collections: &CollectionService, owner: &OwnerId) -> anyhow::Result<()> {
    let sheet = collections.team(owner)?;
    println!("Équipe type de {owner} :");
    for slot in &sheet.slots {
        let name = slot
            .card
            .as_ref()
            .map(|card| card.legend.name.as_str())
            .unwrap_or("—");
        let bench = if slot.is_bench() { " (banc)" } else { "" };
        println!("  {:<5} {:<14} {name}{bench}", slot.id, slot.label);
    }
    Ok(())
}

fn play_penalty(penalty: &PenaltyService, aims: &[String]) -> anyhow::Result<()> {
    let mut game = penalty.new_game();
    game.begin()?;

    for aim in aims {
        let zone = TargetZone::from_str(aim)
            .map_err(|_| anyhow::anyhow!("unknown target zone {aim:?}"))?;
        let report = penalty.shoot(&mut game, zone)?;
        println!(
            "Tir vers {} — le gardien plonge vers {} : {}",
            report.target,
            report.keeper,
            match report.outcome {
                ShotOutcome::Goal => "BUT !",
                ShotOutcome::Saved => "ARRÊTÉ !",
            }
        );
        match report.outcome {
            ShotOutcome::Goal => game.next_round()?,
            ShotOutcome::Saved => {
                println!("Score final : {}", report.streak);
                break;
            }
        }
    }
    if game.streak() > 0 {
        println!("Série en cours : {}", game.streak());
    }
    show_records(penalty)
}

fn show_records(penalty: &PenaltyService) -> anyhow::Result<()> {
    let records = penalty.records()?;
    println!("Record personnel : {}", records.high_score);
    if records.leaderboard.is_empty() {
        println!("Aucun score pour le moment.");
    } else {
        for (rank, entry) in records.leaderboard.iter().enumerate() {
            println!("#{} {} — {}", rank + 1, entry.name, entry.score);
        }
    }
    Ok(())
}
