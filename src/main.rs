use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wishlist::{Clock, ErrorCode, FileStorage, SystemClock, WishlistConfig, WishlistError, WishlistStore};

#[derive(Parser, Debug)]
#[command(name = "wishlist", about = "Save products for 24 hours")]
struct Cli {
    /// Directory holding the storage slot files.
    #[arg(long, env = "WISHLIST_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Name of the storage slot.
    #[arg(long, env = "WISHLIST_STORAGE_KEY")]
    storage_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save a product (replaces an existing entry for the same product).
    Add {
        product_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove a product.
    Remove { product_id: String },
    /// List saved products, newest first.
    List,
    /// Exit 0 if the product is saved, 1 otherwise.
    Check { product_id: String },
    /// Drop expired entries from storage.
    Cleanup,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = WishlistConfig::from_env();
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.storage_key {
        config.storage_key = key;
    }

    let mut store = WishlistStore::open_file(&config);
    match run(&mut store, cli.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "command failed");
            eprintln!("error [{}]: {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}

fn run(store: &mut WishlistStore<FileStorage>, command: Command) -> Result<ExitCode, WishlistError> {
    match command {
        Command::Add { product_id, name, price, image } => {
            let item = store.try_add(&product_id, &name, price, &image)?;
            println!("saved {} until {}", item.product_id, item.expires_at.to_rfc3339());
        }
        Command::Remove { product_id } => {
            let removed = store.try_remove(&product_id)?;
            println!("removed {removed} entr{}", if removed == 1 { "y" } else { "ies" });
        }
        Command::List => {
            let now = SystemClock.now();
            if store.is_empty() {
                println!("wishlist is empty");
            }
            for item in store.items() {
                println!(
                    "{}\t{}\t{:.2}\t{}\t{}",
                    item.product_id,
                    item.product_name,
                    item.product_price,
                    item.format_remaining(now),
                    item.product_image
                );
            }
        }
        Command::Check { product_id } => {
            let saved = store.is_in_wishlist(&product_id);
            println!("{}", if saved { "saved" } else { "not saved" });
            if !saved {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Cleanup => {
            let dropped = store.try_cleanup_expired()?;
            println!("dropped {dropped} expired entr{}", if dropped == 1 { "y" } else { "ies" });
        }
    }
    Ok(ExitCode::SUCCESS)
}
