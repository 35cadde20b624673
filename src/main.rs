use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use podbrowse::{
    Config, DetailController, DirectoryClient, FileFavorites, ListController, ListEvent,
    ListReporter, NoopReporter, PodcastListItem, ReqwestClient, SharedFavorites,
    SharedListReporter,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static STAR: Emoji<'_, '_> = Emoji("⭐ ", "[*] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");

type Controller = ListController<DirectoryClient<ReqwestClient>>;

/// Browse the best podcasts directory and manage favorites
#[derive(Parser, Debug)]
#[command(name = "podbrowse")]
#[command(about = "Browse the best podcasts directory and manage favorites")]
#[command(version)]
struct Args {
    /// Directory endpoint serving the best podcasts listing
    #[arg(long, env = "PODBROWSE_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Listen Notes API key
    #[arg(long, env = "LISTEN_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Path of the favorites file
    #[arg(long, env = "PODBROWSE_FAVORITES", global = true)]
    favorites: Option<PathBuf>,

    /// Quiet mode - suppress loading indicators
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll through the listing page by page
    Browse {
        /// Stop after this many pages
        #[arg(short, long, default_value = "3")]
        pages: u32,

        /// How many times to retry after a failed page
        #[arg(short, long, default_value = "1")]
        retries: u32,
    },

    /// Toggle the favorite status of a podcast from the listing
    Toggle {
        /// Directory id of the podcast
        id: String,

        /// Give up after searching this many pages
        #[arg(short, long, default_value = "10")]
        pages: u32,
    },

    /// List favorited podcast ids
    Favorites,
}

/// Shows a spinner while a page request is outstanding
struct SpinnerReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl SpinnerReporter {
    fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn finish(&self) {
        if let Some(spinner) = self.spinner.lock().unwrap().take() {
            spinner.finish_and_clear();
        }
    }
}

impl ListReporter for SpinnerReporter {
    fn report(&self, event: ListEvent) {
        match event {
            ListEvent::PageLoadStarted { page } => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {wide_msg}")
                        .unwrap(),
                );
                spinner.enable_steady_tick(Duration::from_millis(100));
                spinner.set_message(format!(
                    "{SEARCH}Loading page {}",
                    page.to_string().cyan()
                ));
                *self.spinner.lock().unwrap() = Some(spinner);
            }

            ListEvent::PageLoaded { .. } | ListEvent::PageLoadFailed { .. } => self.finish(),

            ListEvent::FavoritesReconciled { .. } => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::resolve(args.endpoint.as_deref(), args.api_key, args.favorites)
        .context("Invalid configuration")?;

    let favorites = Arc::new(
        FileFavorites::open(&config.favorites_path).context("Failed to open favorites")?,
    );

    if let Command::Favorites = args.command {
        print_favorites(&favorites);
        return Ok(());
    }

    println!(
        "\n{}{} {}\n",
        MICROPHONE,
        "podbrowse".bold().magenta(),
        "- Best Podcasts".dimmed()
    );

    let reporter: SharedListReporter = if args.quiet {
        NoopReporter::shared()
    } else {
        Arc::new(SpinnerReporter::new())
    };

    let store: SharedFavorites = favorites.clone();
    let catalog = DirectoryClient::new(ReqwestClient::new(), config.endpoint, config.api_key);
    let controller = ListController::new(catalog, store.clone()).with_reporter(reporter);

    match args.command {
        Command::Browse { pages, retries } => browse(&controller, pages, retries).await,
        Command::Toggle { id, pages } => toggle(&controller, store, &id, pages).await,
        Command::Favorites => Ok(()),
    }
}

async fn browse(controller: &Controller, pages: u32, retries: u32) -> Result<()> {
    let mut retries_left = retries;
    let mut shown = 0;

    controller.on_appear().await;

    loop {
        if let Some(alert) = controller.pending_alert() {
            println!(
                "\n{FAILURE}{} - {}",
                alert.title().red().bold(),
                alert.message().dimmed()
            );
            if retries_left == 0 {
                controller.dismiss_alert();
                break;
            }
            retries_left -= 1;
            controller.retry().await;
            continue;
        }

        let state = controller.state();
        let items = state.items();
        if items.len() == shown {
            break;
        }

        for (index, item) in items.iter().enumerate().skip(shown) {
            print_item(index, item);
        }
        let previously_shown = shown;
        shown = items.len();

        if controller.last_loaded_page() >= pages || !controller.has_more_pages() {
            break;
        }

        for index in previously_shown..shown {
            controller.on_item_appear(index).await;
        }
    }

    if shown == 0 {
        bail!("No podcasts could be loaded");
    }

    println!(
        "\n{HEADPHONES}{} podcasts from {} page(s)",
        shown.to_string().green().bold(),
        controller.last_loaded_page().to_string().cyan()
    );
    Ok(())
}

async fn toggle(
    controller: &Controller,
    favorites: SharedFavorites,
    id: &str,
    pages: u32,
) -> Result<()> {
    controller.on_appear().await;

    let item = loop {
        let state = controller.state();
        if let Some(item) = state.items().iter().find(|item| item.id() == id) {
            break item.clone();
        }

        if let Some(alert) = controller.dismiss_alert() {
            bail!("{} - {}", alert.title(), alert.message());
        }
        if !controller.has_more_pages() || controller.last_loaded_page() >= pages {
            bail!("Podcast {id} not found in the first {pages} page(s)");
        }

        let last = state.items().len().saturating_sub(1);
        controller.on_item_appear(last).await;
    };

    let mut detail = DetailController::new(item, favorites);
    detail.toggle_favorite();
    print_detail(detail.podcast());
    Ok(())
}

fn print_item(index: usize, item: &PodcastListItem) {
    let marker = if item.is_favorite {
        STAR.to_string()
    } else {
        "   ".to_string()
    };
    println!(
        "{:>4}. {}{} {}",
        (index + 1).to_string().cyan(),
        marker,
        item.podcast.title.bold(),
        format!("by {}", item.podcast.publisher).dimmed()
    );
}

fn print_detail(item: &PodcastListItem) {
    let podcast = &item.podcast;
    println!("{}", podcast.title.bold().green());
    println!("{}", podcast.publisher.dimmed());
    println!(
        "{} episodes • {} • {}",
        podcast.total_episodes.to_string().cyan(),
        podcast.language,
        podcast.country
    );
    if let Some(published) = podcast.latest_published {
        println!("Latest episode: {}", published.format("%Y-%m-%d"));
    }
    if let Some(thumbnail) = &podcast.thumbnail {
        println!("{}", thumbnail.as_str().dimmed());
    }
    println!("\n{}\n", podcast.plain_description());
    if item.is_favorite {
        println!("{STAR}{}", "Favorited".yellow().bold());
    } else {
        println!("{}", "Not a favorite".dimmed());
    }
}

fn print_favorites(favorites: &FileFavorites) {
    let ids = favorites.ids();
    if ids.is_empty() {
        println!("No favorites yet");
    } else {
        for id in ids {
            println!("{STAR}{id}");
        }
    }
    println!(
        "\n{FOLDER}Stored in: {}",
        favorites.path().display().to_string().cyan()
    );
}
