//! wjview - Wabbajack Modlist Viewer
//!
//! Command-line front end: list the mods in a modlist, search them, and show
//! what each one downloads and installs.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wjview::catalogue::{format_thousands, Catalogue, ModRow};
use wjview::config::{ViewerConfig, DEFAULT_BROWSER};
use wjview::games::GameType;
use wjview::modlist::{Directory, TreeNode};
use wjview::session::{LoadedModlist, Session};

#[derive(Parser)]
#[command(name = "wjview")]
#[command(version)]
#[command(about = "Browse a Wabbajack modlist without installing it")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (use RUST_LOG=debug for more detail)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a Wabbajack modlist
    Info {
        /// Path to the .wabbajack file
        wabbajack_file: PathBuf,
    },

    /// List the mods in a modlist
    List {
        /// Path to the .wabbajack file
        wabbajack_file: PathBuf,

        /// Only show mods whose name, author or filename contain this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show details and download links for one mod
    Show {
        /// Path to the .wabbajack file
        wabbajack_file: PathBuf,

        /// Mod number (as shown by `list`) or archive hash
        #[arg(value_name = "MOD")]
        selector: String,
    },

    /// Show the files one mod installs, as a directory tree
    Files {
        /// Path to the .wabbajack file
        wabbajack_file: PathBuf,

        /// Mod number (as shown by `list`) or archive hash
        #[arg(value_name = "MOD")]
        selector: String,
    },

    /// Open a mod's download page in the browser
    Open {
        /// Path to the .wabbajack file
        wabbajack_file: PathBuf,

        /// Mod number (as shown by `list`) or archive hash
        #[arg(value_name = "MOD")]
        selector: String,

        /// Open the mod page instead of the file download page
        #[arg(long)]
        page: bool,

        /// Browser command to open links with
        #[arg(long, env = "WJVIEW_BROWSER", default_value = DEFAULT_BROWSER)]
        browser: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Only initialize logging if verbose or RUST_LOG is set
    if cli.verbose || std::env::var("RUST_LOG").is_ok() {
        let directive = if cli.verbose {
            "wjview=debug"
        } else {
            "wjview=warn"
        };
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
            .init();
    }

    let mut session = Session::new();

    match cli.command {
        Commands::Info { wabbajack_file } => {
            let loaded = load(&mut session, &ViewerConfig::new(wabbajack_file))?;
            print_info(loaded);
        }

        Commands::List { wabbajack_file, search } => {
            let loaded = load(&mut session, &ViewerConfig::new(wabbajack_file))?;
            let catalogue = loaded.catalogue();
            let total = loaded.manifest.archives.len();

            let rows = match search.as_deref() {
                Some(query) => catalogue.search(query),
                None => catalogue.rows(),
            };
            for row in &rows {
                println!("{}", row);
            }
            println!("\nShowing {} of {} mods", rows.len(), total);
        }

        Commands::Show { wabbajack_file, selector } => {
            let loaded = load(&mut session, &ViewerConfig::new(wabbajack_file))?;
            let catalogue = loaded.catalogue();
            let row = select(&catalogue, &selector)?;
            println!("{}", catalogue.overview(row));
        }

        Commands::Files { wabbajack_file, selector } => {
            let loaded = load(&mut session, &ViewerConfig::new(wabbajack_file))?;
            let catalogue = loaded.catalogue();
            let row = select(&catalogue, &selector)?;
            let tree = catalogue.file_tree(row);

            println!("{}\n", row);
            if tree.is_empty() {
                println!("No file details available for this mod.");
            } else {
                print_directory(tree.root(), 0);
                println!(
                    "\n{} files, {} bytes",
                    tree.file_count(),
                    format_thousands(tree.total_size())
                );
            }
        }

        Commands::Open {
            wabbajack_file,
            selector,
            page,
            browser,
        } => {
            let config = ViewerConfig::new(wabbajack_file).with_browser(browser);
            let loaded = load(&mut session, &config)?;
            let catalogue = loaded.catalogue();
            let row = select(&catalogue, &selector)?;
            let links = catalogue.overview(row).links;

            if !links.is_available() {
                bail!("No download link available for '{}'", row.archive.display_name());
            }
            let Some(url) = links.open_target(page) else {
                bail!("'{}' has no mod page, only a direct download", row.archive.display_name());
            };

            println!("Opening {}", url);
            config
                .open_url(url)
                .with_context(|| format!("Failed to run browser command '{}'", config.browser))?;
        }
    }

    Ok(())
}

/// Validate the config and load its modlist into the session
fn load<'s>(session: &'s mut Session, config: &ViewerConfig) -> Result<&'s LoadedModlist> {
    config.validate()?;
    session
        .load(&config.wabbajack_path)
        .with_context(|| {
            format!(
                "Failed to load Wabbajack file {}",
                config.wabbajack_path.display()
            )
        })
}

fn select<'a>(catalogue: &Catalogue<'a>, selector: &str) -> Result<ModRow<'a>> {
    catalogue.select(selector).with_context(|| {
        format!(
            "No mod matches '{}' (use a number from `list` or an archive hash)",
            selector
        )
    })
}

fn print_info(loaded: &LoadedModlist) {
    let manifest = &loaded.manifest;
    let index = &loaded.index;
    let catalogue = loaded.catalogue();

    let game = match GameType::from_wabbajack_name(&manifest.game_type) {
        Some(game) => format!("{} ({})", game, manifest.game_type),
        None => manifest.game_type.clone(),
    };

    println!("=== Modlist Information ===");
    println!("Name:              {}", manifest.name);
    println!("Author:            {}", manifest.author);
    println!("Version:           {}", manifest.version);
    println!("Game:              {}", game);
    println!("Wabbajack Version: {}", manifest.wabbajack_version);
    println!("NSFW:              {}", if manifest.is_nsfw { "Yes" } else { "No" });
    if !manifest.website.is_empty() {
        println!("Website:           {}", manifest.website);
    }
    if !manifest.description.is_empty() {
        println!("Description:       {}", manifest.description);
    }
    println!();
    println!("Total Mods:        {}", manifest.archives.len());
    println!("Mods with files:   {}", index.mod_details.len());
    println!("Files from mods:   {}", index.from_archive_count());
    println!("Directives:        {}", manifest.directives.len());
    if !index.malformed.is_empty() {
        println!("Skipped:           {} malformed directives", index.malformed.len());
    }

    println!("\n=== Directives by Type ===");
    for (dtype, count) in catalogue.directive_counts() {
        println!("{:>8}  {}", count, dtype);
    }

    println!("\n=== Download Sources ===");
    for (source, count) in catalogue.source_counts() {
        println!("{:>8}  {}", count, source);
    }

    let total_size = manifest
        .archives
        .iter()
        .fold(0u64, |total, a| total.saturating_add(a.size));
    println!("\nTotal size:  {:.2} GB", total_size as f64 / 1024.0 / 1024.0 / 1024.0);
}

fn print_directory(dir: &Directory, depth: usize) {
    let indent = "  ".repeat(depth);
    for node in dir.sorted_children() {
        match node {
            TreeNode::Directory(child) => {
                println!("{}{}/", indent, child.name);
                print_directory(child, depth + 1);
            }
            TreeNode::File(file) => {
                println!(
                    "{}{}  <- {} ({} bytes)",
                    indent,
                    file.name,
                    file.source_path,
                    format_thousands(file.size)
                );
            }
        }
    }
}
