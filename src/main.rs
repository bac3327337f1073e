use anyhow::Result;
use clap::{Parser, Subcommand};

use addonhub::audit::EXCLUDED_FIELDS;
use addonhub::cli::{handle_addon_command, handle_audit_command, AddonCommands, AuditCommands};
use addonhub::config::{paths::AddonHubPaths, settings::Settings};
use addonhub::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "addonhub",
    version,
    about = "Add-on catalog administration with a change audit trail",
    long_about = "AddonHub manages a categorized catalog of downloadable game add-ons. \
                  Team members can create, edit and delete add-ons; every change is \
                  recorded in an audit log with a field-level diff."
)]
struct Cli {
    /// Acting user id (defaults to the configured actor)
    #[arg(long, global = true, env = "ADDONHUB_USER_ID")]
    user_id: Option<String>,

    /// Acting user display name
    #[arg(long, global = true, env = "ADDONHUB_USERNAME")]
    username: Option<String>,

    /// Acting user avatar
    #[arg(long, global = true)]
    avatar: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add-on catalog commands
    #[command(subcommand)]
    Addon(AddonCommands),

    /// Audit log commands
    #[command(subcommand)]
    Audit(AuditCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    // Initialize paths and settings
    let paths = AddonHubPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let actor = settings.resolve_actor(cli.user_id, cli.username, cli.avatar);

    // Initialize storage
    let mut storage = Storage::new(paths.clone(), &settings)?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Addon(cmd)) => {
            handle_addon_command(&storage, &actor, cmd)?;
        }
        Some(Commands::Audit(cmd)) => {
            handle_audit_command(&storage, &actor, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing AddonHub at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Add team members to 'team_member_ids' in {}", paths.settings_file().display());
            println!("Run 'addonhub addon categories' to see the catalog layout.");
        }
        Some(Commands::Config) => {
            println!("AddonHub Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Catalog file:    {}", paths.addons_file().display());
            println!(
                "Initialized:     {}",
                if storage.is_initialized() { "yes" } else { "no (run 'addonhub init')" }
            );
            println!("Add-ons:         {}", storage.addons.count()?);
            println!();
            println!("Audit:");
            println!("  Backend:          {}", settings.audit.backend);
            println!("  Store:            {}", storage.audit.store().describe());
            println!("  Entries:          {}", storage.audit.store().len()?);
            println!("  Retention cap:    {}", settings.audit.retention_cap);
            println!("  Page size:        {}", settings.audit.default_page_size);
            println!("  Record no-ops:    {}", settings.audit.record_empty_updates);
            println!("  Excluded fields:  {}", EXCLUDED_FIELDS.join(", "));
            println!();
            println!("Acting user:");
            if actor.user_id.is_empty() {
                println!("  (none; pass --user-id)");
            } else {
                println!("  {} ({})", actor.username, actor.user_id);
                println!("  Add-ons team:     {}", if actor.is_addons_team { "yes" } else { "no" });
            }
        }
        None => {
            println!("AddonHub - add-on catalog administration");
            println!();
            println!("Run 'addonhub --help' for usage information.");
        }
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ADDONHUB_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
