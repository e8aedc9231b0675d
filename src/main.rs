//! plex-organize - sort and upgrade the items of your media playlists

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use plex_organize::config::{Paths, UserConfig};
use plex_organize::core::sorting::{KeySpec, SortMode, SortOrder};
use plex_organize::core::upgrade::{UpgradeOptions, UpgradePlan};
use plex_organize::core::{AlbumLib, PlaylistLib, QualityPolicy, SortLib, UpgradeLib};
use plex_organize::library::{JsonLibrary, Library};
use plex_organize::models::{MediaType, Playlist};
use plex_organize::prompt::{choose_one, Chooser, TerminalChooser};
use plex_organize::utils::dates::playlist_length;
use plex_organize::utils::tracks::total_duration_ms;
use plex_organize::Error;

/// plex-organize - sort and upgrade your media playlists
#[derive(Parser, Debug)]
#[command(name = "plex-organize")]
#[command(version)]
#[command(about = "Sort, upgrade and analyze the playlists of your media library")]
struct Args {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Path to config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Library file to organize (overrides the configured one)
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Interactive menu when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the playlists that can be organized
    Playlists,

    /// Sort a playlist
    Sort {
        /// Playlist id or title
        #[arg(long)]
        playlist: Option<String>,

        /// Sort key (title, sort-title, artist, album-artist, album, year,
        /// release-date, duration or shuffle); asks when omitted
        #[arg(long)]
        key: Option<String>,

        #[arg(long)]
        descending: bool,

        /// Create a sorted copy instead of modifying the playlist
        #[arg(long)]
        duplicate: bool,
    },

    /// Replace low quality tracks of an audio playlist with better versions
    Upgrade {
        /// Playlist id or title
        #[arg(long)]
        playlist: Option<String>,

        /// Automatically select the best version available
        #[arg(long)]
        simple: bool,

        /// Only show what would be replaced
        #[arg(long)]
        dry_run: bool,

        /// Upgrade a copy instead of modifying the playlist
        #[arg(long)]
        duplicate: bool,
    },

    /// Find all music albums with low bitrate
    LowBitrate,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(log_level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let paths = Paths::init(args.config)?;
    info!("Config directory: {:?}", paths.config_dir());

    let config = UserConfig::load(&paths)?;
    let policy = config.quality_policy();
    let library_path = args.library.unwrap_or_else(|| config.library_path(&paths));

    let mut library = JsonLibrary::open(&library_path)
        .with_context(|| format!("Failed to open library {:?}", library_path))?;
    let mut chooser = TerminalChooser::stdio();

    let result = match args.command {
        Some(Command::Playlists) => list_playlists(&library),
        Some(Command::Sort {
            playlist,
            key,
            descending,
            duplicate,
        }) => sort(
            &mut library,
            &mut chooser,
            playlist,
            key,
            descending,
            Some(duplicate),
        ),
        Some(Command::Upgrade {
            playlist,
            simple,
            dry_run,
            duplicate,
        }) => upgrade(
            &mut library,
            &mut chooser,
            &policy,
            playlist,
            Some(UpgradeOptions {
                simple,
                dry_run,
                duplicate,
            }),
        ),
        Some(Command::LowBitrate) => low_bitrate(&library, &policy),
        None => interactive(&mut library, &mut chooser, &policy),
    };

    match result {
        Err(Error::Aborted) => {
            info!("Aborted, no further changes are made");
            Ok(())
        }
        other => other.context("Organizing failed"),
    }
}

fn interactive(
    library: &mut dyn Library,
    chooser: &mut dyn Chooser,
    policy: &QualityPolicy,
) -> plex_organize::Result<()> {
    let actions = [
        "Sort playlists (audio & video)".to_string(),
        "Upgrade playlists (audio only)".to_string(),
        "Find all music albums with low bitrate (audio only)".to_string(),
    ];

    loop {
        match choose_one(chooser, "What do you want to organize?", &actions)? {
            0 => sort(library, chooser, None, None, false, None)?,
            1 => upgrade(library, chooser, policy, None, None)?,
            _ => low_bitrate(library, policy)?,
        }

        if !chooser.confirm("Do you want to organize another playlist?", true)? {
            return Ok(());
        }
    }
}

fn select_playlist(
    library: &dyn Library,
    chooser: &mut dyn Chooser,
    name: Option<String>,
    types: &[MediaType],
    prompt: &str,
) -> plex_organize::Result<Playlist> {
    if let Some(name) = name {
        let playlist = library.find_playlist(&name)?;
        return match PlaylistLib::organizable(vec![playlist], types).pop() {
            Some(playlist) => Ok(playlist),
            None => Err(Error::Library(format!(
                "playlist \"{}\" is a smart playlist or of the wrong type",
                name
            ))),
        };
    }

    let mut playlists = PlaylistLib::organizable(library.playlists()?, types);
    if playlists.is_empty() {
        return Err(Error::Library("no playlists to organize".to_string()));
    }

    let titles: Vec<String> = playlists.iter().map(|p| p.title.clone()).collect();
    let index = choose_one(chooser, prompt, &titles)?;
    Ok(playlists.swap_remove(index))
}

fn choose_sorting_method(
    chooser: &mut dyn Chooser,
    media_type: MediaType,
) -> plex_organize::Result<KeySpec> {
    let presets = SortLib::presets(media_type);
    let names: Vec<String> = presets.iter().map(|p| p.name.to_string()).collect();

    let prompt = format!("Select the sorting key for this {} playlist", media_type);
    let preset = presets[choose_one(chooser, &prompt, &names)?];
    if preset.spec.mode == SortMode::Shuffle {
        return Ok(preset.spec);
    }

    let directions = ["Sort ascending".to_string(), "Sort descending".to_string()];
    let prompt = format!("Select the sorting direction for {}", preset.name);
    let order = match choose_one(chooser, &prompt, &directions)? {
        0 => SortOrder::Ascending,
        _ => SortOrder::Descending,
    };

    Ok(preset.spec.with_order(order))
}

fn sort(
    library: &mut dyn Library,
    chooser: &mut dyn Chooser,
    playlist: Option<String>,
    key: Option<String>,
    descending: bool,
    duplicate: Option<bool>,
) -> plex_organize::Result<()> {
    let playlist = select_playlist(
        library,
        chooser,
        playlist,
        &[MediaType::Audio, MediaType::Video],
        "Select a playlist to sort",
    )?;

    let spec = match key {
        Some(key) => {
            let spec = SortLib::parse_sort(&key, playlist.playlist_type)?;
            if descending {
                spec.descending()
            } else {
                spec
            }
        }
        None => choose_sorting_method(chooser, playlist.playlist_type)?,
    };

    let duplicate = match duplicate {
        Some(duplicate) => duplicate,
        None => chooser.confirm(
            "Do you want to create a duplicated playlist instead of modifying the selected one?",
            false,
        )?,
    };

    PlaylistLib::sort_playlist(library, &playlist, &spec, duplicate)?;
    Ok(())
}

fn upgrade(
    library: &mut dyn Library,
    chooser: &mut dyn Chooser,
    policy: &QualityPolicy,
    playlist: Option<String>,
    options: Option<UpgradeOptions>,
) -> plex_organize::Result<()> {
    let playlist = select_playlist(
        library,
        chooser,
        playlist,
        &[MediaType::Audio],
        "Select a playlist to upgrade",
    )?;

    let options = match options {
        Some(options) => options,
        None => {
            let dry_run = chooser.confirm(
                "Do you want to perform a dry run instead of actually modifying anything?",
                false,
            )?;
            let simple = dry_run
                || chooser.confirm(
                    "Do you want to enable the simple replacement mode \
                     (The best version available will automatically be selected)?",
                    false,
                )?;
            let duplicate = !dry_run
                && chooser.confirm(
                    "Do you want to create a duplicated playlist instead of modifying the selected one?",
                    false,
                )?;
            UpgradeOptions {
                simple,
                dry_run,
                duplicate,
            }
        }
    };

    let plan = UpgradeLib::run(library, &playlist, policy, options, chooser)?;
    print_plan(&plan, options.dry_run);
    Ok(())
}

fn print_plan(plan: &UpgradePlan, dry_run: bool) {
    let (removed, added) = if dry_run {
        ("would be removed", "would be added")
    } else {
        ("were removed", "were added")
    };

    if !plan.to_remove.is_empty() {
        println!("The following tracks {}:", removed);
        for item in &plan.to_remove {
            println!("❌ {}", item);
        }
        println!();
    }

    if !plan.to_add.is_empty() {
        println!("The following tracks {}:", added);
        for item in &plan.to_add {
            println!("🆕 {}", item);
        }
        println!();
    }

    if !plan.omitted.is_empty() {
        println!("The following tracks couldn't be upgraded:");
        for item in &plan.omitted {
            println!("❔ {}", item);
        }
        println!();
    }
}

fn low_bitrate(library: &dyn Library, policy: &QualityPolicy) -> plex_organize::Result<()> {
    info!("Album search in progress. This may take a while depending on the size of your music library.");

    for album in AlbumLib::find_low_quality(&library.albums()?, policy) {
        println!("❌ {} must be upgraded.", album);
    }

    Ok(())
}

fn list_playlists(library: &dyn Library) -> plex_organize::Result<()> {
    let playlists =
        PlaylistLib::organizable(library.playlists()?, &[MediaType::Audio, MediaType::Video]);

    for playlist in playlists {
        println!(
            "{}\t{} [{}] {} items, {}",
            playlist.id,
            playlist.title,
            playlist.playlist_type,
            playlist.items.len(),
            playlist_length(total_duration_ms(&playlist.items))
        );
    }

    Ok(())
}
