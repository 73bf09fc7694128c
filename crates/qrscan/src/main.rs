//! `qrscan` - CLI for the QR code scanner
//!
//! This binary drives the screen controllers from the command line: scanning
//! image files, browsing and editing the history, generating codes, and
//! managing the simulated session, profile and preferences.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::Parser;

use qrscan::cli::{
    Cli, Command, CompareCommand, ConfigCommand, GenerateCommand, ListCommand, LoginCommand,
    PrefsCommand, ProfileCommand, ScanCommand, ShowCommand,
};
use qrscan::screens::{
    self, CompareScreen, DetailScreen, FavoritesScreen, GenerateScreen, HistoryScreen,
    LoginScreen, LoginMode, Mounted, Notice, PreferencesScreen, ProfileScreen, Redirect,
    Screen, ScannerScreen, SettingsScreen, Slot, StatisticsScreen,
};
use qrscan::{
    init_logging, Config, ImageFileDevice, Payload, PreferenceStore, QrDecoder, QrEncoder,
    ScanRecord, Session, Statistics, Storage, SystemClipboard, SystemOpener,
};

/// Width of the statistics bars, in characters.
const BAR_WIDTH: usize = 24;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Configuration commands never touch the database
    let command = match cli.command {
        Command::Config(config_cmd) => return handle_config(&config, config_cmd),
        command => command,
    };

    let storage = Storage::open(config.database_path()).with_context(|| {
        format!(
            "cannot open scan database at {}",
            config.database_path().display()
        )
    })?;

    match command {
        Command::Scan(cmd) => handle_scan(&storage, cmd),
        Command::History(cmd) => handle_history(&storage, &cmd),
        Command::Favorites(cmd) => handle_favorites(&storage, &cmd),
        Command::Show(cmd) => handle_show(&storage, &cmd),
        Command::Favorite(cmd) => {
            let mut screen = FavoritesScreen::new(&storage);
            screen.mount()?;
            report(&screen.toggle_favorite(&cmd.id))
        }
        Command::Rename(cmd) => {
            let mut screen = DetailScreen::new(&storage);
            mount_detail(&storage, &mut screen, &cmd.id)?;
            report(&screen.rename(&cmd.title))
        }
        Command::Copy(cmd) => {
            let mut screen = DetailScreen::new(&storage);
            mount_detail(&storage, &mut screen, &cmd.id)?;
            report(&screen.copy_content(&SystemClipboard))
        }
        Command::Delete(cmd) => {
            let mut screen = HistoryScreen::new(&storage);
            screen.mount()?;
            report(&screen.delete(&cmd.id))
        }
        Command::Clear(cmd) => {
            if !cmd.yes {
                println!("This will delete your entire scan history.");
                println!("Use --yes to confirm.");
                return Ok(());
            }
            let mut screen = SettingsScreen::new(&storage);
            screen.mount()?;
            report(&screen.clear_history())
        }
        Command::Compare(cmd) => handle_compare(&storage, &cmd),
        Command::Stats(cmd) => handle_stats(&storage, &config, cmd.json),
        Command::Generate(cmd) => handle_generate(&config, cmd),
        Command::Login(cmd) => handle_login(&storage, cmd),
        Command::Signup(cmd) => {
            let mut screen = LoginScreen::new(&storage);
            screen.mode = LoginMode::SignUp;
            screen.email = cmd.email;
            screen.password = cmd.password;
            let (notice, _) = screen.submit();
            report(&notice)
        }
        Command::Logout => {
            Session::new(&storage).sign_out()?;
            println!("Signed out");
            Ok(())
        }
        Command::Whoami(cmd) => handle_whoami(&storage, cmd.json),
        Command::Profile(cmd) => handle_profile(&storage, cmd),
        Command::Prefs(cmd) => handle_prefs(&storage, cmd),
        Command::Status(cmd) => handle_status(&storage, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Print an info notice, or fail with an error notice.
fn report(notice: &Notice) -> anyhow::Result<()> {
    if notice.is_error() {
        bail!("{notice}");
    }
    println!("{notice}");
    Ok(())
}

/// Fail with a readable message when a screen redirects instead of mounting.
fn require_ready(mounted: Mounted) -> anyhow::Result<()> {
    match mounted {
        Mounted::Ready => Ok(()),
        Mounted::Redirect {
            notice: Some(notice),
            ..
        } => bail!("{notice}"),
        Mounted::Redirect {
            to: Redirect::Login,
            ..
        } => bail!("you must be signed in; run `qrscan login` first"),
        Mounted::Redirect { to, .. } => bail!("cannot show this screen (redirected to {to:?})"),
    }
}

fn mount_detail(
    storage: &Storage,
    screen: &mut DetailScreen<'_, Storage>,
    id: &str,
) -> anyhow::Result<()> {
    let session = Session::new(storage);
    require_ready(screens::guard(&Screen::Detail(id.to_string()), &session)?)?;
    require_ready(screen.mount(id)?)
}

fn handle_scan(storage: &Storage, cmd: ScanCommand) -> anyhow::Result<()> {
    let device = ImageFileDevice::new(cmd.images);
    let mut screen = ScannerScreen::new(storage, QrDecoder::new(), device);

    if cmd.torch {
        if let Some(notice) = screen.toggle_flashlight() {
            eprintln!("{notice}");
        }
    }

    for notice in screen.pump() {
        if notice.is_error() {
            eprintln!("{notice}");
        } else {
            println!("{notice}");
        }
    }

    let Some(record) = screen.result() else {
        bail!("no QR code found in the given images");
    };
    print_record(record);

    if cmd.open {
        report(&screen.open_link(&SystemOpener))?;
    }
    Ok(())
}

fn handle_history(storage: &Storage, cmd: &ListCommand) -> anyhow::Result<()> {
    let mut screen = HistoryScreen::new(storage);
    screen.mount()?;
    if let Some(term) = &cmd.search {
        screen.set_search(term.as_str());
    }
    print_records(&screen.visible(), cmd.json)
}

fn handle_favorites(storage: &Storage, cmd: &ListCommand) -> anyhow::Result<()> {
    let mut screen = FavoritesScreen::new(storage);
    screen.mount()?;
    if let Some(term) = &cmd.search {
        screen.set_search(term.as_str());
    }
    print_records(&screen.visible(), cmd.json)
}

fn handle_show(storage: &Storage, cmd: &ShowCommand) -> anyhow::Result<()> {
    let mut screen = DetailScreen::new(storage);
    mount_detail(storage, &mut screen, &cmd.id)?;
    let record = screen
        .record()
        .context("scan disappeared while loading")?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print_record(record);
    }

    if cmd.open {
        report(&screen.open_link(&SystemOpener))?;
    }
    Ok(())
}

fn handle_compare(storage: &Storage, cmd: &CompareCommand) -> anyhow::Result<()> {
    let mut screen = CompareScreen::new(storage);
    screen.mount()?;
    for (slot, id) in [(Slot::A, &cmd.first), (Slot::B, &cmd.second)] {
        if let Some(notice) = screen.select(slot, id) {
            bail!("{notice}");
        }
    }

    for slot in [Slot::A, Slot::B] {
        if let Some(record) = screen.selected(slot) {
            println!("{slot:?}: [{}] {} - {}", record.kind.label(), record.title, record.content);
        }
    }

    match screen.differences() {
        Some(differences) if differences.is_empty() => println!("The scans are identical."),
        Some(differences) => {
            for difference in differences {
                println!("- {difference}");
            }
        }
        None => println!("Select two scans to compare."),
    }
    Ok(())
}

fn handle_stats(storage: &Storage, config: &Config, json: bool) -> anyhow::Result<()> {
    let mut screen = StatisticsScreen::new(storage)
        .with_windows(config.recent_window(), config.stats.chart_days);
    let stats = screen.mount()?;

    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        print_stats(stats, config.stats.recent_window_days);
    }
    Ok(())
}

fn handle_generate(config: &Config, cmd: GenerateCommand) -> anyhow::Result<()> {
    let mut options = config.encode_options()?;
    if let Some(width) = cmd.width {
        options.width = width;
    }
    let payload = Payload::from(cmd.kind);

    let Some(output) = cmd.output else {
        let rendered = QrEncoder::new().render_terminal(&payload.to_content())?;
        print!("{rendered}");
        io::stdout().flush()?;
        return Ok(());
    };

    let mut screen = GenerateScreen::new(QrEncoder::new(), options);
    report(&screen.generate(payload))?;
    let (notice, _) = screen.save(&output);
    report(&notice)
}

fn handle_login(storage: &Storage, cmd: LoginCommand) -> anyhow::Result<()> {
    let mut screen = LoginScreen::new(storage);
    if let Mounted::Redirect { .. } = screen.mount()? {
        println!("Already signed in.");
        return Ok(());
    }

    let (notice, _) = if cmd.google {
        screen.google_sign_in()
    } else {
        screen.email = cmd.email.unwrap_or_default();
        screen.password = cmd.password.unwrap_or_default();
        screen.submit()
    };
    report(&notice)
}

fn handle_whoami(storage: &Storage, json: bool) -> anyhow::Result<()> {
    let user = Session::new(storage).current_user()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    match user {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            if let Some(image) = user.image {
                println!("Avatar: {image}");
            }
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

fn handle_profile(storage: &Storage, cmd: ProfileCommand) -> anyhow::Result<()> {
    let mut screen = ProfileScreen::new(storage);
    require_ready(screen.mount()?)?;

    match cmd {
        ProfileCommand::Show { json } => {
            if json {
                let profile = qrscan::ProfileStore::new(storage).get()?;
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("Username:   {}", or_dash(&screen.form.username));
                println!("Full name:  {}", or_dash(&screen.form.full_name));
                println!("Avatar URL: {}", or_dash(&screen.form.avatar_url));
                if let Some(user) = screen.user() {
                    println!("Shown as:   {}", user.name);
                }
            }
            Ok(())
        }
        ProfileCommand::Set {
            username,
            full_name,
            avatar_url,
        } => {
            if let Some(username) = username {
                screen.form.username = username;
            }
            if let Some(full_name) = full_name {
                screen.form.full_name = full_name;
            }
            if let Some(avatar_url) = avatar_url {
                screen.form.avatar_url = avatar_url;
            }
            report(&screen.save())
        }
    }
}

fn handle_prefs(storage: &Storage, cmd: PrefsCommand) -> anyhow::Result<()> {
    match cmd {
        PrefsCommand::Show { json } => {
            let prefs = PreferenceStore::new(storage).load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&prefs)?);
            } else {
                let (from, to) = prefs.accent.gradient();
                println!("Theme:           {}", prefs.theme);
                println!("Accent:          {} ({from} -> {to})", prefs.accent);
                println!("Scanner size:    {}", prefs.scanner_size);
                println!("Haptic feedback: {}", prefs.haptic_feedback);
                println!("Sound effects:   {}", prefs.sound_effects);
            }
            Ok(())
        }
        PrefsCommand::Set {
            theme,
            accent,
            scanner_size,
            haptic_feedback,
            sound_effects,
        } => {
            let mut screen = PreferencesScreen::new(storage);
            screen.mount()?;
            if let Some(theme) = theme {
                screen.set_theme(theme.into());
            }
            if let Some(accent) = accent {
                screen.set_accent(accent.into());
            }
            if let Some(size) = scanner_size {
                screen.set_scanner_size(size);
            }
            if haptic_feedback.is_some_and(|on| on != screen.draft().haptic_feedback) {
                screen.toggle_haptic_feedback();
            }
            if sound_effects.is_some_and(|on| on != screen.draft().sound_effects) {
                screen.toggle_sound_effects();
            }
            report(&screen.save())
        }
        PrefsCommand::ToggleTheme => {
            let mut screen = SettingsScreen::new(storage);
            screen.mount()?;
            report(&screen.toggle_theme())
        }
    }
}

fn handle_status(storage: &Storage, json: bool) -> anyhow::Result<()> {
    let stats = storage.stats()?;
    let signed_in = Session::new(storage).is_authenticated()?;

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "entries": stats.entries,
            "last_write": stats.last_write,
            "db_size_bytes": stats.db_size_bytes,
            "signed_in": signed_in,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("qrscan status");
        println!("-------------");
        println!("Database:      {}", storage.path().display());
        println!("Keys stored:   {}", stats.entries);
        println!("Size:          {} bytes", stats.db_size_bytes);
        match stats.last_write {
            Some(at) => println!("Last write:    {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
            None => println!("Last write:    never"),
        }
        println!("Signed in:     {}", if signed_in { "yes" } else { "no" });
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Encoder]");
                println!("  Width:              {}", config.encoder.width);
                println!("  Margin:             {}", config.encoder.margin);
                println!("  Dark colour:        {}", config.encoder.dark_color);
                println!("  Light colour:       {}", config.encoder.light_color);
                println!();
                println!("[Stats]");
                println!(
                    "  Recent window:      {} days",
                    config.stats.recent_window_days
                );
                println!("  Chart days:         {}", config.stats.chart_days);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn print_record(record: &ScanRecord) {
    println!("ID:       {}", record.id);
    println!("Title:    {}", record.title);
    println!("Type:     {}", record.kind.label());
    println!(
        "Scanned:  {}",
        record
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
    );
    println!("Favorite: {}", if record.favorite { "yes" } else { "no" });
    println!("Content:");
    println!("{}", record.content);
}

fn print_records(records: &[ScanRecord], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No scans.");
        return Ok(());
    }

    for record in records {
        let first_line = record.content.lines().next().unwrap_or_default();
        let preview: String = first_line.chars().take(48).collect();
        println!(
            "{}  {}  {:<8} {} {}  {}",
            record.id,
            record
                .created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M"),
            record.kind.label(),
            if record.favorite { "*" } else { " " },
            record.title,
            preview
        );
    }
    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn print_stats(stats: &Statistics, recent_window_days: u32) {
    println!("Total scans:  {}", stats.total);
    println!("Favorites:    {}", stats.favorites);
    println!(
        "Active days:  {} (last {recent_window_days} days)",
        stats.recent_days
    );
    println!();

    println!("By type");
    for (kind, count) in &stats.by_kind {
        let filled = (stats.kind_share(*kind) * BAR_WIDTH as f64).round() as usize;
        println!(
            "  {:<9} {:<width$} {count}",
            kind.label(),
            "#".repeat(filled),
            width = BAR_WIDTH
        );
    }
    println!();

    println!("Daily activity");
    let max = stats.daily_max();
    for day in &stats.daily {
        let filled = day.count * BAR_WIDTH / max;
        println!(
            "  {} {:<width$} {}",
            day.date.format("%a %d"),
            "#".repeat(filled),
            day.count,
            width = BAR_WIDTH
        );
    }
}
