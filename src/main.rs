mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use anyhow::Context;
use app::{App, PendingAction, Screen};
use clap::Parser;
use cli::{Cli, Commands, MotorAction};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::SpeechClip;
use logic::{AdvisoryCatalog, AdvisoryEngine, CropAdvisoryRequest, DataSyncService};
use models::{Crop, GrowthStage, Language, MotorState};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{
    AboutScreen, AssistantScreen, CropAdvisoryScreen, DashboardScreen, DiseaseScreen,
};

const LOG_FILE: &str = "smartfarm.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let data_dir = Config::data_dir(cli.data_dir.as_ref())?;
    init_logging(cli.verbose, &data_dir, cli.command.is_none())?;

    if matches!(cli.command, Some(Commands::Init)) {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = if Config::exists(cli.config.as_ref()) {
        Config::load(cli.config.as_ref())?
    } else {
        println!("No configuration found.");
        let (config, _) = Config::setup_interactive()?;
        config
    };

    AdvisoryCatalog::validate().context("advice catalog is inconsistent")?;

    let data_sync = DataSyncService::new(config, data_dir);
    let language = data_sync.default_language();

    match cli.command {
        None => run_tui(data_sync, language).await,
        Some(Commands::Init) => Ok(()),
        Some(Commands::Check) => run_check(&data_sync).await,
        Some(Commands::Advise { lang, speak }) => {
            let language = resolve_language(lang.as_deref(), language)?;
            run_advise(&data_sync, language, speak).await
        }
        Some(Commands::Motor { action }) => run_motor(&data_sync, action).await,
        Some(Commands::Ask {
            question,
            lang,
            speak,
        }) => {
            let language = resolve_language(lang.as_deref(), language)?;
            let answer = data_sync.ask(&question, language).await?;
            println!("{}", answer);
            if speak {
                let path = data_sync
                    .speak(&answer, language, SpeechClip::AssistantAnswer)
                    .await?;
                println!("Audio saved to {}", path.display());
            }
            Ok(())
        }
        Some(Commands::Diagnose { image }) => {
            let diagnosis = data_sync.diagnose(&image).await?;
            println!("Disease:     {}", diagnosis.name);
            println!("Description: {}", diagnosis.description);
            println!("Treatment:   {}", diagnosis.treatment);
            Ok(())
        }
        Some(Commands::CropAdvisory {
            crop,
            stage,
            location,
            lang,
            image,
            speak,
        }) => {
            let language = resolve_language(lang.as_deref(), language)?;
            if let Some(ref path) = image {
                if !path.exists() {
                    anyhow::bail!("image {} does not exist", path.display());
                }
            }
            let request = CropAdvisoryRequest {
                crop: Crop::parse(&crop)?,
                stage: GrowthStage::parse(&stage)?,
                location,
                language,
                has_image: image.is_some(),
            };
            let answer = data_sync.crop_advisory(&request).await?;
            println!("{}", answer);
            if speak {
                let path = data_sync
                    .speak(&answer, language, SpeechClip::CropAdvisory)
                    .await?;
                println!("Audio saved to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Logs go to a file while the TUI owns the terminal, otherwise to stderr.
fn init_logging(verbose: u8, data_dir: &Path, tui: bool) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tui {
        let path = data_dir.join(LOG_FILE);
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn resolve_language(requested: Option<&str>, default: Language) -> error::Result<Language> {
    requested.map(Language::parse).unwrap_or(Ok(default))
}

async fn run_check(data_sync: &DataSyncService) -> anyhow::Result<()> {
    println!("Configuration OK");
    println!("Data directory: {}", data_sync.data_dir().display());

    let status = data_sync.check_connections().await;
    let label = |ok: bool| if ok { "OK" } else { "OFFLINE" };
    let optional = |state: Option<bool>| state.map(label).unwrap_or("not configured");

    println!("  ThingSpeak:     {}", label(status.thingspeak));
    println!("  Ollama:         {}", label(status.ollama));
    println!("  OpenWeatherMap: {}", optional(status.openweathermap));
    println!("  Blynk:          {}", optional(status.blynk));

    if !status.core_connected() {
        anyhow::bail!("sensor feed is unreachable");
    }
    if status.all_connected() {
        println!("All configured services are reachable");
    } else {
        println!("Some services are offline; related features will fail");
    }
    Ok(())
}

async fn run_advise(
    data_sync: &DataSyncService,
    language: Language,
    speak: bool,
) -> anyhow::Result<()> {
    let snapshot = data_sync
        .latest_snapshot()
        .await
        .context("no usable sensor reading")?;
    let weather = data_sync.fetch_weather().await;

    let advisory = AdvisoryEngine::new().generate(&snapshot, weather.as_ref(), language);
    println!("{}", advisory);

    if speak {
        let path = data_sync
            .speak(&advisory.to_text(), language, SpeechClip::FarmerAdvice)
            .await?;
        println!("Audio saved to {}", path.display());
    }
    Ok(())
}

async fn run_motor(data_sync: &DataSyncService, action: MotorAction) -> anyhow::Result<()> {
    let state = match action {
        MotorAction::Status => data_sync.motor_status().await?,
        MotorAction::On => data_sync.set_motor(MotorState::On).await?,
        MotorAction::Off => data_sync.set_motor(MotorState::Off).await?,
        MotorAction::Toggle => data_sync.toggle_motor().await?,
    };
    println!("Motor is {}", state);
    Ok(())
}

async fn run_tui(data_sync: DataSyncService, language: Language) -> anyhow::Result<()> {
    let mut app = App::new(language);
    app.dashboard_state.motor_configured = data_sync.has_motor();

    let status = data_sync.check_connections().await;
    let summary = data_sync.refresh(false).await;
    app.update_summary(summary);

    let mut status_parts = vec![if status.thingspeak {
        "ThingSpeak: OK"
    } else {
        "ThingSpeak: OFFLINE"
    }];
    if let Some(ok) = status.openweathermap {
        status_parts.push(if ok { "Weather: OK" } else { "Weather: OFFLINE" });
    }
    if let Some(ok) = status.blynk {
        status_parts.push(if ok { "Motor: OK" } else { "Motor: OFFLINE" });
    }
    app.set_status(&status_parts.join(" | "));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &data_sync).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    data_sync: &DataSyncService,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        // Handle input with timeout for async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if let Some(action) = app.pending.take() {
            app.busy = true;
            terminal.draw(|f| draw(f, app))?;
            perform(app, data_sync, action).await;
            app.busy = false;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    match app.screen {
        Screen::Dashboard => {
            let screen = DashboardScreen::new(
                &app.summary,
                app.advisory.as_ref(),
                app.dashboard_state.language,
            )
            .with_status(app.status_message.as_deref())
            .motor_configured(app.dashboard_state.motor_configured)
            .busy(app.busy);
            f.render_widget(screen, area);
        }
        Screen::Assistant => {
            f.render_widget(AssistantScreen::new(&app.assistant_state).busy(app.busy), area)
        }
        Screen::Disease => {
            f.render_widget(DiseaseScreen::new(&app.disease_state).busy(app.busy), area)
        }
        Screen::CropAdvisory => {
            f.render_widget(CropAdvisoryScreen::new(&app.crop_state).busy(app.busy), area)
        }
        Screen::About => f.render_widget(AboutScreen, area),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Esc => app.switch_screen(Screen::Dashboard),
        KeyCode::Char('q') if !app.is_typing() => app.quit(),
        KeyCode::Char(c) if !app.is_typing() => {
            if let Some(screen) = Screen::from_key(c) {
                app.switch_screen(screen);
            } else {
                handle_screen_input(app, key);
            }
        }
        _ => handle_screen_input(app, key),
    }
}

fn handle_screen_input(app: &mut App, key: KeyEvent) {
    match app.screen {
        Screen::Dashboard => handle_dashboard_input(app, key.code),
        Screen::Assistant => handle_assistant_input(app, key),
        Screen::Disease => handle_disease_input(app, key),
        Screen::CropAdvisory => handle_crop_input(app, key),
        Screen::About => {}
    }
}

fn handle_dashboard_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('l') => app.cycle_dashboard_language(),
        KeyCode::Char('m') => {
            if app.dashboard_state.motor_configured {
                app.request(PendingAction::ToggleMotor, "Switching motor...");
            } else {
                app.set_status("Motor not configured (set blynk.token)");
            }
        }
        KeyCode::Char('p') => {
            if app.advisory.is_some() {
                app.request(PendingAction::SpeakAdvisory, "Preparing audio...");
            } else {
                app.set_status("No advice to speak yet");
            }
        }
        _ => {}
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Apply a keystroke to a text field. Returns true when it was consumed.
fn edit_text(buffer: &mut String, key: &KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Char(c) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

fn handle_assistant_input(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 's') {
        if app.assistant_state.answer.is_some() {
            app.request(PendingAction::SpeakAnswer, "Preparing audio...");
        }
        return;
    }
    if edit_text(&mut app.assistant_state.question, &key) {
        return;
    }
    match key.code {
        KeyCode::Tab => app.assistant_state.cycle_language(),
        KeyCode::Enter => app.request(PendingAction::Ask, "Asking the assistant..."),
        _ => {}
    }
}

fn handle_disease_input(app: &mut App, key: KeyEvent) {
    if edit_text(&mut app.disease_state.image_path, &key) {
        return;
    }
    if key.code == KeyCode::Enter {
        app.request(PendingAction::Diagnose, "Analyzing image...");
    }
}

fn handle_crop_input(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 's') {
        if app.crop_state.answer.is_some() {
            app.request(PendingAction::SpeakCropAdvisory, "Preparing audio...");
        }
        return;
    }
    if let Some(buffer) = app.crop_state.edit_buffer() {
        if edit_text(buffer, &key) {
            return;
        }
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.crop_state.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.crop_state.prev_field(),
        KeyCode::Right | KeyCode::Char(' ') => app.crop_state.cycle_selection(),
        KeyCode::Left => app.crop_state.cycle_selection_back(),
        KeyCode::Enter => app.request(PendingAction::CropAdvisory, "Requesting advice..."),
        _ => {}
    }
}

async fn perform(app: &mut App, data_sync: &DataSyncService, action: PendingAction) {
    match action {
        PendingAction::Refresh => {
            let summary = data_sync.refresh(true).await;
            let message = match summary.sensor_error {
                Some(ref e) => format!("Refresh failed: {}", e),
                None => "Data refreshed".to_string(),
            };
            app.update_summary(summary);
            app.set_status(&message);
        }
        PendingAction::ToggleMotor => match data_sync.toggle_motor().await {
            Ok(state) => {
                app.summary.motor = Some(state);
                app.set_status(&format!("Motor turned {}", state));
            }
            Err(e) => app.set_status(&format!("Motor control failed: {}", e)),
        },
        PendingAction::SpeakAdvisory => {
            let language = app.dashboard_state.language;
            let text = app.advisory.as_ref().map(|a| a.to_text()).unwrap_or_default();
            speak(app, data_sync, &text, language, SpeechClip::FarmerAdvice).await;
        }
        PendingAction::Ask => {
            let state = &mut app.assistant_state;
            match data_sync.ask(&state.question, state.language).await {
                Ok(answer) => {
                    state.answer = Some(answer);
                    state.error = None;
                    app.set_status("Answer ready");
                }
                Err(e) => {
                    tracing::warn!("Assistant request failed: {}", e);
                    state.error = Some(e.to_string());
                    app.set_status("Assistant request failed");
                }
            }
        }
        PendingAction::SpeakAnswer => {
            let language = app.assistant_state.language;
            let text = app.assistant_state.answer.clone().unwrap_or_default();
            speak(app, data_sync, &text, language, SpeechClip::AssistantAnswer).await;
        }
        PendingAction::Diagnose => {
            let path = PathBuf::from(app.disease_state.image_path.trim());
            let state = &mut app.disease_state;
            match data_sync.diagnose(&path).await {
                Ok(diagnosis) => {
                    state.diagnosis = Some(diagnosis);
                    state.error = None;
                }
                Err(e) => {
                    tracing::warn!("Diagnosis failed: {}", e);
                    state.diagnosis = None;
                    state.error = Some(e.to_string());
                }
            }
        }
        PendingAction::CropAdvisory => {
            let state = &mut app.crop_state;
            let missing_image = state.image().filter(|p| !p.exists());
            let result = match missing_image {
                Some(path) => Err(error::FarmError::NotFound(format!(
                    "image {} does not exist",
                    path.display()
                ))),
                None => data_sync.crop_advisory(&state.request()).await,
            };
            match result {
                Ok(answer) => {
                    state.answer = Some(answer);
                    state.error = None;
                }
                Err(e) => {
                    tracing::warn!("Crop advisory failed: {}", e);
                    state.error = Some(e.to_string());
                }
            }
        }
        PendingAction::SpeakCropAdvisory => {
            let language = app.crop_state.language;
            let text = app.crop_state.answer.clone().unwrap_or_default();
            speak(app, data_sync, &text, language, SpeechClip::CropAdvisory).await;
        }
    }
}

async fn speak(
    app: &mut App,
    data_sync: &DataSyncService,
    text: &str,
    language: Language,
    clip: SpeechClip,
) {
    match data_sync.speak(text, language, clip).await {
        Ok(path) => app.set_status(&format!("Audio saved to {}", path.display())),
        Err(e) => app.set_status(&format!("Speech failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app::CropField;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn digits_switch_tabs_outside_text_fields() {
        let mut app = App::new(Language::English);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.screen, Screen::CropAdvisory);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.screen, Screen::Assistant);

        // Now typing: digits and q belong to the question.
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.screen, Screen::Assistant);
        assert_eq!(app.assistant_state.question, "5q");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Dashboard);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = App::new(Language::English);
        app.switch_screen(Screen::Disease);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn dashboard_keys_queue_actions() {
        let mut app = App::new(Language::English);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.pending, Some(PendingAction::Refresh));

        app.pending = None;
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.pending, None);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Motor not configured (set blynk.token)")
        );

        app.dashboard_state.motor_configured = true;
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.pending, Some(PendingAction::ToggleMotor));

        app.pending = None;
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.pending, None);

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.dashboard_state.language, Language::Hindi);
    }

    #[test]
    fn assistant_tab_cycles_language() {
        let mut app = App::new(Language::English);
        app.switch_screen(Screen::Assistant);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.assistant_state.language, Language::Marathi);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.pending, Some(PendingAction::Ask));
    }

    #[test]
    fn crop_form_navigation() {
        let mut app = App::new(Language::English);
        app.switch_screen(Screen::CropAdvisory);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.crop_state.crop, Crop::Rice);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.crop_state.crop, Crop::Other);
        press(&mut app, KeyCode::Right);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.crop_state.focused_field, CropField::Location);
        for c in "Pune".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.crop_state.location, "Pun");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.pending, Some(PendingAction::CropAdvisory));
    }

    #[test]
    fn resolve_language_prefers_flag() {
        assert_eq!(
            resolve_language(Some("mr-IN"), Language::English).unwrap(),
            Language::Marathi
        );
        assert_eq!(resolve_language(None, Language::Hindi).unwrap(), Language::Hindi);
        assert!(resolve_language(Some("fr"), Language::English).is_err());
    }
}
