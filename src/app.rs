use crate::logic::{AdvisoryEngine, CropAdvisoryRequest, FieldSummary};
use crate::models::{AdvisoryMessage, Crop, DiseaseDiagnosis, GrowthStage, Language};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Assistant,
    Disease,
    CropAdvisory,
    About,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Assistant),
            '3' => Some(Screen::Disease),
            '4' => Some(Screen::CropAdvisory),
            '5' => Some(Screen::About),
            _ => None,
        }
    }
}

/// Work the main loop should perform before the next draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Refresh,
    ToggleMotor,
    SpeakAdvisory,
    Ask,
    SpeakAnswer,
    Diagnose,
    CropAdvisory,
    SpeakCropAdvisory,
}

pub struct DashboardState {
    pub language: Language,
    /// Whether a Blynk relay is configured; the motor key is ignored otherwise.
    pub motor_configured: bool,
}

impl DashboardState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            motor_configured: false,
        }
    }
}

pub struct AssistantState {
    pub question: String,
    pub language: Language,
    pub answer: Option<String>,
    pub error: Option<String>,
}

impl AssistantState {
    pub fn new(language: Language) -> Self {
        Self {
            question: String::new(),
            language,
            answer: None,
            error: None,
        }
    }

    pub fn cycle_language(&mut self) {
        self.language = self.language.next();
    }
}

pub struct DiseaseState {
    pub image_path: String,
    pub diagnosis: Option<DiseaseDiagnosis>,
    pub error: Option<String>,
}

impl DiseaseState {
    pub fn new() -> Self {
        Self {
            image_path: String::new(),
            diagnosis: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropField {
    Crop,
    Stage,
    Location,
    Language,
    Image,
}

impl CropField {
    pub fn next(&self) -> Self {
        match self {
            CropField::Crop => CropField::Stage,
            CropField::Stage => CropField::Location,
            CropField::Location => CropField::Language,
            CropField::Language => CropField::Image,
            CropField::Image => CropField::Crop,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            CropField::Crop => CropField::Image,
            CropField::Stage => CropField::Crop,
            CropField::Location => CropField::Stage,
            CropField::Language => CropField::Location,
            CropField::Image => CropField::Language,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, CropField::Location | CropField::Image)
    }
}

pub struct CropAdvisoryState {
    pub focused_field: CropField,
    pub crop: Crop,
    pub stage: GrowthStage,
    pub location: String,
    pub language: Language,
    pub image_path: String,
    pub answer: Option<String>,
    pub error: Option<String>,
}

impl CropAdvisoryState {
    pub fn new(language: Language) -> Self {
        Self {
            focused_field: CropField::Crop,
            crop: Crop::default(),
            stage: GrowthStage::default(),
            location: String::new(),
            language,
            image_path: String::new(),
            answer: None,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    /// Advance the focused selector; text fields are left alone.
    pub fn cycle_selection(&mut self) {
        match self.focused_field {
            CropField::Crop => self.crop = self.crop.next(),
            CropField::Stage => self.stage = self.stage.next(),
            CropField::Language => self.language = self.language.next(),
            CropField::Location | CropField::Image => {}
        }
    }

    pub fn cycle_selection_back(&mut self) {
        match self.focused_field {
            CropField::Crop => self.crop = self.crop.prev(),
            CropField::Stage => self.stage = self.stage.prev(),
            CropField::Language => self.language = self.language.prev(),
            CropField::Location | CropField::Image => {}
        }
    }

    pub fn edit_buffer(&mut self) -> Option<&mut String> {
        match self.focused_field {
            CropField::Location => Some(&mut self.location),
            CropField::Image => Some(&mut self.image_path),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<PathBuf> {
        let trimmed = self.image_path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    pub fn request(&self) -> CropAdvisoryRequest {
        CropAdvisoryRequest {
            crop: self.crop,
            stage: self.stage,
            location: self.location.clone(),
            language: self.language,
            has_image: self.image().is_some(),
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,

    // Data
    pub summary: FieldSummary,
    pub advisory: Option<AdvisoryMessage>,

    // Screen states
    pub dashboard_state: DashboardState,
    pub assistant_state: AssistantState,
    pub disease_state: DiseaseState,
    pub crop_state: CropAdvisoryState,

    // Services
    pub advisory_engine: AdvisoryEngine,

    // UI state
    pub status_message: Option<String>,
    pub busy: bool,
    pub pending: Option<PendingAction>,
}

impl App {
    pub fn new(language: Language) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            summary: FieldSummary::default(),
            advisory: None,
            dashboard_state: DashboardState::new(language),
            assistant_state: AssistantState::new(language),
            disease_state: DiseaseState::new(),
            crop_state: CropAdvisoryState::new(language),
            advisory_engine: AdvisoryEngine::new(),
            status_message: None,
            busy: false,
            pending: None,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn request(&mut self, action: PendingAction, status: &str) {
        self.pending = Some(action);
        self.set_status(status);
    }

    pub fn request_refresh(&mut self) {
        self.request(PendingAction::Refresh, "Refreshing data...");
    }

    /// True while keystrokes belong to a text field rather than navigation.
    pub fn is_typing(&self) -> bool {
        match self.screen {
            Screen::Assistant | Screen::Disease => true,
            Screen::CropAdvisory => self.crop_state.focused_field.is_text(),
            Screen::Dashboard | Screen::About => false,
        }
    }

    pub fn cycle_dashboard_language(&mut self) {
        self.dashboard_state.language = self.dashboard_state.language.next();
        self.evaluate_advisory();
    }

    pub fn update_summary(&mut self, summary: FieldSummary) {
        self.summary = summary;
        self.evaluate_advisory();
    }

    pub fn evaluate_advisory(&mut self) {
        self.advisory = self.summary.snapshot.as_ref().map(|snapshot| {
            self.advisory_engine.generate(
                snapshot,
                self.summary.weather.as_ref(),
                self.dashboard_state.language,
            )
        });
        if let Some(ref advisory) = self.advisory {
            tracing::debug!(bands = ?advisory.bands(), "Advisory regenerated");
        }
    }
}
