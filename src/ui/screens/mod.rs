pub mod about;
pub mod assistant;
pub mod crop_advisory;
pub mod dashboard;
pub mod disease;

pub use about::AboutScreen;
pub use assistant::AssistantScreen;
pub use crop_advisory::CropAdvisoryScreen;
pub use dashboard::DashboardScreen;
pub use disease::DiseaseScreen;
