pub mod gauge;
pub mod input;
pub mod nav;

pub use gauge::{air_quality_gauge, humidity_gauge, moisture_gauge, temperature_gauge};
pub use input::{InputWidget, SelectWidget};
pub use nav::NavBar;
