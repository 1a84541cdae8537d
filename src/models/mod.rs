pub mod advisory;
pub mod crop;
pub mod diagnosis;
pub mod language;
pub mod motor;
pub mod sensor;
pub mod weather;

pub use advisory::*;
pub use crop::*;
pub use diagnosis::*;
pub use language::*;
pub use motor::*;
pub use sensor::*;
pub use weather::*;
