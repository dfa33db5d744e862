pub mod controller;
pub mod idle;
pub mod outcome;
pub mod pan;
pub mod recenter;
pub mod zoom;

pub use controller::GestureController;
pub use outcome::ConvergenceOutcome;
pub use recenter::{choose_coarse_zoom, RecenterPhase, RecenterReport};
