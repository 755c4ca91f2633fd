mod multi_progress;
mod progress_style;
mod single_flight;

pub use multi_progress::{run_progress, MultiProgressNew};
pub use progress_style::ProgressStyleTemplate;
pub use single_flight::SingleFlight;
