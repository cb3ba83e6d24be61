pub mod accumulator;
pub mod clock;
pub mod engine;
pub mod presenter;
pub mod scheduler;
pub mod window;

mod error;

pub use accumulator::Accumulator;
pub use clock::{Clock, SystemClock};
pub use engine::{Generation, IntentShift, SummaryEngine};
pub use error::{Error, Result};
pub use presenter::{LogPresenter, Presenter, TerminalPresenter};
pub use scheduler::{Scheduler, Trigger};
pub use window::WindowStore;
