pub mod presenter;
pub mod prompts;
pub mod spinner;

pub use presenter::TerminalPresenter;
pub use spinner::Spinner;
