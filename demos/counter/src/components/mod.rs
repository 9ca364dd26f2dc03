pub mod counter;
pub mod help_bar;
pub mod step;

// Re-export core Component trait
pub use slomux::Component;

pub use counter::Counter;
pub use help_bar::HelpBar;
pub use step::Step;
