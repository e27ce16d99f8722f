// Application layer - Use case interactors

pub mod container;
pub mod trim_interactor;

// Re-export interactors
pub use container::DefaultAppContainer;
pub use trim_interactor::TrimInteractor;
