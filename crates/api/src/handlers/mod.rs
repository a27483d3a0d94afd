pub mod assets;
pub mod checks;
pub mod notifications;
pub mod violations;
