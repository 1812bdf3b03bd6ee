pub mod bot;
pub mod green;
pub mod roles;

pub use bot::BotConfig;
pub use green::GreenConfig;
pub use roles::RoleConfig;
