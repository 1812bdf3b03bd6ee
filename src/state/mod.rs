pub mod capt;
pub mod cooldown;
pub mod registration;
pub mod roster;
pub mod sheet;
pub mod store;

pub use capt::{CaptDraft, CaptManager, CaptSession};
pub use cooldown::{CooldownDecision, CooldownGate};
pub use registration::{Registration, RegistrationManager};
pub use roster::Roster;
pub use sheet::SheetManager;
pub use store::{MessageLocation, SessionId, SessionStore};
