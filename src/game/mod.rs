//! Game-side collaborators of the matcher: enemies, the frame loop, scripted players.

pub mod enemy;
pub mod script;
pub mod session;

pub use enemy::{Enemy, EnemyRoster};
pub use script::MimicScript;
pub use session::DisguiseSession;
