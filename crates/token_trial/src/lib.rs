//! Runs token board trials: translates participant gestures into interactions
//! and matches them against a compiled rule until the rule is satisfied.

pub mod board;
pub mod controller;
pub mod error;
pub mod evidence;
pub mod logger;
pub mod matcher;
pub mod relation;
pub mod script;
pub mod session;

pub use board::{BoardControl, BoardLayout, Gesture};
pub use controller::{Notification, TokenControl, TokenController, TokenModel};
pub use error::{ScriptError, TrialError};
pub use matcher::{Matcher, Offer, Outcome, TrialResult};
pub use session::{Ack, TrialConfig, TrialHandle, TrialSession};
