//! Concrete controllers for flapping avatars.
//!
//! Both implement [`oxiflap_engine::Controller`]:
//!
//! - [`network`] - a small fully connected network whose flattened weights are
//!   evolved by `oxiflap-training` ([`network::NetworkController`]).
//! - [`scripted`] - a hand-written gap follower ([`scripted::ScriptedController`]),
//!   useful as a baseline and for replays without a trained model.
//!
//! # Observation
//!
//! Controllers see three numbers per tick: the avatar's height and its
//! absolute distances to the top and bottom edges of the nearest obstacle's
//! gap. The flap decision is the first output exceeding 0.5.

pub mod network;
pub mod scripted;
