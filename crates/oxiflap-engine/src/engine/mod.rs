//! The evaluation loop and the seams around it.
//!
//! A caller supplies controllers and an [`ObstacleGenerator`], threads a
//! [`Session`] through successive [`Generation`]s, and optionally watches each
//! tick through a [`FrameObserver`].

pub use self::{controller::*, course::*, generation::*, session::*, snapshot::*};

mod controller;
mod course;
mod generation;
mod session;
mod snapshot;
