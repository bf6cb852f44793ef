pub use self::controller_model::*;

mod controller_model;
