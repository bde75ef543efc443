pub mod show;

pub use show::{NewShow, Show};
