/// Path resolution relative to the configuration prefix.
pub mod paths;

pub use paths::{expand_tilde, full_name, make_absolute};
