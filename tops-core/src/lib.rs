pub mod api;
pub mod db;
pub mod resources;
pub mod util;

pub mod entities {
    pub use tops_entities::{comment::*, time::*, user::*};
}

#[cfg(test)]
mod tests;
