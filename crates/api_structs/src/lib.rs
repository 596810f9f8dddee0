mod event;
mod invitation;
mod status;

pub mod dtos {
    pub use crate::event::dtos::*;
}

pub use crate::event::api::*;
pub use crate::invitation::api::*;
pub use crate::status::api::*;
