//! Model classes of the hbnb object model.
//!
//! Every class is a plain field declaration on top of the shared entity base
//! (`hbnb_core::Base`); behaviour lives in `hbnb_core::Model`.

pub mod amenity;
pub mod base_model;
pub mod city;
pub mod place;
pub mod registry;
pub mod review;
pub mod state;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use amenity::Amenity;
pub use base_model::BaseModel;
pub use city::City;
pub use place::Place;
pub use registry::{ClassRegistry, Constructor, create_from_dict, registry};
pub use review::Review;
pub use state::State;
pub use user::User;
