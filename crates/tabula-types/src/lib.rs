pub mod database;
pub mod error;
pub mod ids;
pub mod item;
pub mod property;
pub mod value;
pub mod view;

pub use database::*;
pub use error::{Error, Result};
pub use ids::*;
pub use item::*;
pub use property::*;
pub use value::*;
pub use view::*;
