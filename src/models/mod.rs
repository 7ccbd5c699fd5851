pub mod records;
pub mod wire;
pub mod timestamps;
pub mod translation;


pub use records::*;
pub use wire::*;
pub use translation::{symptoms_from_wire, symptoms_to_wire};
