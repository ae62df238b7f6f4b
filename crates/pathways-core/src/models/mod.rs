pub mod profile;
pub mod recommendation;
pub mod response;
pub mod therapy;
