pub mod concerns;
pub mod health;
pub mod recommendations;
pub mod therapies;
