pub mod envelope;
pub mod guard;
pub mod health;
pub mod items;
pub mod router;
