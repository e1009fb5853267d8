pub mod answers;
pub mod curriculum;
pub mod health;
pub mod materials;
