//! SeaORM entity definitions

pub mod item;
