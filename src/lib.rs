pub mod item;
pub mod store;
pub mod codec;
pub mod order;
pub mod shell;
pub mod configs;
