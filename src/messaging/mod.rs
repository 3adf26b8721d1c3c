pub mod channels;
pub mod event;
