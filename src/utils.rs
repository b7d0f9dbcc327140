pub mod mappers;
pub mod slug;
