pub mod notice;
pub mod storage;
pub mod theme;
pub mod word_list;
