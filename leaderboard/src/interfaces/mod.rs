pub mod feed;
pub mod text_row;
