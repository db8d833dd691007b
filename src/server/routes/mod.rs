pub mod admin;
pub mod data;
pub mod pages;
pub mod revalidate;
pub mod upload;
