pub mod about;
pub mod content;
pub mod pages;

pub use about::ABOUT_PAGE;
pub use content::ContentService;
pub use pages::{AdminContent, HomePage, PersonalizationCard, SocialCard};
