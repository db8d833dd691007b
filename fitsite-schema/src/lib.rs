pub mod admin;
pub mod error;
pub mod pages;
pub mod revalidate;
pub mod upload;

pub use admin::{
    AccessPassSave, MembershipFeatureInput, MembershipPlanInput, MembershipSave,
    PersonalizationUpdate,
};
pub use error::ApiErrorBody;
pub use pages::{AboutPage, PhilosophyItem, TeamMember};
pub use revalidate::{RevalidateErrorBody, RevalidateRequest, RevalidateResponse};
pub use upload::{UploadUrlRequest, UploadUrlResponse};
