mod archive;
mod error;
mod operations;
mod requests;
mod types;

pub use archive::{build_archive, ArchiveItem, ArchiveMonth};
pub use error::ContentError;
pub use operations::{
    published_posts, slugify, sort_projects, validate_post, validate_project,
};
pub use requests::{
    CreatePostRequest, CreateProjectRequest, UpdatePostRequest, UpdateProjectRequest,
};
pub use types::{BlogPost, ContentKind, Project};
