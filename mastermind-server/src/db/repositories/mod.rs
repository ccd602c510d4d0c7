mod company_repository;
mod persona_repository;
mod subreddit_repository;
mod keyword_repository;
mod week_repository;
mod post_repository;
mod comment_repository;

pub use company_repository::CompanyRepository;
pub use persona_repository::PersonaRepository;
pub use subreddit_repository::SubredditRepository;
pub use keyword_repository::KeywordRepository;
pub use week_repository::WeekRepository;
pub use post_repository::PostRepository;
pub use comment_repository::{AuthoredComment, CommentRepository};
