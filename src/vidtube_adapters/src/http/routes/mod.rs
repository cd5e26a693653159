pub mod change_password;
pub mod channel_profile;
pub mod current_user;
pub mod delete_account;
pub mod error;
pub mod login;
pub mod logout;
pub mod multipart;
pub mod refresh_token;
pub mod register;
pub mod response;
pub mod update_account;
pub mod update_media;
pub mod watch_history;

pub use change_password::change_password;
pub use channel_profile::channel_profile;
pub use current_user::current_user;
pub use delete_account::delete_account;
pub use error::{ApiError, ErrorResponse};
pub use login::login;
pub use logout::logout;
pub use refresh_token::refresh_token;
pub use register::register;
pub use response::ApiResponse;
pub use update_account::update_account;
pub use update_media::{update_avatar, update_cover_image};
pub use watch_history::watch_history;
