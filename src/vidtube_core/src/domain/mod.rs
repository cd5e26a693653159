pub mod channel;
pub mod email;
pub mod full_name;
pub mod media;
pub mod password;
pub mod tokens;
pub mod user;
pub mod user_error;
pub mod user_id;
pub mod username;
