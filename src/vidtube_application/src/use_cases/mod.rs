pub mod change_password;
pub mod channel_profile;
pub mod current_user;
pub mod delete_account;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod update_account;
pub mod update_media;
pub mod watch_history;
