mod change_password;
mod channel;
mod helpers;
mod login;
mod logout;
mod media;
mod refresh;
mod register;
