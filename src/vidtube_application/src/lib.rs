pub mod compensation;
pub mod session;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use compensation::{CompensatingAction, Compensations};
pub use session::{SessionError, SessionManager};
pub use use_cases::{
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    channel_profile::{ChannelProfileError, ChannelProfileUseCase},
    current_user::{CurrentUserError, CurrentUserUseCase},
    delete_account::{DeleteAccountError, DeleteAccountUseCase},
    login::{LoginError, LoginResponse, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    refresh::{RefreshError, RefreshUseCase},
    register::{RegisterError, RegisterUseCase},
    update_account::{UpdateAccountError, UpdateAccountUseCase},
    update_media::{MediaSlot, UpdateMediaError, UpdateMediaUseCase},
    watch_history::{WatchHistoryError, WatchHistoryUseCase},
};
