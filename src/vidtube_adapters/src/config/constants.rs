pub const ACCESS_TOKEN_COOKIE_NAME: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE_NAME: &str = "refreshToken";

/// Largest request body accepted, multipart uploads included.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub mod env {
    pub const ENV_PREFIX: &str = "VIDTUBE";
    pub const ENV_SEPARATOR: &str = "__";
    pub const CONFIG_FILE_NAME: &str = "configuration";
}

pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8000;
    pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 900;
    pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 864_000;
    pub const POSTGRES_MAX_CONNECTIONS: u32 = 5;
}

pub mod prod {
    pub mod media_store {
        use std::time::Duration;

        pub const CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod media_store {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
