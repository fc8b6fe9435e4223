pub mod admin {

    pub const USERNAME: &str = "admin";

    pub const PASSWORD: &str = "admin123";

    pub const MOBILE: &str = "";
}

/// School classes that papers, videos and notes can be filed under.
pub const CLASS_LEVELS: [i32; 5] = [8, 9, 10, 11, 12];

pub mod feedback {

    pub const MIN_RATING: i32 = 1;

    pub const MAX_RATING: i32 = 5;
}

pub mod uploads {

    pub const PAPERS_DIR: &str = "papers";

    pub const NOTES_DIR: &str = "notes";

    pub const PDF_MIME: &str = "application/pdf";

    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
}

pub mod session {

    pub const USER_ID_KEY: &str = "user_id";
}
