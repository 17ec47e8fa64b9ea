/// Default database file name inside the data directory
pub const DB_FILE_NAME: &str = "mentormee.db";

/// Default session token file name inside the data directory
pub const TOKEN_FILE_NAME: &str = "session.token";

/// Separator between the email and the random suffix of a session token
pub const TOKEN_SEPARATOR: char = '-';

/// Pattern an input must match to be treated as an email at login
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

