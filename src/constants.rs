pub mod auth {

    /// Prefix the placeholder password transform prepends to the plaintext.
    /// This is not a hash and offers no protection for stored secrets.
    pub const PASSWORD_PREFIX: &str = "hashed";

    pub const TOKEN_TYPE: &str = "bearer";

    pub const BEARER_SCHEME: &str = "Bearer";
}

pub mod messages {

    pub const WELCOME: &str = "Projekt na zaliczenie Programowania Zaawansowanego, sprawdź http://127.0.0.1:8000/docs aby dowiedzieć się więcej!";

    pub const INVALID_IMAGE: &str = "Uploaded file is not a valid image";
}

pub mod limits {

    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

    /// Longest decimal input `GET /prime/{number}` will test, leading zeros excluded.
    pub const DEFAULT_MAX_PRIME_DIGITS: usize = 1000;
}
