pub mod directory;
pub use directory::{CredentialRecord, DirectoryError, UserDirectory, UserRecord};

pub mod auth_service;
pub use auth_service::{AccessToken, AuthError, AuthService, transform_password};

pub mod auth_service_impl;
pub use auth_service_impl::DirectoryAuthService;

pub mod image;
pub use self::image::{ImageError, ImageService};

pub mod prime;
pub use prime::{PrimeCheck, PrimeError, is_prime};
