pub mod accounts;
pub mod courses;
pub mod enrollments;

pub use self::accounts::model::CredentialsDto;
pub use self::courses::model::Course;
