pub mod update_profile;
pub mod upload_avatar;

pub use update_profile::update_profile;
pub use upload_avatar::upload_avatar;
