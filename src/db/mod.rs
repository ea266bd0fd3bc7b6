pub mod connection;
pub mod queries;

pub use connection::make_pool;
pub use queries::{
    ADMIN_ROLE, delete_user_profile, fetch_deputy_candidates, fetch_deputy_user_id,
    fetch_user_role,
};
