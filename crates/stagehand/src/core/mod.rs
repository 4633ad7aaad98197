pub mod actor;
pub mod actor_list;
pub mod state;
pub mod time;
