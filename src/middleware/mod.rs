pub mod json_body;
pub mod path_id;

pub use json_body::JsonBody;
pub use path_id::ItemId;
