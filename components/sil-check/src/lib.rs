mod verify;

pub use verify::{PARAM_SHADOWS_PARENT_PARAM, SAME_NAME_AS_PARENT, verify_header};
