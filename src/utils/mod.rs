pub(crate) mod error_handler;
pub(crate) mod misc;
pub(crate) mod sequence;
pub(crate) mod validation;

pub use error_handler::AppError;
pub use misc::*;
pub use sequence::get_seq_nxt_val;
pub use validation::validate_password;
pub use validation::ValidatedBody;
