// Upstream API client support
//
// The REST client surfaces themselves live in the owning service; this
// module carries the shared error taxonomy their failures are classified
// through, which the retry policy consumes.

pub mod error;

pub use error::{ApiError, ApiResult};
