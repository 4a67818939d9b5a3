pub mod batch_submitter;
pub mod row_ctx;
pub mod session;

pub use batch_submitter::{BatchOutcome, BatchSubmitter, SubmitEvent};
pub use row_ctx::RowCtx;
pub use session::ImportSession;
