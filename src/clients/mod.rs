pub mod question_store;
pub mod supabase_client;

pub use question_store::QuestionStore;
pub use supabase_client::SupabaseClient;
