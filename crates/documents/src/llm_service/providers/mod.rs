pub mod mock;
pub mod remote;

pub use mock::MockLlmService;
pub use remote::RemoteLlmService;
