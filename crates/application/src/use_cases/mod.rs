pub mod cache;
pub mod config;
pub mod dns;

// Re-export use cases
pub use cache::GetCacheStatsUseCase;
pub use config::ReloadConfigUseCase;
pub use dns::HandleDnsQueryUseCase;
