pub mod randomuser;

pub use randomuser::RandomUserFetcher;
