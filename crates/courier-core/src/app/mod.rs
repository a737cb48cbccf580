//! App 層: ports・queue・pool をつないで動く Dispatcher にする
//!
//! - **DispatcherBuilder**: 検証と組み立て
//! - **Dispatcher**: submit / 参照 / shutdown

pub mod builder;
pub mod dispatcher;

pub use self::builder::DispatcherBuilder;
pub use self::dispatcher::Dispatcher;
