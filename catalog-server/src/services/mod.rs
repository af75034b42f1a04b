//! External service clients

pub mod asset_store;

pub use asset_store::{AssetStoreClient, AssetStoreError, StoredAsset};
