pub use super::blobs::Entity as Blobs;
pub use super::nft_tokens::Entity as NftTokens;
pub use super::transactions::Entity as Transactions;
